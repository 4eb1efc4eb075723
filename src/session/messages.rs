//! End-of-session messages

use rand::Rng;

pub const WIN_MESSAGES: [&str; 3] = [
    "Amazing! You helped bring water to a community!",
    "You did it - lives are changing because of your speed!",
    "Victory! You're a water hero!",
];

pub const LOSE_MESSAGES: [&str; 3] = [
    "Good try - keep practicing to reach more communities!",
    "Almost there - try again and beat your score!",
    "Nice effort - you can do it with one more run!",
];

/// Pick an outcome message at random
pub fn pick<R: Rng>(rng: &mut R, won: bool) -> &'static str {
    let pool: &[&'static str] = if won { &WIN_MESSAGES } else { &LOSE_MESSAGES };
    pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pick_draws_from_matching_pool() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            assert!(WIN_MESSAGES.contains(&pick(&mut rng, true)));
            assert!(LOSE_MESSAGES.contains(&pick(&mut rng, false)));
        }
    }
}
