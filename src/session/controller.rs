//! Session lifecycle and scoring rules
//!
//! `SessionController` is the sole authority mutating `SessionState`. It owns
//! the spawn and countdown timers through the `Scheduler` trait and talks to
//! the screen only through the `Presentation` trait.
//!
//! Invalid calls are silent no-ops by contract: a start while a session is
//! running, a click on an already resolved item, or a tick that races past
//! `end` must not mutate anything, raise anything, or log anything.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{COUNTDOWN_INTERVAL_MS, POINTS_PER_CAN};
use crate::presentation::Presentation;

use super::messages;
use super::profile::DifficultyProfile;
use super::spawn::SpawnPolicy;
use super::state::{ItemKind, LiveItem, SessionPhase, SessionState};
use super::timers::{Scheduler, TimerKind, TimerPair};

pub struct SessionController<P: Presentation, S: Scheduler> {
    state: SessionState,
    policy: SpawnPolicy,
    rng: Pcg32,
    presentation: P,
    scheduler: S,
    timers: Option<TimerPair>,
    live: Option<LiveItem>,
    next_item_id: u32,
}

impl<P: Presentation, S: Scheduler> SessionController<P, S> {
    pub fn new(presentation: P, scheduler: S, policy: SpawnPolicy, seed: u64) -> Self {
        Self {
            state: SessionState::idle(DifficultyProfile::default()),
            policy,
            rng: Pcg32::seed_from_u64(seed),
            presentation,
            scheduler,
            timers: None,
            live: None,
            next_item_id: 1,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The unresolved-or-resolved item currently on the grid
    pub fn live_item(&self) -> Option<&LiveItem> {
        self.live.as_ref()
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin a session with `profile`; no-op if one is already running
    pub fn start(&mut self, profile: DifficultyProfile) {
        if self.state.active() {
            return;
        }

        self.state = SessionState::new(profile);
        self.live = None;
        log::info!(
            "Session started: {} ({}s, goal {})",
            profile.name.as_str(),
            profile.duration_seconds,
            profile.goal_points
        );

        self.presentation.render_grid(self.policy.cell_count);
        self.push_stats();

        let spawn = self
            .scheduler
            .every(TimerKind::Spawn, profile.spawn_interval_ms);
        let countdown = self
            .scheduler
            .every(TimerKind::Countdown, COUNTDOWN_INTERVAL_MS);
        self.timers = Some(TimerPair { spawn, countdown });

        // First item appears immediately rather than one interval in
        self.on_spawn_tick();
    }

    /// Spawn timer fired: replace whatever is on the grid with a new item
    pub fn on_spawn_tick(&mut self) {
        if !self.state.active() {
            return;
        }

        self.presentation.clear_unresolved();

        let event = self.policy.next(&mut self.rng);
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.live = Some(LiveItem {
            id,
            kind: event.kind,
            cell: event.cell_index,
            resolved: false,
        });
        self.presentation.render_spawn(id, &event);
    }

    /// Player activated a reward item
    pub fn on_collect(&mut self, item_id: u32) {
        if !self.state.active() {
            return;
        }
        let Some(item) = self.live.as_mut() else {
            return;
        };
        if item.id != item_id || item.resolved || item.kind != ItemKind::Reward {
            return;
        }
        item.resolved = true;

        self.state.collected += 1;
        self.state.score += POINTS_PER_CAN;
        self.presentation.show_delta(POINTS_PER_CAN as i32);
        self.push_stats();

        if self.state.collected >= self.state.profile.goal_points {
            self.end(true);
        }
    }

    /// Player activated a penalty item
    pub fn on_penalty_hit(&mut self, item_id: u32) {
        if !self.state.active() {
            return;
        }
        let Some(item) = self.live.as_mut() else {
            return;
        };
        if item.id != item_id || item.resolved || item.kind != ItemKind::Penalty {
            return;
        }
        item.resolved = true;

        let penalty = self.state.profile.penalty_per_hit;
        self.state.score = self.state.score.saturating_sub(penalty);
        self.presentation.show_delta(-(penalty as i32));
        self.push_stats();
    }

    /// Countdown timer fired: one second gone
    pub fn on_countdown_tick(&mut self) {
        if !self.state.active() {
            return;
        }
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        self.push_stats();
        if self.state.time_remaining == 0 {
            self.end(false);
        }
    }

    /// Finish the session and report the outcome
    pub fn end(&mut self, won: bool) {
        if !self.state.active() {
            return;
        }
        self.state.phase = SessionPhase::Ended;
        self.cancel_timers();
        self.live = None;
        self.presentation.clear_unresolved();

        let message = messages::pick(&mut self.rng, won);
        self.presentation
            .show_outcome(won, self.state.score, message);
        if won {
            self.presentation.celebrate();
        }
        log::info!(
            "Session ended: {} with score {} ({}/{} collected)",
            if won { "won" } else { "lost" },
            self.state.score,
            self.state.collected,
            self.state.profile.goal_points
        );
    }

    /// Abandon any running session and zero the displayed stats, no message
    pub fn reset(&mut self, profile: DifficultyProfile) {
        if self.state.active() {
            self.cancel_timers();
        }
        self.state = SessionState::idle(profile);
        self.live = None;
        self.presentation.clear_unresolved();
        self.push_stats();
        log::info!("Session reset");
    }

    fn cancel_timers(&mut self) {
        if let Some(timers) = self.timers.take() {
            self.scheduler.cancel(timers.spawn);
            self.scheduler.cancel(timers.countdown);
        }
    }

    fn push_stats(&mut self) {
        self.presentation.update_stats(
            self.state.collected,
            self.state.profile.goal_points,
            self.state.score,
            self.state.time_remaining,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::profile::Difficulty;
    use crate::session::state::SpawnEvent;
    use crate::session::timers::TimerHandle;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        RenderGrid(usize),
        RenderSpawn(u32, ItemKind, usize),
        ClearUnresolved,
        ShowDelta(i32),
        UpdateStats(u32, u32, u32, u32),
        ShowOutcome(bool, u32),
        Celebrate,
    }

    #[derive(Default)]
    struct FakePresentation {
        calls: Vec<Call>,
    }

    impl Presentation for FakePresentation {
        fn render_grid(&mut self, cell_count: usize) {
            self.calls.push(Call::RenderGrid(cell_count));
        }
        fn render_spawn(&mut self, item_id: u32, event: &SpawnEvent) {
            self.calls
                .push(Call::RenderSpawn(item_id, event.kind, event.cell_index));
        }
        fn clear_unresolved(&mut self) {
            self.calls.push(Call::ClearUnresolved);
        }
        fn show_delta(&mut self, delta: i32) {
            self.calls.push(Call::ShowDelta(delta));
        }
        fn update_stats(&mut self, collected: u32, goal: u32, score: u32, time_remaining: u32) {
            self.calls
                .push(Call::UpdateStats(collected, goal, score, time_remaining));
        }
        fn show_outcome(&mut self, won: bool, final_score: u32, _message: &str) {
            self.calls.push(Call::ShowOutcome(won, final_score));
        }
        fn celebrate(&mut self) {
            self.calls.push(Call::Celebrate);
        }
    }

    #[derive(Default)]
    struct FakeScheduler {
        next_handle: i32,
        scheduled: Vec<(TimerKind, u32, TimerHandle)>,
        cancelled: Vec<TimerHandle>,
    }

    impl Scheduler for FakeScheduler {
        fn every(&mut self, kind: TimerKind, interval_ms: u32) -> TimerHandle {
            self.next_handle += 1;
            let handle = TimerHandle(self.next_handle);
            self.scheduled.push((kind, interval_ms, handle));
            handle
        }
        fn cancel(&mut self, handle: TimerHandle) {
            self.cancelled.push(handle);
        }
    }

    type TestController = SessionController<FakePresentation, FakeScheduler>;

    fn controller() -> TestController {
        SessionController::new(
            FakePresentation::default(),
            FakeScheduler::default(),
            SpawnPolicy::default(),
            12345,
        )
    }

    /// A policy that never spawns penalties, for scripted collect runs
    fn rewards_only() -> TestController {
        SessionController::new(
            FakePresentation::default(),
            FakeScheduler::default(),
            SpawnPolicy::new(9, 0.0),
            12345,
        )
    }

    fn penalties_only() -> TestController {
        SessionController::new(
            FakePresentation::default(),
            FakeScheduler::default(),
            SpawnPolicy::new(9, 1.0),
            12345,
        )
    }

    fn live_id(c: &TestController) -> u32 {
        c.live_item().map(|item| item.id).unwrap_or(0)
    }

    #[test]
    fn test_start_schedules_both_timers_and_spawns() {
        let mut c = controller();
        c.start(Difficulty::Normal.profile());

        assert!(c.state().active());
        assert_eq!(c.scheduler().scheduled.len(), 2);
        let kinds: Vec<_> = c.scheduler().scheduled.iter().map(|s| s.0).collect();
        assert!(kinds.contains(&TimerKind::Spawn));
        assert!(kinds.contains(&TimerKind::Countdown));
        assert_eq!(c.scheduler().scheduled[0].1, 900);
        assert_eq!(c.scheduler().scheduled[1].1, 1000);
        // Immediate first spawn
        assert!(c.live_item().is_some());
    }

    #[test]
    fn test_start_while_active_is_noop() {
        let mut c = controller();
        c.start(Difficulty::Normal.profile());
        c.on_spawn_tick();
        let state_before = c.state().clone();
        let live_before = c.live_item().copied();

        c.start(Difficulty::Hard.profile());

        assert_eq!(c.state().profile, state_before.profile);
        assert_eq!(c.state().time_remaining, state_before.time_remaining);
        assert_eq!(c.live_item().copied(), live_before);
        assert_eq!(c.scheduler().scheduled.len(), 2);
    }

    #[test]
    fn test_collect_increments_score_and_counter() {
        let mut c = rewards_only();
        c.start(Difficulty::Normal.profile());

        for expected in 1..=5 {
            c.on_collect(live_id(&c));
            assert_eq!(c.state().collected, expected);
            assert_eq!(c.state().score, expected);
            c.on_spawn_tick();
        }
    }

    #[test]
    fn test_goal_reached_wins_exactly_once() {
        let mut c = rewards_only();
        c.start(Difficulty::Normal.profile());

        for _ in 0..20 {
            c.on_collect(live_id(&c));
            c.on_spawn_tick();
        }

        assert_eq!(c.state().collected, 20);
        assert_eq!(c.state().phase, SessionPhase::Ended);
        let outcomes: Vec<_> = c
            .presentation()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::ShowOutcome(true, _)))
            .collect();
        assert_eq!(outcomes.len(), 1);
        assert!(c.presentation().calls.contains(&Call::Celebrate));
    }

    #[test]
    fn test_penalty_clamps_score_at_zero() {
        let mut c = penalties_only();
        c.start(Difficulty::Normal.profile());
        // Score is 0, penalty is 5: stays 0
        c.on_penalty_hit(live_id(&c));
        assert_eq!(c.state().score, 0);

        c.on_spawn_tick();
        c.on_penalty_hit(live_id(&c));
        assert_eq!(c.state().score, 0);
    }

    #[test]
    fn test_penalty_from_small_positive_score() {
        let mut c = controller();
        c.start(Difficulty::Normal.profile());
        // Walk spawns until three rewards are collected, then one penalty
        let mut collected = 0;
        let mut penalized = false;
        for _ in 0..200 {
            let item = *c.live_item().expect("live item");
            match item.kind {
                ItemKind::Reward if collected < 3 => {
                    c.on_collect(item.id);
                    collected += 1;
                }
                ItemKind::Penalty if collected == 3 => {
                    c.on_penalty_hit(item.id);
                    penalized = true;
                    break;
                }
                _ => {}
            }
            c.on_spawn_tick();
        }
        assert!(penalized, "policy never produced the needed sequence");
        // 3 - 5 clamps to 0, not negative
        assert_eq!(c.state().score, 0);
        assert_eq!(c.state().collected, 3);
        assert!(c
            .presentation()
            .calls
            .contains(&Call::ShowDelta(-5)));
    }

    #[test]
    fn test_double_resolution_changes_state_once() {
        let mut c = rewards_only();
        c.start(Difficulty::Normal.profile());
        let id = live_id(&c);

        c.on_collect(id);
        c.on_collect(id);

        assert_eq!(c.state().collected, 1);
        assert_eq!(c.state().score, 1);
    }

    #[test]
    fn test_kind_mismatch_is_noop() {
        let mut c = penalties_only();
        c.start(Difficulty::Normal.profile());
        let id = live_id(&c);

        // Collecting a penalty item does nothing
        c.on_collect(id);
        assert_eq!(c.state().collected, 0);
        assert_eq!(c.state().score, 0);
        assert!(!c.live_item().expect("live item").resolved);
    }

    #[test]
    fn test_stale_item_id_is_noop() {
        let mut c = rewards_only();
        c.start(Difficulty::Normal.profile());
        let stale = live_id(&c);
        c.on_spawn_tick();

        c.on_collect(stale);
        assert_eq!(c.state().collected, 0);
    }

    #[test]
    fn test_spawn_tick_clears_previous_item_first() {
        let mut c = controller();
        c.start(Difficulty::Normal.profile());
        let first = live_id(&c);
        c.on_spawn_tick();

        assert_ne!(live_id(&c), first);
        // Every spawn render is preceded by a clear
        let calls = &c.presentation().calls;
        let spawn_positions: Vec<_> = calls
            .iter()
            .enumerate()
            .filter(|(_, call)| matches!(call, Call::RenderSpawn(..)))
            .map(|(i, _)| i)
            .collect();
        for pos in spawn_positions {
            assert!(matches!(calls[pos - 1], Call::ClearUnresolved));
        }
    }

    #[test]
    fn test_countdown_to_zero_loses() {
        let mut c = rewards_only();
        c.start(Difficulty::Hard.profile());
        for _ in 0..5 {
            c.on_collect(live_id(&c));
            c.on_spawn_tick();
        }

        for _ in 0..20 {
            c.on_countdown_tick();
        }

        assert_eq!(c.state().phase, SessionPhase::Ended);
        assert_eq!(c.state().collected, 5);
        assert!(c
            .presentation()
            .calls
            .iter()
            .any(|call| matches!(call, Call::ShowOutcome(false, _))));
        assert!(!c.presentation().calls.contains(&Call::Celebrate));
    }

    #[test]
    fn test_ticks_after_end_are_inert() {
        let mut c = controller();
        c.start(Difficulty::Hard.profile());
        for _ in 0..20 {
            c.on_countdown_tick();
        }
        assert_eq!(c.state().phase, SessionPhase::Ended);
        let state_before = c.state().clone();
        let call_count = c.presentation().calls.len();

        // Ghost ticks and clicks after end
        c.on_spawn_tick();
        c.on_countdown_tick();
        c.on_collect(1);
        c.on_penalty_hit(1);

        assert_eq!(c.state().score, state_before.score);
        assert_eq!(c.state().time_remaining, 0);
        assert_eq!(c.presentation().calls.len(), call_count);
    }

    #[test]
    fn test_end_cancels_both_timers() {
        let mut c = controller();
        c.start(Difficulty::Normal.profile());
        let handles: Vec<_> = c.scheduler().scheduled.iter().map(|s| s.2).collect();

        c.end(false);

        assert_eq!(c.scheduler().cancelled, handles);
        // A second end does not double-cancel
        c.end(false);
        assert_eq!(c.scheduler().cancelled.len(), 2);
    }

    #[test]
    fn test_reset_mid_session() {
        let mut c = rewards_only();
        c.start(Difficulty::Normal.profile());
        c.on_collect(live_id(&c));
        assert_eq!(c.state().score, 1);

        c.reset(Difficulty::Normal.profile());

        assert!(!c.state().active());
        assert_eq!(c.state().collected, 0);
        assert_eq!(c.state().score, 0);
        assert_eq!(c.state().time_remaining, 30);
        assert_eq!(c.scheduler().cancelled.len(), 2);
        // No outcome message on reset
        assert!(!c
            .presentation()
            .calls
            .iter()
            .any(|call| matches!(call, Call::ShowOutcome(..))));

        // Simulated ghost tick after reset changes nothing
        c.on_spawn_tick();
        assert!(c.live_item().is_none());
    }

    #[test]
    fn test_reset_while_idle_cancels_nothing() {
        let mut c = controller();
        c.reset(Difficulty::Easy.profile());
        assert!(c.scheduler().cancelled.is_empty());
        assert_eq!(c.state().time_remaining, 40);
    }

    #[test]
    fn test_restart_after_end_uses_fresh_state() {
        let mut c = rewards_only();
        c.start(Difficulty::Normal.profile());
        c.on_collect(live_id(&c));
        c.end(false);

        c.start(Difficulty::Easy.profile());

        assert!(c.state().active());
        assert_eq!(c.state().collected, 0);
        assert_eq!(c.state().score, 0);
        assert_eq!(c.state().time_remaining, 40);
        assert_eq!(c.state().profile.goal_points, 15);
    }

    #[test]
    fn test_item_ids_are_monotonic() {
        let mut c = controller();
        c.start(Difficulty::Normal.profile());
        let mut last = live_id(&c);
        for _ in 0..10 {
            c.on_spawn_tick();
            let id = live_id(&c);
            assert!(id > last);
            last = id;
        }
    }
}
