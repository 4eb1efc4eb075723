//! Timer scheduling abstraction
//!
//! The controller owns the two periodic ticks (spawn and countdown) through
//! this trait instead of ambient interval globals. Handles returned at start
//! let `end`/`reset` cancel both before returning, so a ghost tick can never
//! mutate state after a session ends.

/// Which periodic tick a scheduled task drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Spawn,
    Countdown,
}

/// Opaque handle to a scheduled repeating task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(pub i32);

/// Platform timer source
///
/// The web binding maps this onto `setInterval`/`clearInterval`; tests use an
/// in-memory recorder.
pub trait Scheduler {
    /// Schedule `kind` to fire every `interval_ms` until cancelled
    fn every(&mut self, kind: TimerKind, interval_ms: u32) -> TimerHandle;
    /// Stop a scheduled task
    fn cancel(&mut self, handle: TimerHandle);
}

/// The pair of live timers owned by a running session
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimerPair {
    pub spawn: TimerHandle,
    pub countdown: TimerHandle,
}
