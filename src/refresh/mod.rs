//! Refresh scheduling, kept apart from rendering.
//!
//! A cycle is either in flight or the countdown to the next one is running.
//! Manual requests cut the countdown short; requests while a cycle is in
//! flight are dropped, so cycles never overlap.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshTrigger {
    Startup,
    Manual,
    Timed,
    RosterReload,
}

#[derive(Clone, Debug)]
pub struct Countdown {
    total: Duration,
    deadline: Option<Instant>,
}

impl Countdown {
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            deadline: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.total);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Whole seconds left, rounded up so the display never shows 0 before expiry.
    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        self.remaining(now)
            .map(|r| r.as_secs() + u64::from(r.subsec_nanos() > 0))
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    InFlight(RefreshTrigger),
    CountingDown,
}

#[derive(Clone, Debug)]
pub struct RefreshLoop {
    phase: Phase,
    countdown: Countdown,
}

impl RefreshLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            countdown: Countdown::new(interval),
        }
    }

    /// Starts a cycle unless one is already running.
    pub fn request(&mut self, trigger: RefreshTrigger) -> Option<RefreshTrigger> {
        if let Phase::InFlight(_) = self.phase {
            return None;
        }
        self.countdown.cancel();
        self.phase = Phase::InFlight(trigger);
        Some(trigger)
    }

    /// The in-flight cycle finished (successfully or not); begin counting down.
    pub fn complete(&mut self, now: Instant) {
        self.phase = Phase::CountingDown;
        self.countdown.start(now);
    }

    /// Fires a timed cycle once the countdown runs out.
    pub fn poll(&mut self, now: Instant) -> Option<RefreshTrigger> {
        if self.phase == Phase::CountingDown && self.countdown.is_due(now) {
            return self.request(RefreshTrigger::Timed);
        }
        None
    }

    pub fn in_flight(&self) -> Option<RefreshTrigger> {
        match self.phase {
            Phase::InFlight(trigger) => Some(trigger),
            _ => None,
        }
    }

    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        match self.phase {
            Phase::CountingDown => self.countdown.remaining_secs(now),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn countdown_counts_whole_seconds_down_to_due() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(MINUTE);
        assert_eq!(countdown.remaining_secs(t0), None);
        assert!(!countdown.is_due(t0));

        countdown.start(t0);
        assert!(countdown.remaining(t0).is_some());
        assert_eq!(countdown.remaining_secs(t0), Some(60));
        assert_eq!(
            countdown.remaining_secs(t0 + Duration::from_millis(59_500)),
            Some(1)
        );
        assert!(!countdown.is_due(t0 + Duration::from_millis(59_999)));
        assert!(countdown.is_due(t0 + MINUTE));
        assert_eq!(countdown.remaining_secs(t0 + MINUTE * 2), Some(0));

        countdown.cancel();
        assert_eq!(countdown.remaining(t0), None);
        assert!(!countdown.is_due(t0 + MINUTE * 2));
    }

    #[test]
    fn timed_cycle_fires_after_interval() {
        let t0 = Instant::now();
        let mut refresh = RefreshLoop::new(MINUTE);

        assert_eq!(
            refresh.request(RefreshTrigger::Startup),
            Some(RefreshTrigger::Startup)
        );
        assert_eq!(refresh.poll(t0 + MINUTE * 5), None);

        refresh.complete(t0);
        assert_eq!(refresh.remaining_secs(t0), Some(60));
        assert_eq!(refresh.poll(t0 + Duration::from_secs(30)), None);
        assert_eq!(refresh.poll(t0 + MINUTE), Some(RefreshTrigger::Timed));
        assert_eq!(refresh.in_flight(), Some(RefreshTrigger::Timed));
        assert_eq!(refresh.remaining_secs(t0 + MINUTE), None);
    }

    #[test]
    fn manual_cuts_countdown_short() {
        let t0 = Instant::now();
        let mut refresh = RefreshLoop::new(MINUTE);
        refresh.request(RefreshTrigger::Startup);
        refresh.complete(t0);

        assert_eq!(
            refresh.request(RefreshTrigger::Manual),
            Some(RefreshTrigger::Manual)
        );
        // The abandoned countdown must not fire on top of the manual cycle.
        assert_eq!(refresh.poll(t0 + MINUTE * 2), None);
    }

    #[test]
    fn no_overlapping_cycles() {
        let mut refresh = RefreshLoop::new(MINUTE);
        refresh.request(RefreshTrigger::Startup);

        assert_eq!(refresh.request(RefreshTrigger::Manual), None);
        assert_eq!(refresh.request(RefreshTrigger::RosterReload), None);
        assert_eq!(refresh.in_flight(), Some(RefreshTrigger::Startup));
    }
}
