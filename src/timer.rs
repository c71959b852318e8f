use std::time::{Duration, Instant};

/// A cancellable periodic timer.
///
/// Nothing runs in the background: the owner asks for the
/// [`deadline()`][Ticker::deadline], waits for it, and then calls
/// [`fire()`][Ticker::fire].  Changing the period always cancels the pending
/// tick and schedules a new one a full period from the time of the change.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Ticker {
    scheduled: Option<Scheduled>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Scheduled {
    period: Duration,
    next: Instant,
}

impl Ticker {
    /// Cancel any pending tick and start ticking every `period`, beginning
    /// one period after `now`
    pub(crate) fn schedule(&mut self, period: Duration, now: Instant) {
        self.cancel();
        self.scheduled = Some(Scheduled {
            period,
            next: now + period,
        });
    }

    pub(crate) fn cancel(&mut self) {
        self.scheduled = None;
    }

    pub(crate) fn period(&self) -> Option<Duration> {
        self.scheduled.map(|s| s.period)
    }

    /// When the next tick is due
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.scheduled.map(|s| s.next)
    }

    /// If a tick is due at `now`, consume it, schedule the following one, and
    /// return `true`.  Ticks missed while the owner was busy are not made up.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.scheduled {
            Some(ref mut s) if s.next <= now => {
                s.next = now + s.period;
                true
            }
            _ => false,
        }
    }
}

/// A cancellable timer that fires only once
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct OneShot {
    when: Option<Instant>,
}

impl OneShot {
    pub(crate) fn arm(&mut self, delay: Duration, now: Instant) {
        self.when = Some(now + delay);
    }

    pub(crate) fn cancel(&mut self) {
        self.when = None;
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.when
    }

    /// Returns `true` (and disarms the timer) if it is due at `now`
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        if self.when.is_some_and(|w| w <= now) {
            self.when = None;
            true
        } else {
            false
        }
    }
}
