/*!
Scheduling for the two periodic tasks: the throttled animation driver and the
fixed-interval sky timer.

Both are advanced by host-supplied time in milliseconds, so a display refresh
callback and a test loop drive them the same way. A shared [`CancelToken`] stops
both for good.
*/

use std::cell::Cell;
use std::rc::Rc;

/// Cloneable stop flag shared by everything driving one aquarium.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverState {
    /// Before the first tick.
    Idle,
    Running { last_tick_ms: f64 },
    Stopped,
}

/// What one poll of the driver decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Run one entity update pass now.
    Tick,
    /// Too early since the last tick.
    Throttled,
    /// Not running.
    Halted,
}

/// Throttles a fast callback source down to a fixed tick rate.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    state: DriverState,
    interval_ms: f64,
    ticks: u64,
}

impl AnimationDriver {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            state: DriverState::Idle,
            interval_ms,
            ticks: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Number of ticks granted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Idle to running. Returns false if the driver was not idle.
    pub fn start(&mut self) -> bool {
        if self.state != DriverState::Idle {
            return false;
        }
        self.state = DriverState::Running { last_tick_ms: 0.0 };
        true
    }

    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    /// Decide whether the callback at `now_ms` runs an update pass.
    ///
    /// On a tick the recorded time is aligned down to the interval grid, so it
    /// always advances by a whole number of intervals and throttling does not
    /// drift.
    pub fn poll(&mut self, now_ms: f64) -> Poll {
        let DriverState::Running { last_tick_ms } = self.state else {
            return Poll::Halted;
        };
        let elapsed = now_ms - last_tick_ms;
        if elapsed < self.interval_ms {
            return Poll::Throttled;
        }
        self.state = DriverState::Running {
            last_tick_ms: now_ms - elapsed % self.interval_ms,
        };
        self.ticks += 1;
        Poll::Tick
    }
}

/// Fires every `period_ms`, replaying a bounded number of missed periods.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: f64,
    next_due_ms: Option<f64>,
    max_catch_up: u32,
}

impl IntervalTimer {
    pub fn new(period_ms: f64, max_catch_up: u32) -> Self {
        Self {
            period_ms,
            next_due_ms: None,
            max_catch_up: max_catch_up.max(1),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Arm the timer; the first firing is one period after `now_ms`.
    pub fn arm(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + self.period_ms);
    }

    pub fn disarm(&mut self) {
        self.next_due_ms = None;
    }

    /// How many firings are due at `now_ms`.
    ///
    /// After a long stall only `max_catch_up` firings are reported and the
    /// schedule restarts from `now_ms`.
    pub fn take_due(&mut self, now_ms: f64) -> u32 {
        let Some(mut next) = self.next_due_ms else {
            return 0;
        };
        let mut fired = 0;
        while next <= now_ms {
            fired += 1;
            next += self.period_ms;
            if fired == self.max_catch_up {
                if next <= now_ms {
                    next = now_ms + self.period_ms;
                }
                break;
            }
        }
        self.next_due_ms = Some(next);
        fired
    }
}
