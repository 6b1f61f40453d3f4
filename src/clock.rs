//! Clock Module
//!
//! Time source shared by the cache and the engine. Production code reads wall
//! time; tests drive a [`ManualClock`] so expiry windows measured in days can be
//! crossed without sleeping.

use std::fmt::Debug;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

// == Clock Trait ==
/// Source of the current instant.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// == System Clock ==
/// Wall-clock time from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a manual clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += to_time_delta(by);
    }

    /// Pins the clock to `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = at;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// == Utility Functions ==
/// Converts a std duration into a chrono delta, saturating at the maximum.
pub fn to_time_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen() {
        let clock = ManualClock::default();
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.now(), first);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::default();
        let start = clock.now();
        clock.advance(Duration::from_secs(3600));
        assert_eq!(clock.now() - start, TimeDelta::hours(1));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::default();
        let target = Utc::now() + TimeDelta::days(3);
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn test_to_time_delta_saturates() {
        assert_eq!(to_time_delta(Duration::MAX), TimeDelta::MAX);
        assert_eq!(to_time_delta(Duration::from_secs(60)), TimeDelta::minutes(1));
    }
}
