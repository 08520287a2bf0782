//! Wall-clock time sources.

use chrono::{Duration, Local, NaiveTime, Timelike};
use std::sync::{Mutex, PoisonError};

/// Supplies the wall-clock time used to stamp history entries.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// The local time of day.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveTime>,
}

impl ManualClock {
    /// Create a clock stopped at `start`.
    pub fn new(start: NaiveTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Start at `hh:mm:ss`; out-of-range parts fall back to midnight.
    pub fn at(hour: u32, minute: u32, second: u32) -> Self {
        Self::new(NaiveTime::from_hms_opt(hour, minute, second).unwrap_or(NaiveTime::MIN))
    }

    /// Jump to an exact time.
    pub fn set(&self, time: NaiveTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }

    /// Move forward by whole seconds.
    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Round a time down to the start of its bucket.
pub fn bucket_start(time: NaiveTime, resolution_secs: u32) -> NaiveTime {
    let resolution = resolution_secs.max(1);
    let secs = time.num_seconds_from_midnight() / resolution * resolution;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(time)
}

/// Render a timestamp the way the agent says it.
pub fn format_timestamp(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
