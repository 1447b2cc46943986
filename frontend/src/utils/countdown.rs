const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time remaining until launch, split into display units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// All fields are zero once `now_ms` has reached `target_ms`.
    pub fn until(target_ms: i64, now_ms: i64) -> Self {
        let difference = target_ms - now_ms;
        if difference <= 0 {
            return Self::default();
        }
        Self {
            days: difference / MS_PER_DAY,
            hours: (difference / MS_PER_HOUR) % 24,
            minutes: (difference / MS_PER_MINUTE) % 60,
            seconds: (difference / MS_PER_SECOND) % 60,
        }
    }

    #[cfg(test)]
    fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Display order of the countdown cards.
    pub fn units(&self) -> [(&'static str, i64); 4] {
        [
            ("days", self.days),
            ("hours", self.hours),
            ("minutes", self.minutes),
            ("seconds", self.seconds),
        ]
    }
}

/// Wall-clock time in milliseconds since the epoch.
pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}
