use crate::occupancy::types::Weekday;

/// Half-open opening interval in minutes since midnight: `[open, close)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenHours {
    pub open: u32,
    pub close: u32,
}

const WEEKDAY_HOURS: OpenHours = OpenHours {
    open: 7 * 60,
    close: 23 * 60,
};

const SATURDAY_HOURS: OpenHours = OpenHours {
    open: 8 * 60,
    close: 18 * 60,
};

const SUNDAY_HOURS: OpenHours = OpenHours {
    open: 8 * 60,
    close: 23 * 60,
};

impl OpenHours {
    /// Facility hours for a given day.
    ///
    /// | Day             | Open  | Close |
    /// |-----------------|-------|-------|
    /// | Monday - Friday | 07:00 | 23:00 |
    /// | Saturday        | 08:00 | 18:00 |
    /// | Sunday          | 08:00 | 23:00 |
    pub fn for_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Saturday => SATURDAY_HOURS,
            Weekday::Sunday => SUNDAY_HOURS,
            _ => WEEKDAY_HOURS,
        }
    }

    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.open && minute < self.close
    }
}

/// Returns `true` if the facility is open at `minute` past midnight on `day`.
pub fn is_open(day: Weekday, minute: u32) -> bool {
    OpenHours::for_weekday(day).contains(minute)
}
