use crate::error::ChronoError;
use crate::gregorian::PlainDate;
use crate::prelude::*;

const MAX_HOUR: u8 = 23;
const MAX_MINUTE: u8 = 59;
const MAX_SECOND: u8 = 59;

/// Time of day with second precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}:{:02}:{:02}", hour, minute, second)]
pub struct WallTime {
    hour:   u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    pub const MIDNIGHT: Self = Self {
        hour:   0,
        minute: 0,
        second: 0,
    };

    /// # Errors
    /// Returns `ChronoError::OutOfRange` for any component outside its bounds.
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ChronoError> {
        for (element, value, max) in [
            ("HOUR", hour, MAX_HOUR),
            ("MINUTE", minute, MAX_MINUTE),
            ("SECOND", second, MAX_SECOND),
        ] {
            if value > max {
                return Err(ChronoError::out_of_range(element, value.into(), 0, max.into()));
            }
        }
        Ok(Self { hour, minute, second })
    }

    /// Time of day from seconds after midnight, wrapping around full days.
    pub fn of_second_of_day(seconds: i64) -> Self {
        let seconds = seconds.rem_euclid(86_400);
        Self {
            hour:   (seconds / 3600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub fn second_of_day(&self) -> i64 {
        i64::from(self.hour) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second)
    }
}

/// Local date and time without a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}T{}", date, time)]
pub struct PlainTimestamp {
    date: PlainDate,
    time: WallTime,
}

impl PlainTimestamp {
    pub const fn new(date: PlainDate, time: WallTime) -> Self {
        Self { date, time }
    }

    pub const fn date(&self) -> PlainDate {
        self.date
    }

    pub const fn time(&self) -> WallTime {
        self.time
    }

    #[must_use]
    pub const fn with_date(&self, date: PlainDate) -> Self {
        Self { date, time: self.time }
    }
}
