//! Settings of the Badi calendar engine.

use serde::{Deserialize, Serialize};

use crate::consts::MARCH;
use crate::error::ChronoError;
use crate::gregorian::PlainDate;
use crate::solar::GeoLocation;
use crate::types::{Weekmodel, days_in_month};

/// Tehran standard time, UTC+3:30.
pub const TEHRAN_UTC_OFFSET_SECONDS: i32 = 12_600;

/// Where and how the Badi year boundary is determined.
///
/// Every field has a default, so a partial document deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadiConfig {
    /// Place whose equinox and sunset decide the new year.
    pub location:            GeoLocation,
    /// Civil offset of `location` from UTC, in seconds.
    pub utc_offset_seconds:  i32,
    /// First Gregorian day on which the astronomical rule applies.
    pub switch_date:         PlainDate,
    /// Gregorian (month, day) of the new year before the switch date.
    pub civil_new_year:      (u8, u8),
    /// Use the Naw-Ruz dates published for 2015 to 2064 instead of the
    /// solar model where they are available.
    pub published_new_years: bool,
    pub weekmodel:           Weekmodel,
}

impl Default for BadiConfig {
    fn default() -> Self {
        Self {
            location:            GeoLocation::TEHRAN,
            utc_offset_seconds:  TEHRAN_UTC_OFFSET_SECONDS,
            switch_date:         DEFAULT_SWITCH_DATE,
            civil_new_year:      (MARCH, 21),
            published_new_years: true,
            weekmodel:           Weekmodel::BADI,
        }
    }
}

impl BadiConfig {
    /// Rejects settings that cannot produce a consistent calendar.
    ///
    /// # Errors
    /// Returns `ChronoError::InvalidConfig` describing the first problem.
    pub fn validate(&self) -> Result<(), ChronoError> {
        // UTC-14:00..=UTC+14:00
        if self.utc_offset_seconds.abs() > 14 * 3600 {
            return Err(ChronoError::InvalidConfig(format!(
                "utc offset {}s exceeds 14 hours",
                self.utc_offset_seconds
            )));
        }
        let (month, day) = self.civil_new_year;
        // February would let the leap day move the civil new year
        if !(MARCH..=4).contains(&month) || day == 0 || day > days_in_month(2001, month) {
            return Err(ChronoError::InvalidConfig(format!(
                "civil new year {month:02}-{day:02} must be a day in March or April"
            )));
        }
        Ok(())
    }
}

/// 2015-03-21, the first new year fixed by the equinox in Tehran.
pub const DEFAULT_SWITCH_DATE: PlainDate = PlainDate::from_parts(2015, MARCH, 21);
