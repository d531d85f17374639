//! Solar events needed to place the Badi new year.
//!
//! Years with a published Naw-Ruz date never reach this model; it extends
//! the calendar before and after that range.
//!
//! The vernal equinox follows Meeus, *Astronomical Algorithms*, chapter 27,
//! corrected from dynamical time to universal time with a polynomial ΔT.
//! Sunset follows the NOAA solar position spreadsheet.

use serde::{Deserialize, Serialize};

use crate::consts::SECONDS_PER_DAY;
use crate::error::ChronoError;

/// Julian day number of 1970-01-01T00:00Z.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian day of J2000.0.
const J2000: f64 = 2_451_545.0;

const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Apparent solar depression at sunset: refraction plus the solar radius.
const SUNSET_ZENITH: f64 = 90.833;

/// Periodic terms (A, B, C) of the equinox correction.
const EQUINOX_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96, 1_934.136),
    (203.0, 337.23, 32_964.467),
    (199.0, 342.08, 20.186),
    (182.0, 27.85, 445_267.112),
    (156.0, 73.14, 45_036.886),
    (136.0, 171.52, 22_518.443),
    (77.0, 222.54, 65_928.934),
    (74.0, 296.72, 3_034.906),
    (70.0, 243.58, 9_037.513),
    (58.0, 119.81, 33_718.147),
    (52.0, 297.17, 150.678),
    (50.0, 21.02, 2_281.232),
    (45.0, 247.54, 29_929.562),
    (44.0, 325.15, 31_555.956),
    (29.0, 60.93, 4_443.417),
    (18.0, 155.12, 67_555.328),
    (17.0, 288.79, 4_562.452),
    (16.0, 198.04, 62_894.029),
    (14.0, 199.76, 31_436.921),
    (12.0, 95.39, 14_577.848),
    (12.0, 287.11, 31_931.756),
    (12.0, 320.81, 34_777.259),
    (9.0, 227.73, 1_222.114),
    (8.0, 15.45, 16_859.074),
];

/// Geographic position in degrees, north and east positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    latitude:  f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    latitude:  f64,
    longitude: f64,
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = ChronoError;

    fn try_from(raw: RawGeoLocation) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoLocation {
    /// Tehran, 35°42'N 51°25'E.
    pub const TEHRAN: Self = Self {
        latitude:  35.0 + 42.0 / 60.0,
        longitude: 51.0 + 25.0 / 60.0,
    };

    /// # Errors
    /// Returns `ChronoError::InvalidConfig` for coordinates off the globe.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ChronoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ChronoError::InvalidConfig(format!("latitude {latitude} outside -90..=90")));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ChronoError::InvalidConfig(format!("longitude {longitude} outside -180..=180")));
        }
        Ok(Self { latitude, longitude })
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self::TEHRAN
    }
}

/// Source of the solar events the Badi year boundary depends on.
pub trait SolarCalculator: Send + Sync {
    /// Instant of the March equinox of a Gregorian year, in Unix seconds (UT).
    fn march_equinox(&self, year: i32) -> f64;

    /// Instant of sunset on the local civil day `epoch_day` at `location`, in
    /// Unix seconds. `None` if the sun does not set that day.
    fn sunset(&self, epoch_day: i64, location: &GeoLocation) -> Option<f64>;
}

/// Meeus equinox and NOAA sunset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdSolarCalculator;

impl SolarCalculator for StdSolarCalculator {
    fn march_equinox(&self, year: i32) -> f64 {
        let jde = march_equinox_jde(year);
        let jd = jde - delta_t(f64::from(year) + 0.2) / SECONDS_PER_DAY as f64;
        (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY as f64
    }

    fn sunset(&self, epoch_day: i64, location: &GeoLocation) -> Option<f64> {
        let midnight_jd = epoch_day as f64 + UNIX_EPOCH_JD;
        // first pass at local apparent noon, second pass at the estimate
        let noon = 720.0 - 4.0 * location.longitude;
        let estimate = sunset_minutes(midnight_jd + noon / 1440.0, location)?;
        let minutes = sunset_minutes(midnight_jd + estimate / 1440.0, location)?;
        Some(epoch_day as f64 * SECONDS_PER_DAY as f64 + minutes * 60.0)
    }
}

/// Julian ephemeris day of the March equinox, valid for years 1000..=3000.
fn march_equinox_jde(year: i32) -> f64 {
    let y = (f64::from(year) - 2000.0) / 1000.0;
    let jde0 = 2_451_623.809_84 + 365_242.374_04 * y + 0.051_69 * y.powi(2)
        - 0.004_11 * y.powi(3)
        - 0.000_57 * y.powi(4);

    let t = (jde0 - J2000) / DAYS_PER_JULIAN_CENTURY;
    let w = (35_999.373 * t - 2.47).to_radians();
    let delta_lambda = 1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos();
    let s: f64 = EQUINOX_TERMS
        .iter()
        .map(|&(a, b, c)| a * (b + c * t).to_radians().cos())
        .sum();

    jde0 + 0.000_01 * s / delta_lambda
}

/// ΔT = TT − UT in seconds for a decimal year.
fn delta_t(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    let long_term = -20.0 + 32.0 * u * u;
    if (2005.0..2050.0).contains(&year) {
        let t = year - 2000.0;
        62.92 + 0.322_17 * t + 0.005_589 * t * t
    } else if (2050.0..2150.0).contains(&year) {
        long_term - 0.5628 * (2150.0 - year)
    } else {
        long_term
    }
}

/// Sunset in minutes after 00:00 UT of the day containing `jd`.
fn sunset_minutes(jd: f64, location: &GeoLocation) -> Option<f64> {
    let (declination, equation_of_time) = solar_position(jd);
    let latitude = location.latitude.to_radians();
    let declination = declination.to_radians();

    let cos_hour_angle = SUNSET_ZENITH.to_radians().cos() / (latitude.cos() * declination.cos())
        - latitude.tan() * declination.tan();
    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        return None;
    }
    let hour_angle = cos_hour_angle.acos().to_degrees();

    Some(720.0 - 4.0 * location.longitude - equation_of_time + 4.0 * hour_angle)
}

/// Solar declination in degrees and equation of time in minutes.
fn solar_position(jd: f64) -> (f64, f64) {
    let t = (jd - J2000) / DAYS_PER_JULIAN_CENTURY;

    let mean_long = (280.466_46 + t * (36_000.769_83 + t * 0.000_303_2)).rem_euclid(360.0);
    let mean_anom = 357.529_11 + t * (35_999.050_29 - 0.000_153_7 * t);
    let eccentricity = 0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t);

    let m = mean_anom.to_radians();
    let center = m.sin() * (1.914_602 - t * (0.004_817 + 0.000_014 * t))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * t)
        + (3.0 * m).sin() * 0.000_289;
    let omega = (125.04 - 1_934.136 * t).to_radians();
    let apparent_long = (mean_long + center - 0.005_69 - 0.004_78 * omega.sin()).to_radians();

    let seconds = 21.448 - t * (46.815 + t * (0.000_59 - t * 0.001_813));
    let mean_obliquity = 23.0 + (26.0 + seconds / 60.0) / 60.0;
    let obliquity = (mean_obliquity + 0.002_56 * omega.cos()).to_radians();

    let declination = (obliquity.sin() * apparent_long.sin()).asin().to_degrees();

    let y = (obliquity / 2.0).tan().powi(2);
    let l0 = mean_long.to_radians();
    let equation_of_time = 4.0
        * (y * (2.0 * l0).sin() - 2.0 * eccentricity * m.sin()
            + 4.0 * eccentricity * y * m.sin() * (2.0 * l0).cos()
            - 0.5 * y * y * (4.0 * l0).sin()
            - 1.25 * eccentricity * eccentricity * (2.0 * m).sin())
        .to_degrees();

    (declination, equation_of_time)
}
