/// Minimum valid Gregorian year (inclusive)
pub const MIN_YEAR: i32 = 1;

/// Maximum valid Gregorian year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for March
pub const MARCH: u8 = 3;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Days in one week
pub const DAYS_PER_WEEK: i64 = 7;
/// Seconds in one civil day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days in a Badi month (and months in a year, years in a vahid, vahids in a kull-i-shai)
pub const BADI_CYCLE: i32 = 19;
/// Ordinary months before the intercalary period
pub const BADI_MONTHS_BEFORE_AYYAM_I_HA: i32 = 18;
/// Years in one major cycle (kull-i-shai)
pub const YEARS_PER_KULL_I_SHAI: i32 = BADI_CYCLE * BADI_CYCLE;
/// Month slots in one major cycle, counting Ayyam-i-Ha as part of month 18
pub const MONTHS_PER_KULL_I_SHAI: i64 = (YEARS_PER_KULL_I_SHAI * BADI_CYCLE) as i64;
/// Highest supported major cycle
pub const MAX_KULL_I_SHAI: i32 = 3;
/// Highest supported proleptic year of the Bahai era
pub const MAX_YEAR_OF_ERA: i32 = MAX_KULL_I_SHAI * YEARS_PER_KULL_I_SHAI;
/// Gregorian year preceding the first Badi year (1 BE starts in 1844)
pub const BADI_EPOCH_OFFSET: i32 = 1843;
/// Days of Ayyam-i-Ha in a common year
pub const AYYAM_I_HA_DAYS: i32 = 4;
/// Days of Ayyam-i-Ha in a leap year
pub const AYYAM_I_HA_DAYS_LEAP: i32 = 5;
/// Day of year of the last day of month 18
pub const LAST_DAY_BEFORE_AYYAM_I_HA: i32 = BADI_MONTHS_BEFORE_AYYAM_I_HA * BADI_CYCLE;

/// Separator of the canonical Badi text form
pub const BADI_SEPARATOR: char = '-';
/// Prefix of the canonical Badi text form
pub const BADI_PREFIX: &str = "Bahai";
/// Division label of the canonical Badi text form for intercalary days
pub const AYYAM_I_HA_LABEL: &str = "Ayyam-i-Ha";
