//! Application constants for YUMA almanac tools
//!
//! This module contains the almanac format markers, field labels, default
//! values and naming conventions used throughout the crate.

// =============================================================================
// Almanac Format Markers
// =============================================================================

/// Prefix of a week header line, e.g. `******** Week 268 almanac for PRN-01 ********`
pub const WEEK_HEADER_PREFIX: &str = "******** Week";

/// Pattern used to pull the week number out of a header line
pub const WEEK_NUMBER_PATTERN: &str = r"Week\s+(\d+)";

/// Label that starts a new satellite record
pub const RECORD_START_LABEL: &str = "ID:";

/// Separator between a field label and its value
pub const FIELD_SEPARATOR: char = ':';

/// Fortran double precision exponent marker and its standard replacement
pub const FORTRAN_EXPONENT: &str = "D";
pub const STANDARD_EXPONENT: &str = "E";

// =============================================================================
// Field Labels
// =============================================================================

/// Field labels exactly as they appear in YUMA files (case-sensitive)
pub mod labels {
    pub const HEALTH: &str = "Health:";
    pub const ECCENTRICITY: &str = "Eccentricity:";
    pub const TIME_OF_APPLICABILITY: &str = "Time of Applicability(s):";
    pub const ORBITAL_INCLINATION: &str = "Orbital Inclination(rad):";
    pub const RATE_OF_RIGHT_ASCEN: &str = "Rate of Right Ascen(r/s):";
    pub const SQRT_A: &str = "SQRT(A)  (m 1/2):";
    pub const RIGHT_ASCEN_AT_WEEK: &str = "Right Ascen at Week(rad):";
    pub const ARGUMENT_OF_PERIGEE: &str = "Argument of Perigee(rad):";
    pub const MEAN_ANOM: &str = "Mean Anom(rad):";
    pub const AF0: &str = "Af0(s):";
    pub const AF1: &str = "Af1(s/s):";
}

// =============================================================================
// Table Columns
// =============================================================================

pub mod columns {
    pub const PRN: &str = "PRN";
    pub const WEEK: &str = "Week";
    pub const TIME: &str = "Time";
    pub const HEALTH: &str = "Health";
    pub const ECCENTRICITY: &str = "Eccentricity";
    pub const TIME_OF_APPLICABILITY: &str = "TimeOfApplicability";
    pub const ORBITAL_INCLINATION: &str = "OrbitalInclination";
    pub const RATE_OF_RIGHT_ASCEN: &str = "RateOfRightAscen";
    pub const SQRT_A: &str = "SQRTA";
    pub const RIGHT_ASCEN_AT_WEEK: &str = "RightAscenAtWeek";
    pub const ARGUMENT_OF_PERIGEE: &str = "ArgumentOfPerigee";
    pub const MEAN_ANOM: &str = "MeanAnom";
    pub const AF0: &str = "Af0";
    pub const AF1: &str = "Af1";
}

// =============================================================================
// Reading and Display Defaults
// =============================================================================

/// Pattern for an ISO calendar date embedded in a source filename
pub const FILENAME_DATE_PATTERN: &str = r"(\d{4})-(\d{2})-(\d{2})";

/// Default strftime format applied to the Time column after reading
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d";

/// Decimal places used when displaying float columns without an explicit precision
pub const DEFAULT_DISPLAY_PRECISION: usize = 16;

/// Largest display precision accepted from configuration
pub const MAX_DISPLAY_PRECISION: usize = 17;

/// File extensions picked up when scanning a directory for almanacs
pub const ALMANAC_EXTENSIONS: &[&str] = &["alm", "txt"];

// =============================================================================
// Fetching
// =============================================================================

/// NAVCEN almanac archive root; files live under `{year}/Yuma/{doy}.alm`
pub const NAVCEN_ALMANAC_BASE_URL: &str = "https://navcen.uscg.gov/sites/default/files/gps/almanac";

/// Local cache filename prefix; the ISO date follows so readers can infer the epoch
pub const ALMANAC_FILENAME_PREFIX: &str = "yumaAlmanac_";

/// Extension of cached almanac files
pub const ALMANAC_FILE_EXTENSION: &str = "alm";

/// HTTP status treated as a successful download
pub const HTTP_OK: u16 = 200;

/// Configuration directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "yuma-tools";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";
