//! Test utilities for almanac parser testing
//!
//! This module provides almanac fixtures and helper functions used across
//! the parser test modules.

use chrono::{DateTime, TimeZone, Utc};
use std::io::Write;
use tempfile::NamedTempFile;

mod parser_tests;

/// Fixed epoch used by parser tests
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
}

/// Helper to create a three satellite almanac under one week header each
pub fn create_test_almanac() -> String {
    r#"******** Week 268 almanac for PRN-01 ********
ID:                         01
Health:                     000
Eccentricity:               0.1234567D-01
Time of Applicability(s):  405504.0000
Orbital Inclination(rad):   0.9885643017
Rate of Right Ascen(r/s):  -0.7783181535E-008
SQRT(A)  (m 1/2):           5153.622070
Right Ascen at Week(rad):  -0.1539597839E+001
Argument of Perigee(rad):   0.917218982
Mean Anom(rad):             0.2787285564E+001
Af0(s):                    -0.1144409180E-004
Af1(s/s):                   0.0000000000E+000
week:                        268

******** Week 268 almanac for PRN-02 ********
ID:                         02
Health:                     000
Eccentricity:               0.1936483383E-001
Time of Applicability(s):  405504.0000
Orbital Inclination(rad):   0.9645264447
Rate of Right Ascen(r/s):  -0.7634611836E-008
SQRT(A)  (m 1/2):           5153.569336
Right Ascen at Week(rad):   0.2567381263E+001
Argument of Perigee(rad):  -1.129082465
Mean Anom(rad):            -0.2512536891E+001
Af0(s):                    -0.4482269287E-003
Af1(s/s):                  -0.3637978807E-011
week:                        268

******** Week 269 almanac for PRN-03 ********
ID:                         03
Health:                     063
Eccentricity:               0.4432201385E-002
Time of Applicability(s):  405504.0000
Orbital Inclination(rad):   0.9768742253
Rate of Right Ascen(r/s):  -0.7806039249E-008
SQRT(A)  (m 1/2):           5153.667969
Right Ascen at Week(rad):  -0.4990541339E+000
Argument of Perigee(rad):   0.858706832
Mean Anom(rad):             0.1106462479E+001
Af0(s):                     0.4806518555E-003
Af1(s/s):                  -0.7275957614E-011
week:                        269
"#
    .to_string()
}

/// Helper to create an almanac whose every ID line is unparsable
pub fn create_almanac_without_prns() -> String {
    r#"******** Week 268 almanac for PRN-?? ********
ID:                         XX
Health:                     000
Eccentricity:               0.1936483383E-001
ID:                         ??
Health:                     000
"#
    .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
