//! Tests for the almanac line scan and structural validation

use super::*;
use crate::app::models::{AlmanacTime, Column, TableIndex};
use crate::app::services::almanac_parser::{AlmanacParser, ParseOptions, parse_almanac};
use crate::Error;

fn lenient() -> AlmanacParser {
    AlmanacParser::new(ParseOptions::strict(false))
}

fn strict() -> AlmanacParser {
    AlmanacParser::new(ParseOptions::strict(true))
}

#[test]
fn test_record_count_matches_id_lines() {
    let content = create_test_almanac();
    let id_lines = content.lines().filter(|l| l.starts_with("ID:")).count();

    let table = strict().parse_str(&content, Some(test_epoch())).unwrap();

    assert_eq!(table.len(), id_lines);
    assert_eq!(table.stats().records, 3);
    assert_eq!(table.index(), TableIndex::Positional);
}

#[test]
fn test_records_keep_file_order_and_values() {
    let table = strict()
        .parse_str(&create_test_almanac(), Some(test_epoch()))
        .unwrap();

    let prns: Vec<_> = table.iter().map(|r| r.prn).collect();
    assert_eq!(prns, vec![Some(1), Some(2), Some(3)]);

    let first = &table.records()[0];
    assert_eq!(first.health, Some(0));
    assert_eq!(first.eccentricity, Some(0.01234567));
    assert_eq!(first.time_of_applicability, Some(405504.0));
    assert_eq!(first.rate_of_right_ascen, Some(-0.7783181535E-008));
    assert_eq!(first.sqrt_a, Some(5153.622070));
    assert_eq!(first.af1, Some(0.0));

    let third = &table.records()[2];
    assert_eq!(third.health, Some(63));
    assert_eq!(third.argument_of_perigee, Some(0.858706832));
}

#[test]
fn test_week_header_applies_to_later_records_only() {
    let table = strict()
        .parse_str(&create_test_almanac(), Some(test_epoch()))
        .unwrap();

    let weeks: Vec<_> = table.iter().map(|r| r.week).collect();
    assert_eq!(weeks, vec![Some(268), Some(268), Some(269)]);
    assert_eq!(table.stats().week_headers, 3);
}

#[test]
fn test_week_is_null_before_any_header() {
    let content = "ID: 05\nHealth: 000\n******** Week 900 ********\nID: 06\n";
    let table = lenient().parse_str(content, Some(test_epoch())).unwrap();

    assert_eq!(table.records()[0].week, None);
    assert_eq!(table.records()[1].week, Some(900));
}

#[test]
fn test_malformed_week_header_keeps_previous_week() {
    let content = "******** Week 268 ********\nID: 01\n******** Week ??? ********\nID: 02\n";
    let table = strict().parse_str(content, Some(test_epoch())).unwrap();

    assert_eq!(table.records()[1].week, Some(268));
    assert_eq!(table.stats().malformed_fields, 1);
}

#[test]
fn test_every_record_shares_the_epoch() {
    let table = strict()
        .parse_str(&create_test_almanac(), Some(test_epoch()))
        .unwrap();

    assert!(
        table
            .iter()
            .all(|r| r.time == Some(AlmanacTime::Timestamp(test_epoch())))
    );
}

#[test]
fn test_bad_prn_keeps_other_fields() {
    let content = "******** Week 268 ********\nID: 1x\nHealth: 000\nEccentricity: 0.5D-02\nID: 02\n";
    let table = strict().parse_str(content, Some(test_epoch())).unwrap();

    let first = &table.records()[0];
    assert_eq!(first.prn, None);
    assert_eq!(first.health, Some(0));
    assert_eq!(first.eccentricity, Some(0.005));
    assert_eq!(first.week, Some(268));
    assert_eq!(table.stats().warnings.len(), 1);
    assert!(table.stats().warnings[0].contains("PRN"));
}

#[test]
fn test_malformed_field_becomes_null() {
    let content = "ID: 01\nHealth: bad\nMean Anom(rad): 0.1D+01\nAf0(s): not-a-number\n";
    let table = lenient().parse_str(content, Some(test_epoch())).unwrap();

    let record = &table.records()[0];
    assert_eq!(record.health, None);
    assert_eq!(record.mean_anom, Some(1.0));
    assert_eq!(record.af0, None);
    assert_eq!(table.stats().malformed_fields, 2);
    assert!(!table.stats().is_clean());
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    let content = "ID: 01\nweek: 268\nSomething New(x): 42\nHealth: 000\n";
    let table = lenient().parse_str(content, Some(test_epoch())).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].health, Some(0));
    assert_eq!(table.stats().unrecognized_lines, 2);
    assert!(table.stats().is_clean());
}

#[test]
fn test_blank_and_indented_lines() {
    let content = "\n\n   ID: 07   \n\t Health: 000\n\n";
    let table = lenient().parse_str(content, Some(test_epoch())).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].prn, Some(7));
    assert_eq!(table.stats().blank_lines, 3);
}

#[test]
fn test_fields_before_first_id_form_their_own_record() {
    let content = "Health: 000\nID: 01\nHealth: 063\n";
    let table = lenient().parse_str(content, Some(test_epoch())).unwrap();

    assert_eq!(table.len(), 2);
    let orphan = &table.records()[0];
    assert_eq!(orphan.prn, None);
    assert_eq!(orphan.week, None);
    assert_eq!(orphan.time, None);
    assert_eq!(orphan.health, Some(0));
    assert_eq!(table.records()[1].health, Some(63));
}

#[test]
fn test_empty_input_is_rejected_in_both_modes() {
    let no_lines: Vec<String> = Vec::new();

    assert!(matches!(
        strict().parse(&no_lines, Some(test_epoch())),
        Err(Error::EmptyInput)
    ));
    assert!(matches!(
        lenient().parse(&no_lines, Some(test_epoch())),
        Err(Error::EmptyInput)
    ));
    assert!(matches!(
        lenient().parse_str("", Some(test_epoch())),
        Err(Error::EmptyInput)
    ));
}

#[test]
fn test_no_records_is_rejected_in_both_modes() {
    let content = "\n******** Week 268 ********\nunrelated text\n";

    assert!(matches!(
        strict().parse_str(content, Some(test_epoch())),
        Err(Error::NoRecordsProduced)
    ));
    assert!(matches!(
        lenient().parse_str(content, Some(test_epoch())),
        Err(Error::NoRecordsProduced)
    ));
}

#[test]
fn test_strict_mode_rejects_all_null_prn() {
    let content = create_almanac_without_prns();

    match strict().parse_str(&content, Some(test_epoch())) {
        Err(Error::MissingRequiredFields { fields }) => assert_eq!(fields, vec!["PRN"]),
        other => panic!("expected MissingRequiredFields, got {:?}", other),
    }

    let table = lenient()
        .parse_str(&content, Some(test_epoch()))
        .unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.column_is_null(Column::Prn));
    assert_eq!(table.records()[0].eccentricity, Some(0.01936483383));
}

#[test]
fn test_strict_mode_without_epoch_reports_time() {
    let err = strict()
        .parse_str(&create_test_almanac(), None)
        .unwrap_err();

    match err {
        Error::MissingRequiredFields { fields } => assert_eq!(fields, vec!["Time"]),
        other => panic!("expected MissingRequiredFields, got {:?}", other),
    }
}

#[test]
fn test_strict_mode_missing_week_and_prn() {
    let content = "ID: ?\nHealth: 000\n";
    let err = parse_almanac(content.lines(), Some(test_epoch()), true).unwrap_err();

    match err {
        Error::MissingRequiredFields { fields } => assert_eq!(fields, vec!["PRN", "Week"]),
        other => panic!("expected MissingRequiredFields, got {:?}", other),
    }
}

#[test]
fn test_strict_mode_checks_columns_not_records() {
    // No record is complete, but every required column has at least one value
    let content = "ID: ?\nHealth: 000\n******** Week 268 ********\nID: 04\n";
    let table = strict().parse_str(content, Some(test_epoch())).unwrap();

    assert_eq!(table.records()[0].prn, None);
    assert_eq!(table.records()[0].week, None);
    assert_eq!(table.records()[1].prn, Some(4));
}

#[test]
fn test_reparse_is_idempotent() {
    let content = create_test_almanac();
    let parser = strict();

    let first = parser.parse_str(&content, Some(test_epoch())).unwrap();
    let second = parser.parse_str(&content, Some(test_epoch())).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_parse_lines_read_from_file() {
    let temp_file = create_temp_file(&create_test_almanac());
    let content = std::fs::read_to_string(temp_file.path()).unwrap();
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    let table = parse_almanac(&lines, Some(test_epoch()), true).unwrap();
    assert_eq!(table.len(), 3);
}
