use chrono::NaiveDate;

use farely::nlq::{extract, parse_loose_date, DEFAULT_DESTINATION, DEFAULT_ORIGIN};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn full_query_extracts_all_fields() {
    let today = day(2026, 1, 10);
    let details = extract(
        "Find the cheapest flight from Chicago to Miami on 2026-05-15",
        today,
    );
    assert_eq!(details.origin, "Chicago");
    assert_eq!(details.destination, "Miami");
    assert_eq!(details.date, day(2026, 5, 15));
    assert!(!details.origin_assumed);
    assert!(!details.destination_assumed);
    assert!(!details.date_assumed);
}

#[test]
fn multi_word_cities() {
    let details = extract("flight from New York to San Francisco", day(2026, 1, 10));
    assert_eq!(details.origin, "New York");
    assert_eq!(details.destination, "San Francisco");
}

#[test]
fn missing_origin_defaults_and_flags() {
    let details = extract("flight to Paris", day(2026, 1, 10));
    assert_eq!(details.origin, DEFAULT_ORIGIN);
    assert!(details.origin_assumed);
    assert_eq!(details.destination, "Paris");
    assert!(!details.destination_assumed);
}

#[test]
fn missing_everything_defaults_to_tomorrow() {
    let today = day(2026, 1, 10);
    let details = extract("hello there", today);
    assert_eq!(details.origin, DEFAULT_ORIGIN);
    assert_eq!(details.destination, DEFAULT_DESTINATION);
    assert_eq!(details.date, day(2026, 1, 11));
    assert!(details.origin_assumed);
    assert!(details.destination_assumed);
    assert!(details.date_assumed);
}

#[test]
fn unparseable_date_defaults_to_tomorrow_and_flags() {
    let today = day(2026, 1, 10);
    let details = extract("from Chicago to Miami on someday soon", today);
    assert_eq!(details.date, day(2026, 1, 11));
    assert!(details.date_assumed);
    // Place fields are unaffected.
    assert_eq!(details.origin, "Chicago");
    assert!(!details.origin_assumed);
}

#[test]
fn keywords_match_case_insensitively() {
    let details = extract("FROM chicago TO miami", day(2026, 1, 10));
    assert_eq!(details.origin, "chicago");
    assert_eq!(details.destination, "miami");
}

#[test]
fn trailing_punctuation_is_stripped() {
    let details = extract("I need a flight to Miami.", day(2026, 1, 10));
    assert_eq!(details.destination, "Miami");
}

#[test]
fn to_after_from_clause_wins() {
    // "want to fly" must not be mistaken for the destination.
    let details = extract("I want to fly from Chicago to Miami", day(2026, 1, 10));
    assert_eq!(details.origin, "Chicago");
    assert_eq!(details.destination, "Miami");
}

#[test]
fn destination_phrased_before_origin() {
    let details = extract("to Miami from Chicago", day(2026, 1, 10));
    assert_eq!(details.origin, "Chicago");
    assert_eq!(details.destination, "Miami");
    assert!(!details.origin_assumed);
    assert!(!details.destination_assumed);
}

#[test]
fn destination_before_from_skips_filler_to() {
    let details = extract("I want to fly to Miami from Chicago", day(2026, 1, 10));
    assert_eq!(details.origin, "Chicago");
    assert_eq!(details.destination, "Miami");
}

#[test]
fn loose_date_iso() {
    let today = day(2026, 1, 10);
    assert_eq!(
        parse_loose_date("2026-05-15", today),
        Some(day(2026, 5, 15))
    );
}

#[test]
fn loose_date_month_name_with_year() {
    let today = day(2026, 1, 10);
    assert_eq!(
        parse_loose_date("May 15 2026", today),
        Some(day(2026, 5, 15))
    );
    assert_eq!(
        parse_loose_date("15 May 2026", today),
        Some(day(2026, 5, 15))
    );
}

#[test]
fn loose_date_without_year_assumes_upcoming() {
    // Later this year: stays in the current year.
    assert_eq!(
        parse_loose_date("May 15", day(2026, 1, 10)),
        Some(day(2026, 5, 15))
    );
    // Already past: rolls to next year.
    assert_eq!(
        parse_loose_date("May 15", day(2026, 6, 1)),
        Some(day(2027, 5, 15))
    );
}

#[test]
fn loose_date_rejects_garbage() {
    let today = day(2026, 1, 10);
    assert_eq!(parse_loose_date("someday soon", today), None);
    assert_eq!(parse_loose_date("", today), None);
}

#[test]
fn date_with_comma() {
    let today = day(2026, 1, 10);
    let details = extract("from Chicago to Miami on May 15, 2026", today);
    assert_eq!(details.date, day(2026, 5, 15));
    assert!(!details.date_assumed);
}
