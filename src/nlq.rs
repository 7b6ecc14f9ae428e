//! Best-effort keyword extraction over free-text flight queries.
//!
//! Understands the `from X`, `to Y`, `on DATE` shapes. Missing fields are
//! defaulted (New York, London, tomorrow) but every defaulted field is
//! flagged in the result, so callers disclose assumptions instead of
//! silently searching the wrong route.

use chrono::{Datelike, Duration, NaiveDate};

pub const DEFAULT_ORIGIN: &str = "New York";
pub const DEFAULT_DESTINATION: &str = "London";

#[derive(Debug, Clone)]
pub struct QueryDetails {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    /// True when the corresponding field was not found in the query (or, for
    /// the date, could not be parsed) and a default was substituted.
    pub origin_assumed: bool,
    pub destination_assumed: bool,
    pub date_assumed: bool,
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}

fn ends_sentence(word: &str) -> bool {
    word.ends_with('.') || word.ends_with('?') || word.ends_with('!')
}

/// Words following `key`, stopping at any of `stop_keys` or end of sentence.
/// With `alpha_only`, capture also stops at the first non-alphabetic word
/// (keeps place names from swallowing dates and numbers).
fn capture_after(words: &[&str], key: &str, stop_keys: &[&str], alpha_only: bool) -> Option<String> {
    let pos = words
        .iter()
        .position(|w| strip_punctuation(w).eq_ignore_ascii_case(key))?;

    let mut captured: Vec<&str> = Vec::new();
    for word in &words[pos + 1..] {
        if stop_keys
            .iter()
            .any(|k| strip_punctuation(word).eq_ignore_ascii_case(k))
        {
            break;
        }
        let cleaned = strip_punctuation(word);
        if cleaned.is_empty() {
            break;
        }
        if alpha_only && !cleaned.chars().all(|c| c.is_ascii_alphabetic()) {
            break;
        }
        captured.push(cleaned);
        if ends_sentence(word) {
            break;
        }
    }

    if captured.is_empty() {
        None
    } else {
        Some(captured.join(" "))
    }
}

/// Loose date parsing: ISO dates, "May 15 2026", "15 May", "May 15" (year
/// inferred, rolling forward when the day has already passed).
pub fn parse_loose_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    for fmt in ["%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }

    // No year given: assume this year, rolled forward if already past.
    let with_year = format!("{text} {}", today.year());
    for fmt in ["%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&with_year, fmt) {
            if date < today {
                return date.with_year(today.year() + 1);
            }
            return Some(date);
        }
    }

    None
}

pub fn extract(query: &str, today: NaiveDate) -> QueryDetails {
    let words: Vec<&str> = query.split_whitespace().collect();

    let from_pos = words
        .iter()
        .position(|w| strip_punctuation(w).eq_ignore_ascii_case("from"));

    let origin = capture_after(&words, "from", &["to", "on"], true);
    // Look for the destination after the "from" clause first, so phrasings
    // like "I want to fly from X to Y" don't capture the wrong "to". When
    // nothing follows, fall back to the last "to" before "from", which
    // handles "to Y from X" word order.
    let dest_start = from_pos.map(|p| p + 1).unwrap_or(0);
    let destination = capture_after(&words[dest_start..], "to", &["on", "from"], true).or_else(|| {
        let before = &words[..from_pos.unwrap_or(0)];
        let last_to = before
            .iter()
            .rposition(|w| strip_punctuation(w).eq_ignore_ascii_case("to"))?;
        capture_after(&before[last_to..], "to", &["on"], true)
    });
    let date_text = capture_after(&words, "on", &[], false);

    let parsed_date = date_text
        .as_deref()
        .and_then(|t| parse_loose_date(t, today));
    let date_assumed = parsed_date.is_none();
    let tomorrow = today + Duration::days(1);

    QueryDetails {
        origin_assumed: origin.is_none(),
        destination_assumed: destination.is_none(),
        origin: origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        destination: destination.unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
        date: parsed_date.unwrap_or(tomorrow),
        date_assumed,
    }
}
