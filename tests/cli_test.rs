use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo_bin!("farely"))
}

#[test]
fn top_level_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Simulated flight search and travel assistant",
        ))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("mcp"))
        .stdout(predicate::str::contains("Examples:"))
        .stdout(predicate::str::contains("farely search -f JFK -t LAX"));
}

#[test]
fn top_level_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("farely 0.2.0"));
}

#[test]
fn search_help_shows_flags_and_defaults() {
    cmd()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-f, --from <IATA>"))
        .stdout(predicate::str::contains("-t, --to <IATA>"))
        .stdout(predicate::str::contains("-d, --date <YYYY-MM-DD>"))
        .stdout(predicate::str::contains("--return-date"))
        .stdout(predicate::str::contains("--direct"))
        .stdout(predicate::str::contains("--passengers <N>"))
        .stdout(predicate::str::contains("--seed <SEED>"))
        .stdout(predicate::str::contains("--latency <MS>"))
        .stdout(predicate::str::contains("--top <N>"))
        .stdout(predicate::str::contains("[default: one-way]"))
        .stdout(predicate::str::contains("[default: 1]"))
        .stdout(predicate::str::contains("[default: 800]"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn rejects_invalid_airport_code() {
    cmd()
        .args(["search", "-f", "J9K", "-t", "LAX", "--latency", "0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid airport code"));
}

#[test]
fn rejects_invalid_date() {
    cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "-d", "05/01/2026", "--latency", "0",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn rejects_round_trip_without_return_date() {
    cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "--trip", "round-trip", "--latency", "0",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("missing required search field"));
}

#[test]
fn rejects_zero_passengers() {
    cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "--passengers", "0", "--latency", "0",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("at least one passenger"));
}

#[test]
fn json_mode_emits_error_envelope() {
    cmd()
        .args([
            "search", "-f", "J9K", "-t", "LAX", "--json", "--latency", "0",
        ])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("\"kind\":\"invalid_airport\""));
}

#[test]
fn seeded_search_outputs_json_flights() {
    let output = cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "--seed", "7", "--latency", "0", "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let flights: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let arr = flights.as_array().unwrap();
    assert!((3..=7).contains(&arr.len()));
    for flight in arr {
        assert!(flight["airline"].is_string());
        assert!(flight["price"].as_u64().unwrap() > 0);
        assert_eq!(flight["departure_airport_code"], "JFK");
        assert_eq!(flight["arrival_airport_code"], "LAX");
    }
}

#[test]
fn seeded_search_is_reproducible() {
    let args = [
        "search", "-f", "JFK", "-t", "LAX", "--seed", "42", "--latency", "0", "--json",
    ];
    let first = cmd().args(args).assert().success();
    let second = cmd().args(args).assert().success();
    assert_eq!(first.get_output().stdout, second.get_output().stdout);
}

#[test]
fn direct_search_returns_only_nonstop() {
    let output = cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "--direct", "--seed", "3", "--latency", "0",
            "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let flights: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    for flight in flights.as_array().unwrap() {
        assert_eq!(flight["stops"], 0);
    }
}

#[test]
fn top_limits_results_to_cheapest() {
    let output = cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "--seed", "7", "--latency", "0", "--json",
            "--top", "2",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let flights: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let arr = flights.as_array().unwrap();
    assert!(arr.len() <= 2);
    if arr.len() == 2 {
        assert!(arr[0]["price"].as_u64() <= arr[1]["price"].as_u64());
    }
}

#[test]
fn compact_output_is_one_line_per_flight() {
    let output = cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "--seed", "7", "--latency", "0", "--compact",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert!((3..=7).contains(&lines.len()));
    for line in lines {
        assert!(line.contains('|'), "bad compact line: {line}");
        assert!(line.contains("JFK>LAX"));
    }
}

#[test]
fn table_output_renders_headers() {
    cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "--seed", "7", "--latency", "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Airline"))
        .stdout(predicate::str::contains("Duration"))
        .stdout(predicate::str::contains("Price"));
}

#[test]
fn ask_answers_natural_language_query() {
    cmd()
        .args([
            "ask",
            "find the cheapest flight from Chicago to Miami on 2026-05-15",
            "--seed",
            "7",
            "--latency",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("I found"))
        .stdout(predicate::str::contains("from Chicago to Miami"));
}

#[test]
fn ask_disclosed_assumptions_for_vague_query() {
    cmd()
        .args(["ask", "any flights?", "--seed", "7", "--latency", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I assumed"));
}

#[test]
fn ask_json_output_has_flights_and_message() {
    let output = cmd()
        .args([
            "ask",
            "flight from New York to London",
            "--seed",
            "7",
            "--latency",
            "0",
            "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let reply: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(reply["message"].is_string());
    assert!(!reply["flights"].as_array().unwrap().is_empty());
}

#[test]
fn chat_quits_cleanly() {
    cmd()
        .args(["chat", "--latency", "0"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel assistant ready."));
}

#[test]
fn chat_runs_search_and_booking_flow() {
    let input = "\
flight from Chicago to Miami on 2026-05-15
book 1
Jane Doe
jane@example.com
4111 1111 1111 1111
quit
";
    cmd()
        .args(["chat", "--latency", "0", "--seed", "7"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("I found"))
        .stdout(predicate::str::contains("full name"))
        .stdout(predicate::str::contains("email"))
        .stdout(predicate::str::contains("card"))
        .stdout(predicate::str::contains("Your booking is confirmed!"))
        .stdout(predicate::str::contains("Reference "));
}

#[test]
fn chat_rejects_book_without_results() {
    cmd()
        .args(["chat", "--latency", "0"])
        .write_stdin("book 1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search first"));
}
