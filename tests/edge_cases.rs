//! Edge case tests for chatlens
//!
//! These tests cover boundary conditions of real exports that regular
//! unit tests do not reach through the public pipeline.

use chatlens::core::stats::{averages, top_words};
use chatlens::parsing::logical_lines;
use chatlens::prelude::*;
use chrono::Timelike;

fn ingest(input: &str) -> Ingest {
    ingest_str(input, &AnalysisConfig::new()).unwrap()
}

fn bodies(ingest: &Ingest) -> Vec<&str> {
    ingest.store.all().map(MessageRecord::body).collect()
}

// =========================================================================
// Reference conversations
// =========================================================================

#[test]
fn test_hello_world_conversation() {
    let input = "[01/01/2024, 10:00:00] Alice: hello world\n[01/01/2024, 10:01:00] Bob: hello there\n";
    let config = AnalysisConfig::new().with_top_word_count(2);
    let ingest = ingest_str(input, &config).unwrap();
    let analysis = Analysis::compute(&ingest.store, &config).unwrap();

    assert_eq!(analysis.overall.total_messages, 2);
    assert_eq!(analysis.per_person.get("Alice").unwrap().messages, 1);
    assert_eq!(analysis.per_person.get("Bob").unwrap().messages, 1);

    let top: Vec<(&str, usize)> = analysis.top_words.iter().map(WordFrequency::as_pair).collect();
    assert_eq!(top, vec![("hello", 2), ("world", 1)]);
}

#[test]
fn test_tie_broken_by_first_appearance() {
    let input = "[01/01/2024, 10:00] A: zebra apple\n[01/01/2024, 10:01] B: apple zebra mango\n";
    let ingest = ingest(input);
    let top = top_words(&ingest.store, WordScope::Overall, 3, &AnalysisConfig::new()).unwrap();
    let words: Vec<&str> = top.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["zebra", "apple", "mango"]);
}

#[test]
fn test_embedded_blank_line_is_preserved() {
    let input = "[01/01/2024, 10:00:00] Alice: line one\n\nline three\n[01/01/2024, 10:01:00] Bob: ok\n";
    let ingest = ingest(input);
    assert_eq!(bodies(&ingest), vec!["line one\n\nline three", "ok"]);
    assert_eq!(ingest.store.all().next().unwrap().word_count(), 4);
}

#[test]
fn test_encryption_notice_is_system_event() {
    let input = "[01/01/2024, 10:00:00] Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them.\n\
                 [01/01/2024, 10:01:00] Alice: hi\n";
    let ingest = ingest(input);
    assert_eq!(ingest.report.system_events, 1);
    assert_eq!(ingest.report.skipped, 0);
    assert_eq!(ingest.store.len(), 1);
}

// =========================================================================
// Empty corpus
// =========================================================================

#[test]
fn test_empty_corpus_reports_but_refuses_derived_values() {
    let input = "[01/01/2024, 10:00:00] Messages to this group are now secured with end-to-end encryption.\n\
                 [31/02/2024, 10:01:00] Alice: no such day\n";
    let ingest = ingest(input);
    let config = AnalysisConfig::new();

    assert!(ingest.store.is_empty());
    assert_eq!(ingest.report.skipped, 1);
    assert_eq!(ingest.report.skipped_lines, vec![2]);
    assert_eq!(ingest.report.system_events, 1);

    assert!(
        top_words(&ingest.store, WordScope::Overall, 5, &config)
            .unwrap_err()
            .is_empty_corpus()
    );
    assert!(averages(&ingest.store).unwrap_err().is_empty_corpus());
    assert!(Analysis::compute(&ingest.store, &config).unwrap_err().is_empty_corpus());

    // raw counts stay available
    let aggregator = Aggregator::new(&ingest.store, &config);
    assert_eq!(aggregator.overall_stats().total_messages, 0);
    assert_eq!(aggregator.hourly_activity().total(), 0);
    assert!(aggregator.per_person_stats().is_empty());
}

#[test]
fn test_empty_and_headerless_input_is_malformed() {
    let config = AnalysisConfig::new();
    assert!(ingest_str("", &config).unwrap_err().is_malformed_input());
    assert!(ingest_str("\n\n", &config).unwrap_err().is_malformed_input());

    let err = ingest_str("hello there\n[01/01/2024, 10:00] A: x\n", &config).unwrap_err();
    assert!(err.is_malformed_input());
    assert!(err.to_string().contains("line 1"));
}

// =========================================================================
// Line endings and encoding
// =========================================================================

#[test]
fn test_line_ending_variants_agree() {
    let lf = "[01/01/2024, 10:00] A: one\ntwo\n[01/01/2024, 10:01] B: three\n";
    let crlf = lf.replace('\n', "\r\n");
    let cr = lf.replace('\n', "\r");

    let expected = bodies(&ingest(lf)).join("|");
    assert_eq!(bodies(&ingest(&crlf)).join("|"), expected);
    assert_eq!(bodies(&ingest(&cr)).join("|"), expected);
    assert_eq!(expected, "one\ntwo|three");
}

#[test]
fn test_bom_and_lrm_before_header() {
    let input = "\u{feff}[01/01/2024, 10:00] A: one\n\u{200e}[01/01/2024, 10:01] B: two\n";
    let ingest = ingest(input);
    assert_eq!(bodies(&ingest), vec!["one", "two"]);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let mut input = b"[01/01/2024, 10:00] A: caf".to_vec();
    input.push(0xe9);
    input.extend_from_slice(b" ok\n");
    let ingest = ingest_reader(input.as_slice(), &AnalysisConfig::new()).unwrap();
    assert_eq!(ingest.store.all().next().unwrap().body(), "caf\u{fffd} ok");
}

#[test]
fn test_no_trailing_newline() {
    let ingest = ingest("[01/01/2024, 10:00] A: one\n[01/01/2024, 10:01] B: last");
    assert_eq!(bodies(&ingest), vec!["one", "last"]);
}

// =========================================================================
// Headers and timestamps
// =========================================================================

#[test]
fn test_twelve_hour_times() {
    let input = "[1/5/24, 12:15 AM] A: midnight\n\
                 [1/5/24, 9:05\u{202f}AM] A: morning\n\
                 [1/5/24, 12:30 PM] A: noon\n\
                 [1/5/24, 11:59:59 PM] A: late\n";
    let config = AnalysisConfig::new().with_date_order(DateOrder::MonthFirst);
    let ingest = ingest_str(input, &config).unwrap();

    let hours: Vec<u32> = ingest.store.all().map(MessageRecord::hour).collect();
    assert_eq!(hours, vec![0, 9, 12, 23]);
    let last = ingest.store.all().last().unwrap().timestamp();
    assert_eq!((last.minute(), last.second()), (59, 59));
}

#[test]
fn test_dashed_two_digit_year() {
    let ingest = ingest("26.10.25, 20:40 - Bob: hi\n");
    let ts = ingest.store.all().next().unwrap().timestamp();
    assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2025-10-26 20:40");
}

#[test]
fn test_impossible_header_takes_its_continuation_lines() {
    let input = "[01/01/2024, 10:00] A: one\n\
                 [31/02/2024, 10:00] B: bad date\n\
                 still bad\n\
                 [01/01/2024, 10:01] A: two\n";
    let ingest = ingest(input);
    assert_eq!(bodies(&ingest), vec!["one", "two"]);
    assert_eq!(ingest.report.skipped_lines, vec![2]);
    assert_eq!(ingest.report.logical_lines, 3);
}

#[test]
fn test_date_in_body_is_not_a_header() {
    let input = "[01/01/2024, 10:00] A: we met on\n15/01/2024 at the station\n";
    assert_eq!(bodies(&ingest(input)), vec!["we met on\n15/01/2024 at the station"]);
}

// =========================================================================
// Senders, bodies and notices
// =========================================================================

#[test]
fn test_colon_in_body() {
    let ingest = ingest("[01/01/2024, 10:00] Alice: note: meet at 10:30\n");
    let record = ingest.store.all().next().unwrap();
    assert_eq!(record.sender(), "Alice");
    assert_eq!(record.body(), "note: meet at 10:30");
}

#[test]
fn test_membership_notices() {
    let input = "[01/01/2024, 10:00] Alice changed the subject from \"plans: v1\" to \"plans\"\n\
                 [01/01/2024, 10:01] Alice added Bob\n\
                 [01/01/2024, 10:02] Bob left\n\
                 [01/01/2024, 10:03] Bob: \u{200e}Your security code with Alice changed.\n\
                 [01/01/2024, 10:04] Alice: welcome back\n";
    let ingest = ingest(input);
    assert_eq!(ingest.report.system_events, 4);
    assert_eq!(bodies(&ingest), vec!["welcome back"]);
}

#[test]
fn test_ordinary_messages_with_notice_words() {
    let input = "[01/01/2024, 10:00] Alice: hi all\n\
                 [01/01/2024, 10:01] Bob Left: running late\n\
                 [01/01/2024, 10:02] Added Value Ltd: invoice sent\n\
                 [01/01/2024, 10:03] Carol: This group was created to plan the trip\n\
                 [01/01/2024, 10:04] Dan: Your security code with the bank expired\n";
    let ingest = ingest(input);
    assert_eq!(ingest.report.messages, 5);
    assert_eq!(ingest.report.system_events, 0);

    let senders: Vec<&str> = ingest.store.all().map(MessageRecord::sender).collect();
    assert_eq!(senders, vec!["Alice", "Bob Left", "Added Value Ltd", "Carol", "Dan"]);
}

#[test]
fn test_unicode_senders_and_words() {
    let input = "[01/01/2024, 10:00] Иван: Привет мир\n\
                 [01/01/2024, 10:01] 田中: こんにちは\n\
                 [01/01/2024, 10:02] User 🎉: 🎉🔥\n";
    let config = AnalysisConfig::new();
    let ingest = ingest_str(input, &config).unwrap();
    let analysis = Analysis::compute(&ingest.store, &config).unwrap();

    assert_eq!(analysis.per_person.len(), 3);
    assert_eq!(analysis.per_person.get("Иван").unwrap().words, 2);
    assert_eq!(analysis.per_person.get("User 🎉").unwrap().words, 0);
    assert!(analysis.top_words.iter().any(|w| w.word == "привет"));
    assert!(analysis.top_words.iter().all(|w| !w.word.contains('🎉')));
}

#[test]
fn test_edited_marker_not_counted() {
    let ingest = ingest("[01/01/2024, 10:00] A: see you soon <This message was edited>\n");
    let record = ingest.store.all().next().unwrap();
    assert_eq!(record.word_count(), 3);
    assert!(record.body().ends_with("<This message was edited>"));
}

#[test]
fn test_case_and_punctuation_folding() {
    let input = "[01/01/2024, 10:00] A: Pizza! pizza? PIZZA...\n";
    let config = AnalysisConfig::new();
    let ingest = ingest_str(input, &config).unwrap();
    let top = top_words(&ingest.store, WordScope::Overall, 5, &config).unwrap();
    assert_eq!(top, vec![WordFrequency { word: "pizza".into(), count: 3 }]);
}

#[test]
fn test_contractions_are_stop_words() {
    let input = "[01/01/2024, 10:00] A: I'm sure it's fine, that's all\n\
                 [01/01/2024, 10:01] B: I\u{2019}m late, don't wait\n";
    let config = AnalysisConfig::new();
    let ingest = ingest_str(input, &config).unwrap();
    let top = top_words(&ingest.store, WordScope::Overall, 10, &config).unwrap();
    let words: Vec<&str> = top.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["sure", "fine", "late", "wait"]);
    assert_eq!(ingest.store.all().next().unwrap().word_count(), 6);
}

// =========================================================================
// Determinism
// =========================================================================

#[test]
fn test_parsing_is_idempotent() {
    let input = "[01/01/2024, 10:00] A: one\n[bad\n[01/01/2024, 10:01] B: two\nmore\n";
    let first = ingest(input);
    let second = ingest(input);
    assert_eq!(first.report, second.report);
    assert!(first.store.all().eq(second.store.all()));

    let parser = MessageParser::new(DateOrder::DayFirst).unwrap();
    for line in logical_lines(input).unwrap() {
        assert_eq!(parser.parse_line(&line).unwrap(), parser.parse_line(&line).unwrap());
    }
}

#[test]
fn test_single_message_averages() {
    let config = AnalysisConfig::new();
    let ingest = ingest_str("[01/01/2024, 10:00] A: one two\n", &config).unwrap();
    let avg = averages(&ingest.store).unwrap();
    assert_eq!(avg.span_days, 1);
    assert_eq!(avg.span_months, 1);
    assert!((avg.words_per_day - 2.0).abs() < f64::EPSILON);
}
