//! Extraction Integration Tests
//!
//! Ordering, verbatim fidelity, placeholder substitution and report
//! consistency over whole payloads.

use serde_json::json;
use timedtext::extract::{
    extract, find_placeholders, placeholder, ErrorKind, ExtractionError, Status,
};

/// Payload with a mix of text, missing utf8 fields and metadata-only events
fn mixed_payload() -> String {
    json!({
        "wireMagic": "pb3",
        "events": [
            {"tStartMs": 0, "dDurationMs": 5000, "id": 1, "wpWinPosId": 1},
            {"tStartMs": 0, "segs": [{"utf8": "We're"}, {"utf8": " no", "tOffsetMs": 240}, {"utf8": " strangers"}]},
            {"tStartMs": 1200, "segs": [{"utf8": "\n"}]},
            {"tStartMs": 1500, "segs": [{"utf8": "to"}, {"acAsrConf": 0}, {"utf8": " love"}]},
            {"tStartMs": 2000, "aAppend": 1},
            {"tStartMs": 2200, "segs": [{}, {}]}
        ]
    })
    .to_string()
}

#[test]
fn test_order_preservation() {
    let raw = r#"{"events":[{"segs":[{"utf8":"A"},{"utf8":"B"}]},{"segs":[{"utf8":"C"}]}]}"#;
    let out = extract(raw).unwrap();
    assert_eq!(out.transcript, "ABC");
}

#[test]
fn test_missing_field_substitution_position() {
    let raw = json!({
        "events": [
            {"segs": [{"utf8": "zero"}]},
            {"segs": [{"utf8": "one"}]},
            {"segs": [{"utf8": "[a]"}, {"tOffsetMs": 100}, {"utf8": "[b]"}]}
        ]
    })
    .to_string();

    let out = extract(&raw).unwrap();
    assert_eq!(
        out.transcript,
        "zeroone[a]⟦MISSING_UTF8 event=2 seg=1⟧[b]"
    );
    assert_eq!(out.report.num_missing_utf8, 1);
}

#[test]
fn test_mixed_payload_report() {
    let out = extract(&mixed_payload()).unwrap();
    let report = &out.report;

    assert_eq!(
        out.transcript,
        format!(
            "We're no strangers\nto{} love{}{}",
            placeholder(3, 1),
            placeholder(5, 0),
            placeholder(5, 1)
        )
    );

    assert_eq!(report.status, Status::Success);
    assert!(report.parsed_ok);
    assert_eq!(report.num_events, 6);
    assert_eq!(report.num_events_with_segs, 4);
    assert_eq!(report.num_no_segs_events, 2);
    assert_eq!(report.num_segs_extracted, 9);
    assert_eq!(report.num_missing_utf8, 3);
    assert_eq!(report.warnings, vec!["2 events had NO_SEGS (metadata-only)"]);
    assert_eq!(
        report.no_segs_log,
        vec![
            "event=0: NO_SEGS (no segs array)",
            "event=4: NO_SEGS (no segs array)"
        ]
    );
    assert_eq!(report.missing_utf8_log.len(), 3);
}

#[test]
fn test_count_invariants() {
    let out = extract(&mixed_payload()).unwrap();
    let report = &out.report;

    // Placeholders found by rescanning match the reported count
    let found = find_placeholders(&out.transcript);
    assert_eq!(found.len(), report.num_missing_utf8);
    assert_eq!(
        found.iter().map(|p| (p.event, p.seg)).collect::<Vec<_>>(),
        vec![(3, 1), (5, 0), (5, 1)]
    );

    assert_eq!(
        report.num_segs_extracted,
        report.num_missing_utf8 + report.num_text_segments()
    );
    assert_eq!(
        report.num_events_with_segs + report.num_no_segs_events,
        report.num_events
    );
}

#[test]
fn test_non_array_segs_stays_visible() {
    let raw = json!({
        "events": [
            {"segs": {"0": {"utf8": "lost?"}}},
            {"segs": null},
            {"segs": [{"utf8": "kept"}]}
        ]
    })
    .to_string();

    let out = extract(&raw).unwrap();
    let report = &out.report;

    assert_eq!(out.transcript, "kept");
    assert_eq!(report.num_events_with_segs, 2);
    assert_eq!(report.num_no_segs_events, 1);
    assert_eq!(report.num_non_array_segs, 1);
    assert_eq!(
        report.warnings,
        vec![
            "1 events had NO_SEGS (metadata-only)",
            "1 events had a segs field that is not an array"
        ]
    );
    assert_eq!(report.no_segs_log, vec!["event=1: NO_SEGS (no segs array)"]);
    assert_eq!(
        report.non_array_segs_log,
        vec!["event=0: segs is an object, not an array"]
    );
    assert_eq!(
        report.num_events_with_segs + report.num_no_segs_events,
        report.num_events
    );
}

#[test]
fn test_verbatim_fidelity() {
    let raw = json!({
        "events": [{"segs": [
            {"utf8": "  hello  "},
            {"utf8": "\t<b>tag</b> &amp; ünïcødé 🎵"},
            {"utf8": ""}
        ]}]
    })
    .to_string();

    let out = extract(&raw).unwrap();
    assert_eq!(out.transcript, "  hello  \t<b>tag</b> &amp; ünïcødé 🎵");
    assert_eq!(out.report.num_segs_extracted, 3);
}

#[test]
fn test_no_segs_event_contributes_nothing() {
    let with = extract(r#"{"events":[{"segs":[{"utf8":"x"}]},{"id":7}]}"#).unwrap();
    let without = extract(r#"{"events":[{"segs":[{"utf8":"x"}]}]}"#).unwrap();

    assert_eq!(with.transcript, without.transcript);
    assert_eq!(with.report.num_segs_extracted, without.report.num_segs_extracted);
    assert_eq!(with.report.num_events_with_segs, 1);
    assert_eq!(with.report.num_no_segs_events, 1);
}

#[test]
fn test_empty_but_valid() {
    let out = extract(r#"{"events": []}"#).unwrap();

    assert_eq!(out.transcript, "");
    assert_eq!(out.report.status, Status::Success);
    assert_eq!(out.report.num_events, 0);
    assert_eq!(out.report.num_events_with_segs, 0);
    assert_eq!(out.report.num_segs_extracted, 0);
    assert_eq!(out.report.num_missing_utf8, 0);
    assert_eq!(out.report.warnings, vec!["none"]);
    assert_eq!(out.report.missing_utf8_log, vec!["None"]);
    assert_eq!(out.report.no_segs_log, vec!["None"]);
}

#[test]
fn test_fatal_on_bad_json() {
    let err = extract("{not valid").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ParseFailed);
    assert!(matches!(err, ExtractionError::ParseFailed(_)));
    assert!(err.to_string().starts_with("JSON_PARSE_FAILED: "));

    let report = err.failure_report("captured_from_network");
    assert!(!report.parsed_ok);
    assert_eq!(report.status, Status::JsonParseFailed);
    assert!(report.json_error.is_some());
}

#[test]
fn test_fatal_on_schema_mismatch() {
    for raw in [r#"{"foo": 1}"#, r#"{"events": {"0": {}}}"#, r#"{"events": null}"#, "[]", "42"] {
        let err = extract(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingEventsArray, "payload: {}", raw);

        let report = err.failure_report("x");
        assert!(report.parsed_ok);
        assert_eq!(report.status, Status::NoEventsArray);
    }
}

#[test]
fn test_deterministic() {
    let raw = mixed_payload();
    let a = extract(&raw).unwrap();
    let b = extract(&raw).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.report.transcript_sha256, b.report.transcript_sha256);
}

#[test]
fn test_concurrent_calls() {
    let raw = mixed_payload();
    let expected = extract(&raw).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| extract(&raw).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
