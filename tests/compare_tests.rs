use api_sentinel::compare::compare;
use api_sentinel::model::{ApiMetadata, ScanResult, Severity, Vulnerability};

fn result_with(ids: &[&str], score: Option<u8>) -> ScanResult {
    ScanResult {
        config_id: "cfg".to_string(),
        timestamp_ms: 0,
        vulnerabilities: ids
            .iter()
            .map(|id| Vulnerability::new(id, "Test", "finding", Severity::Medium, "fix it"))
            .collect(),
        score,
        metadata: ApiMetadata {
            response_time_ms: 5,
            status_code: 200,
            server: None,
        },
    }
}

#[test]
fn identical_results_diff_to_nothing() {
    let result = result_with(&["HTTPS-001", "CORS-001"], Some(40));
    let diff = compare(&result, &result);
    assert!(diff.new_findings.is_empty());
    assert!(diff.resolved_findings.is_empty());
    assert_eq!(diff.score_delta, Some(0));
}

#[test]
fn new_and_resolved_findings_are_split_by_id() {
    let before = result_with(&["HTTPS-001", "CORS-001"], Some(40));
    let after = result_with(&["CORS-001", "SERVER-001", "RATELIMIT-001"], Some(30));

    let diff = compare(&before, &after);

    let new_ids: Vec<&str> = diff.new_findings.iter().map(|v| v.id.as_str()).collect();
    let resolved_ids: Vec<&str> = diff.resolved_findings.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(new_ids, vec!["SERVER-001", "RATELIMIT-001"]);
    assert_eq!(resolved_ids, vec!["HTTPS-001"]);
    assert_eq!(diff.score_delta, Some(-10));
}

#[test]
fn undefined_score_on_either_side_gives_no_delta() {
    let clean = result_with(&[], None);
    let dirty = result_with(&["CORS-001"], Some(50));

    assert_eq!(compare(&clean, &dirty).score_delta, None);
    assert_eq!(compare(&dirty, &clean).score_delta, None);

    // The finding sets still diff normally.
    let diff = compare(&clean, &dirty);
    assert_eq!(diff.new_findings.len(), 1);
    assert!(diff.resolved_findings.is_empty());
}

#[test]
fn results_from_different_configs_still_compare() {
    let mut before = result_with(&["HTTPS-001"], Some(25));
    before.config_id = "other".to_string();
    let after = result_with(&["HTTPS-001"], Some(25));

    let diff = compare(&before, &after);
    assert!(diff.new_findings.is_empty());
    assert_eq!(diff.score_delta, Some(0));
}
