use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{ScanResult, Vulnerability};

/// Delta between two scans: what appeared, what went away, and how the
/// score moved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanComparison {
    /// Findings present in `after` but not in `before` (matched by id).
    pub new_findings: Vec<Vulnerability>,
    /// Findings present in `before` but not in `after`.
    pub resolved_findings: Vec<Vulnerability>,
    /// `after.score - before.score`; `None` when either score is
    /// undefined (zero-finding scan).
    pub score_delta: Option<i64>,
}

/// Pure diff of two results. The results need not come from the same
/// config, though that is the intended use.
pub fn compare(before: &ScanResult, after: &ScanResult) -> ScanComparison {
    let before_ids: HashSet<&str> = before.vulnerabilities.iter().map(|v| v.id.as_str()).collect();
    let after_ids: HashSet<&str> = after.vulnerabilities.iter().map(|v| v.id.as_str()).collect();

    let new_findings = after
        .vulnerabilities
        .iter()
        .filter(|v| !before_ids.contains(v.id.as_str()))
        .cloned()
        .collect();

    let resolved_findings = before
        .vulnerabilities
        .iter()
        .filter(|v| !after_ids.contains(v.id.as_str()))
        .cloned()
        .collect();

    let score_delta = match (before.score, after.score) {
        (Some(b), Some(a)) => Some(a as i64 - b as i64),
        _ => None,
    };

    ScanComparison {
        new_findings,
        resolved_findings,
        score_delta,
    }
}
