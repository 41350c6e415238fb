use serde::{Deserialize, Serialize};

/// Ordinal risk level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Integer weight used by the scoring model.
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// One discrete security observation produced by a rule.
///
/// Findings are created during rule evaluation and never mutated
/// afterwards. Ids are stable codes (e.g. `HTTPS-001`) unique within a
/// single scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vulnerability {
    pub id: String,
    #[serde(rename = "type")]
    pub vuln_type: String,
    pub description: String,
    pub severity: Severity,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe: Option<String>,
}

impl Vulnerability {
    pub fn new(
        id: &str,
        vuln_type: &str,
        description: impl Into<String>,
        severity: Severity,
        recommendation: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            vuln_type: vuln_type.to_string(),
            description: description.into(),
            severity,
            recommendation: recommendation.to_string(),
            details: None,
            cwe: None,
        }
    }

    pub fn with_cwe(mut self, cwe: &str) -> Self {
        self.cwe = Some(cwe.to_string());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Observed probe metadata attached to a scan result.
///
/// A status code of 0 is the sentinel for "the probe never got a
/// response" (DNS/TCP/TLS failure or timeout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMetadata {
    pub response_time_ms: u64,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

/// One executed scan. Immutable once assembled; owned by the store.
///
/// `score` is `None` when the scan produced zero findings, where the
/// weighted formula is undefined (see scoring module). Findings keep
/// rule-evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub config_id: String,
    pub timestamp_ms: u64,
    pub vulnerabilities: Vec<Vulnerability>,
    pub score: Option<u8>,
    pub metadata: ApiMetadata,
}

impl ScanResult {
    pub fn finding_ids(&self) -> Vec<&str> {
        self.vulnerabilities.iter().map(|v| v.id.as_str()).collect()
    }

    pub fn has_finding(&self, id: &str) -> bool {
        self.vulnerabilities.iter().any(|v| v.id == id)
    }
}
