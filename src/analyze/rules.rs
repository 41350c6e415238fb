use crate::config::{AuthKind, ScanConfig};
use crate::model::{Severity, Vulnerability};
use crate::security::jwt_inspector;
use serde_json::json;
use std::collections::HashMap;

/// What the rules are allowed to see of a probe response: status line
/// and headers, keys lowercased. Rules never touch the body.
#[derive(Debug, Clone, Default)]
pub struct ProbeSnapshot {
    pub status: u16,
    pub headers: HashMap<String, String>,
}

impl ProbeSnapshot {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_lowercase(), value.to_string());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|v| v.as_str())
    }

    pub fn server(&self) -> Option<String> {
        self.header("server").map(|s| s.to_string())
    }
}

/// The five response headers every API is expected to send, with their
/// stable finding ids and weakness categories.
const SECURITY_HEADERS: [(&str, &str, &str); 5] = [
    ("Strict-Transport-Security", "HEADER-001", "CWE-523"),
    ("X-Frame-Options", "HEADER-002", "CWE-1021"),
    ("X-XSS-Protection", "HEADER-003", "CWE-79"),
    ("X-Content-Type-Options", "HEADER-004", "CWE-16"),
    ("Content-Security-Policy", "HEADER-005", "CWE-693"),
];

/// Run the stateless checks against one probe response, in fixed order.
/// Findings are appended in evaluation order; callers must not reorder
/// or deduplicate them.
///
/// Documentation-path discovery needs its own requests and lives in
/// the executor; everything here is pure.
pub fn evaluate(config: &ScanConfig, snapshot: &ProbeSnapshot) -> Vec<Vulnerability> {
    let mut findings = Vec::new();

    // 1. Transport
    if !config.url.starts_with("https://") {
        findings.push(
            Vulnerability::new(
                "HTTPS-001",
                "Unsecure Connection",
                "API is reachable over plaintext HTTP",
                Severity::High,
                "Serve the API exclusively over HTTPS and redirect or refuse plain HTTP",
            )
            .with_cwe("CWE-319"),
        );
    }

    // 2. Security headers
    for (header, id, cwe) in SECURITY_HEADERS {
        if snapshot.header(header).is_none() {
            findings.push(
                Vulnerability::new(
                    id,
                    "Missing Security Header",
                    format!("Response is missing the {} header", header),
                    Severity::Medium,
                    "Add the header with a restrictive value appropriate for an API response",
                )
                .with_cwe(cwe)
                .with_details(json!({ "header": header })),
            );
        }
    }

    // 3. Rate limiting
    if snapshot.header("X-RateLimit-Limit").is_none() {
        findings.push(
            Vulnerability::new(
                "RATELIMIT-001",
                "No Rate Limiting",
                "Response carries no X-RateLimit-Limit header; the endpoint advertises no request quota",
                Severity::Medium,
                "Enforce and advertise per-client rate limits",
            )
            .with_cwe("CWE-770"),
        );
    }

    // 4. CORS
    if snapshot.header("Access-Control-Allow-Origin") == Some("*") {
        findings.push(
            Vulnerability::new(
                "CORS-001",
                "Overly Permissive CORS",
                "Access-Control-Allow-Origin is the wildcard '*', any origin may read responses",
                Severity::Medium,
                "Allow-list the origins that actually need cross-origin access",
            )
            .with_cwe("CWE-942"),
        );
    }

    // 5. Versioning
    if !has_version_segment(&config.url) && snapshot.header("API-Version").is_none() {
        findings.push(Vulnerability::new(
            "VERSION-001",
            "No API Versioning",
            "Neither the URL path nor an API-Version header indicates an API version",
            Severity::Low,
            "Version the API (path segment or header) so breaking changes can be rolled out safely",
        ));
    }

    // 6. Server disclosure
    if let Some(server) = snapshot.header("Server") {
        findings.push(
            Vulnerability::new(
                "SERVER-001",
                "Server Information Disclosure",
                format!("Server header reveals the backend software: {}", server),
                Severity::Low,
                "Strip or genericize the Server header",
            )
            .with_cwe("CWE-200")
            .with_details(json!({ "server": server })),
        );
    }

    // 7. Bearer token structure
    if let Some(auth) = &config.auth {
        if auth.kind == AuthKind::Bearer {
            findings.extend(jwt_inspector::inspect_bearer_token(&auth.credential));
        }
    }

    findings
}

/// True when the URL path contains a version-style segment (`/v1`,
/// `/v2beta`, ...).
fn has_version_segment(raw_url: &str) -> bool {
    let Ok(parsed) = url::Url::parse(raw_url) else {
        return false;
    };
    parsed
        .path_segments()
        .map(|mut segments| {
            segments.any(|s| {
                let mut chars = s.chars();
                chars.next() == Some('v') && chars.next().is_some_and(|c| c.is_ascii_digit())
            })
        })
        .unwrap_or(false)
}
