use std::time::{Instant, SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::json;

use crate::analyze::rules::{self, ProbeSnapshot};
use crate::config::{AuthKind, ScanConfig};
use crate::discover::docs_probe::{origin_of, DocsProbe, DEFAULT_DOC_PATHS};
use crate::http_client::DEFAULT_CLIENT;
use crate::model::{ApiMetadata, ScanResult, Severity, Vulnerability};
use crate::scoring::score::compute_score;

/// Runs one end-to-end scan: probe, rule evaluation, documentation
/// discovery, scoring.
///
/// The executor never fails toward the caller. Transport failures
/// become a Critical "Connection Error" finding on a degraded result
/// with status code 0 and a fixed score of 0.
pub struct ScanExecutor {
    client: Client,
    doc_paths: Vec<String>,
}

impl ScanExecutor {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            doc_paths: DEFAULT_DOC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Override the documentation candidates, e.g. for injected test
    /// endpoints.
    pub fn with_doc_paths(mut self, paths: Vec<String>) -> Self {
        self.doc_paths = paths;
        self
    }

    pub async fn scan(&self, config: &ScanConfig) -> ScanResult {
        let started = Instant::now();
        let timestamp_ms = epoch_millis();

        tracing::info!(config_id = %config.id, url = %config.url, "starting scan");

        let mut request = self
            .client
            .request(config.http_method(), &config.url)
            .headers(build_headers(config));
        if let Some(body) = &config.body {
            request = request.body(body.clone());
        }

        match request.send().await {
            Ok(response) => {
                let response_time_ms = started.elapsed().as_millis() as u64;
                let snapshot = snapshot_response(&response);
                let server = snapshot.server();
                let status = snapshot.status;

                let mut vulnerabilities = rules::evaluate(config, &snapshot);

                let docs = DocsProbe::with_paths(&self.client, self.doc_paths.clone());
                if let Some(finding) = docs.discover(&origin_of(&config.url)).await {
                    vulnerabilities.push(finding);
                }

                let score = compute_score(&vulnerabilities);

                tracing::info!(
                    config_id = %config.id,
                    status,
                    findings = vulnerabilities.len(),
                    score = ?score,
                    "scan complete"
                );

                ScanResult {
                    config_id: config.id.clone(),
                    timestamp_ms,
                    vulnerabilities,
                    score,
                    metadata: ApiMetadata {
                        response_time_ms,
                        status_code: status,
                        server,
                    },
                }
            }
            Err(e) => {
                tracing::warn!(config_id = %config.id, error = %e, "probe failed");
                connection_error_result(config, timestamp_ms, started.elapsed().as_millis() as u64, &e.to_string())
            }
        }
    }
}

impl Default for ScanExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT.clone())
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Merge configured headers with a synthesized Authorization header.
/// Configured values that are not valid header syntax are skipped with
/// a warning instead of aborting the scan.
fn build_headers(config: &ScanConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in &config.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => {
                tracing::warn!(header = %name, "skipping invalid configured header");
            }
        }
    }

    if let Some(auth) = &config.auth {
        let value = match auth.kind {
            AuthKind::Basic => format!("Basic {}", auth.credential),
            // OAuth2 access tokens ride the Bearer scheme as well.
            AuthKind::Bearer | AuthKind::OAuth2 => format!("Bearer {}", auth.credential),
        };
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(AUTHORIZATION, value);
        } else {
            tracing::warn!("credential is not a valid header value, sending unauthenticated");
        }
    }

    headers
}

fn snapshot_response(response: &reqwest::Response) -> ProbeSnapshot {
    let mut snapshot = ProbeSnapshot::new(response.status().as_u16());
    for (name, value) in response.headers() {
        if let Ok(value) = value.to_str() {
            snapshot
                .headers
                .insert(name.as_str().to_lowercase(), value.to_string());
        }
    }
    snapshot
}

fn connection_error_result(
    config: &ScanConfig,
    timestamp_ms: u64,
    response_time_ms: u64,
    error: &str,
) -> ScanResult {
    let finding = Vulnerability::new(
        "CONN-001",
        "Connection Error",
        format!("Could not connect to the API: {}", error),
        Severity::Critical,
        "Verify the URL, DNS and TLS setup; an unreachable API cannot be assessed",
    )
    .with_cwe("CWE-521")
    .with_details(json!({ "error": error }));

    ScanResult {
        config_id: config.id.clone(),
        timestamp_ms,
        vulnerabilities: vec![finding],
        // Unreachable targets are pinned to the floor, not scored.
        score: Some(0),
        metadata: ApiMetadata {
            response_time_ms,
            status_code: 0,
            server: None,
        },
    }
}
