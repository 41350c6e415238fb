use crate::model::{Severity, Vulnerability};
use reqwest::Client;
use serde_json::json;

/// Relative paths checked for publicly reachable API documentation.
/// Held as data so tests and callers can swap in their own candidates.
pub const DEFAULT_DOC_PATHS: [&str; 4] = ["/docs", "/swagger", "/openapi.json", "/api-docs"];

/// Sequential, short-circuiting documentation discovery against a
/// target origin.
pub struct DocsProbe<'a> {
    client: &'a Client,
    paths: Vec<String>,
}

impl<'a> DocsProbe<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            paths: DEFAULT_DOC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_paths(client: &'a Client, paths: Vec<String>) -> Self {
        Self { client, paths }
    }

    /// Probe the candidates in list order and report the first one that
    /// answers with a success status. At most one finding per scan;
    /// unreachable candidates are treated as not-found.
    pub async fn discover(&self, origin: &str) -> Option<Vulnerability> {
        for path in &self.paths {
            let url = format!("{}{}", origin.trim_end_matches('/'), path);

            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(%url, status = %response.status(), "documentation candidate hit");
                    return Some(
                        Vulnerability::new(
                            "DOCS-001",
                            "Public API Documentation",
                            format!("API documentation is publicly reachable at {}", path),
                            Severity::Low,
                            "Restrict documentation endpoints to internal consumers if the API is not public",
                        )
                        .with_details(json!({ "path": path })),
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(%url, error = %e, "documentation candidate unreachable");
                }
            }
        }
        None
    }
}

/// Reduce a target URL to its origin (`scheme://host[:port]`) for
/// resolving the documentation candidates.
pub fn origin_of(raw_url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(raw_url) {
        let mut origin = format!(
            "{}://{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or_default()
        );
        if let Some(port) = parsed.port() {
            origin.push_str(&format!(":{}", port));
        }
        origin
    } else {
        raw_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_strips_path_and_query() {
        assert_eq!(
            origin_of("https://api.example.com/v1/users?page=2"),
            "https://api.example.com"
        );
        assert_eq!(
            origin_of("http://localhost:8080/health"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn origin_of_unparseable_input_is_passthrough() {
        assert_eq!(origin_of("not a url"), "not a url");
    }
}
