use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthKind {
    Basic,
    Bearer,
    OAuth2,
}

/// Opaque credential plus its scheme. Credentials are never stored or
/// transformed here; they pass straight into the Authorization header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub kind: AuthKind,
    pub credential: String,
}

/// One probe target, supplied by the configuration collaborator.
/// Immutable during a single scan execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub id: String,
    pub name: String,
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

impl ScanConfig {
    pub fn new(id: &str, name: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            method: "GET".to_string(),
            headers: HashMap::new(),
            body: None,
            auth: None,
        }
    }

    pub fn with_auth(mut self, kind: AuthKind, credential: &str) -> Self {
        self.auth = Some(AuthConfig {
            kind,
            credential: credential.to_string(),
        });
        self
    }

    /// Parse the configured verb, falling back to GET on unknown input.
    pub fn http_method(&self) -> reqwest::Method {
        reqwest::Method::from_bytes(self.method.to_uppercase().as_bytes())
            .unwrap_or(reqwest::Method::GET)
    }
}
