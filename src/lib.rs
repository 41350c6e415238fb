pub mod analyze;
pub mod compare;
pub mod config;
pub mod discover;
pub mod executor;
pub mod http_client;
pub mod model;
pub mod scoring;
pub mod security;
pub mod store;

// re-export the types callers touch on every scan
pub use crate::compare::{compare, ScanComparison};
pub use crate::config::{AuthConfig, AuthKind, ScanConfig};
pub use crate::executor::ScanExecutor;
pub use crate::model::{ApiMetadata, ScanResult, Severity, Vulnerability};
pub use crate::store::ScanResultStore;
