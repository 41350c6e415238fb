use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Shared probe client with the default timeout.
pub static DEFAULT_CLIENT: Lazy<Client> = Lazy::new(|| create_client(10));

/// Create the probe client with connection pooling and rustls.
///
/// Certificate validation is disabled: scan targets are frequently
/// staging hosts with self-signed or mismatched certs, and a TLS
/// failure would mask every other signal the rules look for.
pub fn create_client(timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(5))
        .gzip(true)
        .brotli(true)
        .use_rustls_tls()
        .https_only(false)
        .redirect(reqwest::redirect::Policy::limited(5))
        .user_agent(concat!("api_sentinel/", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(true)
        .build()
        .expect("Failed to build HTTP client")
}
