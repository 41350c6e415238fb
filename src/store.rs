use dashmap::DashMap;
use parking_lot::RwLock;

use crate::config::ScanConfig;
use crate::model::ScanResult;

/// Append-only scan history plus the parallel config collection.
///
/// Results are keyed by config id. There is no update or delete for
/// results; removing a config leaves its history in place. The map is
/// sharded (DashMap) so concurrent scans can append without losing
/// entries, and each id's log is only ever pushed to.
#[derive(Default)]
pub struct ScanResultStore {
    results: DashMap<String, Vec<ScanResult>>,
    configs: RwLock<Vec<ScanConfig>>,
}

impl ScanResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, result: ScanResult) {
        self.results
            .entry(result.config_id.clone())
            .or_default()
            .push(result);
    }

    pub fn add_config(&self, config: ScanConfig) {
        self.configs.write().push(config);
    }

    /// Drop a config from the collection. Stored results for that id
    /// are retained.
    pub fn remove_config(&self, config_id: &str) {
        self.configs.write().retain(|c| c.id != config_id);
    }

    pub fn config(&self, config_id: &str) -> Option<ScanConfig> {
        self.configs.read().iter().find(|c| c.id == config_id).cloned()
    }

    pub fn configs(&self) -> Vec<ScanConfig> {
        self.configs.read().clone()
    }

    /// Most recent result for a config id, by timestamp.
    pub fn latest(&self, config_id: &str) -> Option<ScanResult> {
        self.results.get(config_id).and_then(|log| {
            log.iter()
                .max_by_key(|r| r.timestamp_ms)
                .cloned()
        })
    }

    /// Up to `limit` most recent results for a config id, newest first.
    pub fn history(&self, config_id: &str, limit: usize) -> Vec<ScanResult> {
        let Some(log) = self.results.get(config_id) else {
            return Vec::new();
        };
        let mut sorted: Vec<ScanResult> = log.clone();
        sorted.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
        sorted.truncate(limit);
        sorted
    }

    pub fn result_count(&self, config_id: &str) -> usize {
        self.results.get(config_id).map(|log| log.len()).unwrap_or(0)
    }
}
