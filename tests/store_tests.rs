use api_sentinel::config::ScanConfig;
use api_sentinel::model::{ApiMetadata, ScanResult};
use api_sentinel::store::ScanResultStore;

fn result(config_id: &str, timestamp_ms: u64) -> ScanResult {
    ScanResult {
        config_id: config_id.to_string(),
        timestamp_ms,
        vulnerabilities: Vec::new(),
        score: None,
        metadata: ApiMetadata {
            response_time_ms: 10,
            status_code: 200,
            server: None,
        },
    }
}

#[test]
fn latest_picks_newest_by_timestamp() {
    let store = ScanResultStore::new();
    // Appended out of order on purpose.
    store.append(result("a", 300));
    store.append(result("a", 100));
    store.append(result("a", 200));

    let latest = store.latest("a").unwrap();
    assert_eq!(latest.timestamp_ms, 300);
    assert!(store.latest("missing").is_none());
}

#[test]
fn history_returns_newest_first_and_respects_limit() {
    let store = ScanResultStore::new();
    for ts in [100, 400, 200, 300] {
        store.append(result("a", ts));
    }
    // Unrelated config interleaved; must not leak into "a"'s history.
    store.append(result("b", 999));

    let last_two = store.history("a", 2);
    let stamps: Vec<u64> = last_two.iter().map(|r| r.timestamp_ms).collect();
    assert_eq!(stamps, vec![400, 300]);

    assert_eq!(store.history("a", 10).len(), 4);
    assert!(store.history("missing", 5).is_empty());
}

#[test]
fn removing_a_config_keeps_its_results() {
    let store = ScanResultStore::new();
    store.add_config(ScanConfig::new("a", "first", "https://a.example.com"));
    store.add_config(ScanConfig::new("b", "second", "https://b.example.com"));
    store.append(result("a", 100));

    store.remove_config("a");
    assert!(store.config("a").is_none());
    assert_eq!(store.configs().len(), 1);
    // History is append-only; config removal does not touch it.
    assert_eq!(store.result_count("a"), 1);
}

#[test]
fn concurrent_appends_lose_nothing() {
    let store = ScanResultStore::new();

    std::thread::scope(|scope| {
        for worker in 0..8u64 {
            let store = &store;
            scope.spawn(move || {
                for i in 0..50u64 {
                    let id = if worker % 2 == 0 { "even" } else { "odd" };
                    store.append(result(id, worker * 1000 + i));
                }
            });
        }
    });

    assert_eq!(store.result_count("even") + store.result_count("odd"), 400);
    assert_eq!(store.result_count("even"), 200);
}
