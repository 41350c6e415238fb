use std::fs;

use anyhow::Context;

use crate::cli::{Cli, Commands};
use api_sentinel::compare::{compare, ScanComparison};
use api_sentinel::config::{AuthKind, ScanConfig};
use api_sentinel::executor::ScanExecutor;
use api_sentinel::http_client::create_client;
use api_sentinel::model::{ScanResult, Vulnerability};
use api_sentinel::store::ScanResultStore;

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Configure logging based on global flags. Keep external crates
    // (reqwest/hyper) at INFO to avoid flooding the CLI.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter_str = format!(
        "api_sentinel={level},reqwest=info,hyper=info,h2=info",
        level = crate_level
    );
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Scan {
            url,
            name,
            method,
            headers,
            body,
            bearer,
            basic,
            oauth2,
            timeout,
            output,
        } => {
            let mut config = ScanConfig::new("cli", &name, &url);
            config.method = method;
            config.body = body;
            for raw in headers {
                match raw.split_once(':') {
                    Some((name, value)) => {
                        config
                            .headers
                            .insert(name.trim().to_string(), value.trim().to_string());
                    }
                    None => eprintln!("[!] Ignoring malformed header (want name:value): {}", raw),
                }
            }
            if let Some(token) = bearer {
                config = config.with_auth(AuthKind::Bearer, &token);
            } else if let Some(cred) = basic {
                config = config.with_auth(AuthKind::Basic, &cred);
            } else if let Some(token) = oauth2 {
                config = config.with_auth(AuthKind::OAuth2, &token);
            }

            run_scan(config, timeout, output).await
        }
        Commands::Diff { before, after } => run_diff(&before, &after),
    }
}

async fn run_scan(config: ScanConfig, timeout: u64, output: Option<String>) -> anyhow::Result<()> {
    println!("[>] Target: {}", config.url);
    println!("[~] Method: {}\n", config.method);

    let store = ScanResultStore::new();
    store.add_config(config.clone());

    let executor = ScanExecutor::new(create_client(timeout));
    let result = executor.scan(&config).await;
    store.append(result);

    // The executor always hands the result to the store; read it back
    // the way any other consumer would.
    let result = store
        .latest(&config.id)
        .context("scan result missing from store")?;

    print_report(&result);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path))?;
        println!("[+] Result written to {}", path);
    }

    Ok(())
}

fn run_diff(before_path: &str, after_path: &str) -> anyhow::Result<()> {
    let before = load_result(before_path)?;
    let after = load_result(after_path)?;

    let diff = compare(&before, &after);
    print_diff(&diff);
    Ok(())
}

fn load_result(path: &str) -> anyhow::Result<ScanResult> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing scan result from {}", path))
}

fn print_report(result: &ScanResult) {
    println!("{}", "-".repeat(60));
    if result.metadata.status_code == 0 {
        println!("[!] Probe never reached the target");
    } else {
        println!("[*] HTTP status: {}", result.metadata.status_code);
    }
    println!("[*] Response time: {}ms", result.metadata.response_time_ms);
    if let Some(server) = &result.metadata.server {
        println!("[*] Server: {}", server);
    }

    if result.vulnerabilities.is_empty() {
        println!("\n[+] No findings");
    } else {
        println!("\n[!] {} finding(s):", result.vulnerabilities.len());
        for vuln in &result.vulnerabilities {
            print_finding(vuln);
        }
    }

    match result.score {
        Some(score) => println!("\n[*] Security score: {}/100", score),
        None => println!("\n[*] Security score: n/a (no findings to score)"),
    }
    println!("{}", "-".repeat(60));
}

fn print_finding(vuln: &Vulnerability) {
    let cwe = vuln.cwe.as_deref().unwrap_or("-");
    println!(
        "    [{}] {} {} ({})",
        vuln.severity.label(),
        vuln.id,
        vuln.vuln_type,
        cwe
    );
    println!("        {}", vuln.description);
    println!("        Fix: {}", vuln.recommendation);
}

fn print_diff(diff: &ScanComparison) {
    if diff.new_findings.is_empty() && diff.resolved_findings.is_empty() {
        println!("[+] No changes in findings");
    }
    if !diff.new_findings.is_empty() {
        println!("[!] New findings ({}):", diff.new_findings.len());
        for vuln in &diff.new_findings {
            print_finding(vuln);
        }
    }
    if !diff.resolved_findings.is_empty() {
        println!("[+] Resolved findings ({}):", diff.resolved_findings.len());
        for vuln in &diff.resolved_findings {
            print_finding(vuln);
        }
    }
    match diff.score_delta {
        Some(delta) if delta > 0 => println!("[+] Score improved by {}", delta),
        Some(delta) if delta < 0 => println!("[!] Score dropped by {}", -delta),
        Some(_) => println!("[*] Score unchanged"),
        None => println!("[*] Score delta: n/a (undefined score on one side)"),
    }
}
