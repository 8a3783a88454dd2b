//! Simple validation example: validate a netlist file and print results.

use netguard::prelude::*;
use std::path::Path;

fn main() -> Result<(), NetguardError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/sample_netlist.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_validation [path/to/netlist.json]");
        std::process::exit(1);
    }

    let report = NetguardCore::validate_file(path, &ValidationOptions::default())?;

    println!("Validation results for: {}", path.display());
    println!("Status: {}", report.stats.badge());
    println!();

    for result in &report.results {
        let mark = if result.passed() { "PASS" } else { "FAIL" };
        println!("  [{}] {}: {}", mark, result.rule, result.message);
        if let Some(ids) = result.component_ids.as_ref().filter(|ids| !ids.is_empty()) {
            println!("    Components: {}", ids.join(", "));
        }
        if let Some(ids) = result.net_ids.as_ref().filter(|ids| !ids.is_empty()) {
            println!("    Nets: {}", ids.join(", "));
        }
    }

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
