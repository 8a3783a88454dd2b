//! Example: appending a project-specific rule to the default engine.
//! Run with: cargo run --example custom_rules [path/to/netlist.json]

use netguard::{
    parse_netlist, NetlistGraph, Rule, RuleId, RulesEngine, Status, ValidationResult,
};
use std::path::Path;
use std::sync::Arc;

/// Flags components whose pins are all left off every net.
struct FloatingComponentRule;

const FLOATING_COMPONENT: RuleId = RuleId::Custom("FloatingComponent");

impl Rule for FloatingComponentRule {
    fn ids(&self) -> &[RuleId] {
        &[FLOATING_COMPONENT]
    }

    fn name(&self) -> &str {
        "Floating component"
    }

    fn description(&self) -> &str {
        "Components with no resolvable connection on any net"
    }

    fn check(&self, graph: &NetlistGraph) -> ValidationResult {
        let connectivity = graph.connectivity();
        let floating: Vec<String> = graph
            .components()
            .iter()
            .filter(|c| connectivity.nets_of_component(&c.id).is_empty())
            .map(|c| c.id.clone())
            .collect();

        ValidationResult {
            rule: FLOATING_COMPONENT,
            status: if floating.is_empty() { Status::Pass } else { Status::Fail },
            message: format!("{} floating component(s)", floating.len()),
            component_ids: Some(floating),
            net_ids: None,
        }
    }
}

fn main() -> Result<(), netguard::NetguardError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/sample_netlist.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example custom_rules [path/to/netlist.json]");
        std::process::exit(1);
    }

    let netlist = parse_netlist(path)?;
    let graph = NetlistGraph::build(&netlist);

    let mut engine = RulesEngine::with_default_rules();
    engine.add_rule(Arc::new(FloatingComponentRule));

    let results = engine.run(&graph);
    println!("{} rule(s) evaluated for {}", results.len(), path.display());
    for (rule, result) in engine.rules().zip(&results) {
        println!("  [{:?}] {:<24} {} - {}", result.status, result.rule, rule.name(), result.message);
    }

    let failed = results.iter().filter(|r| r.failed()).count();
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
