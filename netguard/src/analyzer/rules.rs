use crate::model::NetlistGraph;
use crate::netlist::{Component, Net};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of the rule that produced a result.
///
/// Serialized as its bare name. Rules added on top of the default set use
/// [`RuleId::Custom`] with a name of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RuleId {
    ComponentNameRequired,
    NetNameRequired,
    ComponentMustHavePins,
    PinNameRequired,
    NetMustHaveConnections,
    ValidConnections,
    GndNetRequired,
    GndConnections,
    Custom(#[serde(skip_deserializing)] &'static str),
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::ComponentNameRequired => "ComponentNameRequired",
            RuleId::NetNameRequired => "NetNameRequired",
            RuleId::ComponentMustHavePins => "ComponentMustHavePins",
            RuleId::PinNameRequired => "PinNameRequired",
            RuleId::NetMustHaveConnections => "NetMustHaveConnections",
            RuleId::ValidConnections => "ValidConnections",
            RuleId::GndNetRequired => "GndNetRequired",
            RuleId::GndConnections => "GndConnections",
            RuleId::Custom(name) => *name,
        }
    }

    /// Ids of the default rule set, ground slot included.
    pub const BUILTIN: [RuleId; 8] = [
        RuleId::ComponentNameRequired,
        RuleId::NetNameRequired,
        RuleId::ComponentMustHavePins,
        RuleId::PinNameRequired,
        RuleId::NetMustHaveConnections,
        RuleId::ValidConnections,
        RuleId::GndNetRequired,
        RuleId::GndConnections,
    ];
}

impl From<RuleId> for &'static str {
    fn from(id: RuleId) -> Self {
        id.as_str()
    }
}

impl TryFrom<String> for RuleId {
    type Error = String;

    /// Only built-in names can be read back; custom ids live in the rule
    /// that defines them.
    fn try_from(name: String) -> Result<Self, Self::Error> {
        RuleId::BUILTIN
            .into_iter()
            .find(|id| id.as_str() == name)
            .ok_or_else(|| format!("unknown rule id: {}", name))
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

/// Outcome of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub rule: RuleId,
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_ids: Option<Vec<String>>,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn failed(&self) -> bool {
        self.status == Status::Fail
    }

    /// Result listing offending components. Fails iff the list is non-empty.
    fn for_components(rule: RuleId, ids: Vec<String>, pass: &str, fail: impl FnOnce(usize) -> String) -> Self {
        let (status, message) = outcome(ids.len(), pass, fail);
        Self {
            rule,
            status,
            message,
            component_ids: Some(ids),
            net_ids: None,
        }
    }

    /// Result listing offending nets. Fails iff the list is non-empty.
    fn for_nets(rule: RuleId, ids: Vec<String>, pass: &str, fail: impl FnOnce(usize) -> String) -> Self {
        let (status, message) = outcome(ids.len(), pass, fail);
        Self {
            rule,
            status,
            message,
            component_ids: None,
            net_ids: Some(ids),
        }
    }
}

fn outcome(offenders: usize, pass: &str, fail: impl FnOnce(usize) -> String) -> (Status, String) {
    if offenders > 0 {
        (Status::Fail, fail(offenders))
    } else {
        (Status::Pass, pass.to_string())
    }
}

/// A pure check over the graph model. Rules never see each other's output.
pub trait Rule: Send + Sync {
    /// Every id this rule can put on its result. Most rules have exactly one.
    fn ids(&self) -> &[RuleId];
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn check(&self, graph: &NetlistGraph) -> ValidationResult;
}

/// Ordered list of rules. New rules are appended; existing positions never move.
pub struct RulesEngine {
    rules: Vec<Arc<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The seven-slot default rule set, in evaluation order.
    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Arc::new(ComponentNameRule));
        engine.add_rule(Arc::new(NetNameRule));
        engine.add_rule(Arc::new(ComponentPinsRule));
        engine.add_rule(Arc::new(PinNameRule));
        engine.add_rule(Arc::new(NetConnectionsRule));
        engine.add_rule(Arc::new(ValidConnectionsRule));
        engine.add_rule(Arc::new(GroundRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order. One result per rule, never reordered.
    pub fn run(&self, graph: &NetlistGraph) -> Vec<ValidationResult> {
        let mut results = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let result = rule.check(graph);
            if !rule.ids().contains(&result.rule) {
                tracing::warn!(rule = rule.name(), result = %result.rule, "rule emitted an undeclared id");
            }
            tracing::debug!(rule = %result.rule, status = ?result.status, "rule evaluated");
            results.push(result);
        }
        results
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

// Helper functions

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn component_ids<'a>(components: impl Iterator<Item = &'a Component>) -> Vec<String> {
    components.map(|c| c.id.clone()).collect()
}

fn net_ids<'a>(nets: impl Iterator<Item = &'a Net>) -> Vec<String> {
    nets.map(|n| n.id.clone()).collect()
}

/// Component types that must be tied to ground.
fn requires_ground(component: &Component) -> bool {
    let kind = component.component_type.to_lowercase();
    kind.contains("ic") || kind.contains("connector")
}

// Rule implementations

pub struct ComponentNameRule;

impl Rule for ComponentNameRule {
    fn ids(&self) -> &[RuleId] {
        &[RuleId::ComponentNameRequired]
    }

    fn name(&self) -> &str {
        "Component name required"
    }

    fn description(&self) -> &str {
        "Every component needs a non-blank name"
    }

    fn check(&self, graph: &NetlistGraph) -> ValidationResult {
        let offenders = component_ids(graph.components().iter().filter(|c| is_blank(&c.name)));
        ValidationResult::for_components(
            RuleId::ComponentNameRequired,
            offenders,
            "All components have names",
            |n| format!("{} component(s) missing a name", n),
        )
    }
}

pub struct NetNameRule;

impl Rule for NetNameRule {
    fn ids(&self) -> &[RuleId] {
        &[RuleId::NetNameRequired]
    }

    fn name(&self) -> &str {
        "Net name required"
    }

    fn description(&self) -> &str {
        "Every net needs a non-blank name"
    }

    fn check(&self, graph: &NetlistGraph) -> ValidationResult {
        let offenders = net_ids(graph.nets().iter().filter(|n| is_blank(&n.name)));
        ValidationResult::for_nets(
            RuleId::NetNameRequired,
            offenders,
            "All nets have names",
            |n| format!("{} net(s) missing a name", n),
        )
    }
}

pub struct ComponentPinsRule;

impl Rule for ComponentPinsRule {
    fn ids(&self) -> &[RuleId] {
        &[RuleId::ComponentMustHavePins]
    }

    fn name(&self) -> &str {
        "Component must have pins"
    }

    fn description(&self) -> &str {
        "Every component needs at least one pin"
    }

    fn check(&self, graph: &NetlistGraph) -> ValidationResult {
        let offenders = component_ids(graph.components().iter().filter(|c| c.pins.is_empty()));
        ValidationResult::for_components(
            RuleId::ComponentMustHavePins,
            offenders,
            "All components have at least one pin",
            |n| format!("{} component(s) have no pins", n),
        )
    }
}

pub struct PinNameRule;

impl Rule for PinNameRule {
    fn ids(&self) -> &[RuleId] {
        &[RuleId::PinNameRequired]
    }

    fn name(&self) -> &str {
        "Pin name required"
    }

    fn description(&self) -> &str {
        "Every pin needs a non-blank name; offending components are listed once"
    }

    fn check(&self, graph: &NetlistGraph) -> ValidationResult {
        let offenders = component_ids(
            graph
                .components()
                .iter()
                .filter(|c| c.pins.iter().any(|p| is_blank(&p.name))),
        );
        ValidationResult::for_components(
            RuleId::PinNameRequired,
            offenders,
            "All pins have names",
            |n| format!("{} component(s) have unnamed pins", n),
        )
    }
}

pub struct NetConnectionsRule;

impl Rule for NetConnectionsRule {
    fn ids(&self) -> &[RuleId] {
        &[RuleId::NetMustHaveConnections]
    }

    fn name(&self) -> &str {
        "Net must have connections"
    }

    fn description(&self) -> &str {
        "Every net needs at least one pin connection"
    }

    fn check(&self, graph: &NetlistGraph) -> ValidationResult {
        let offenders = net_ids(graph.nets().iter().filter(|n| n.connections.is_empty()));
        ValidationResult::for_nets(
            RuleId::NetMustHaveConnections,
            offenders,
            "All nets have at least one connection",
            |n| format!("{} net(s) have no connections", n),
        )
    }
}

pub struct ValidConnectionsRule;

impl Rule for ValidConnectionsRule {
    fn ids(&self) -> &[RuleId] {
        &[RuleId::ValidConnections]
    }

    fn name(&self) -> &str {
        "Valid connections"
    }

    fn description(&self) -> &str {
        "Every connection must name an existing component and one of its pins"
    }

    fn check(&self, graph: &NetlistGraph) -> ValidationResult {
        let mut offenders: IndexSet<&str> = IndexSet::new();
        let mut invalid: usize = 0;
        for net in graph.nets() {
            for conn in &net.connections {
                let valid = graph
                    .component_by_id(&conn.component_id)
                    .is_some_and(|_| graph.pin(&conn.component_id, &conn.pin_id).is_some());
                if !valid {
                    invalid += 1;
                    offenders.insert(net.id.as_str());
                }
            }
        }
        // the message counts connections, the id list names each net once
        ValidationResult::for_nets(
            RuleId::ValidConnections,
            offenders.into_iter().map(str::to_string).collect(),
            "All connections are valid",
            |_| format!("{} net(s) have invalid connections", invalid),
        )
    }
}

/// Which result fills the ground slot.
#[derive(Debug, Clone, Copy)]
pub enum GroundSlot<'a> {
    /// No net named `gnd`/`ground`: emits `GndNetRequired`.
    Missing,
    /// Emits `GndConnections` against this net.
    Located(&'a Net),
}

impl<'a> GroundSlot<'a> {
    pub fn resolve(graph: &NetlistGraph<'a>) -> Self {
        match graph.ground_net() {
            Some(net) => GroundSlot::Located(net),
            None => GroundSlot::Missing,
        }
    }
}

/// Seventh slot: exactly one of `GndNetRequired` or `GndConnections`.
pub struct GroundRule;

impl GroundRule {
    fn missing() -> ValidationResult {
        ValidationResult {
            rule: RuleId::GndNetRequired,
            status: Status::Fail,
            message: "GND net is missing".to_string(),
            component_ids: None,
            net_ids: None,
        }
    }

    fn connections(graph: &NetlistGraph, ground: &Net) -> ValidationResult {
        let offenders = component_ids(graph.components().iter().filter(|c| {
            requires_ground(c)
                && !ground
                    .connections
                    .iter()
                    .any(|conn| conn.component_id == c.id)
        }));
        ValidationResult::for_components(
            RuleId::GndConnections,
            offenders,
            "All components that require GND are connected",
            |n| format!("{} component(s) that require GND are not connected to GND", n),
        )
    }
}

impl Rule for GroundRule {
    fn ids(&self) -> &[RuleId] {
        &[RuleId::GndNetRequired, RuleId::GndConnections]
    }

    fn name(&self) -> &str {
        "Ground net and connections"
    }

    fn description(&self) -> &str {
        "A GND/GROUND net must exist, and every IC or connector must connect to it"
    }

    fn check(&self, graph: &NetlistGraph) -> ValidationResult {
        match GroundSlot::resolve(graph) {
            GroundSlot::Missing => Self::missing(),
            GroundSlot::Located(net) => Self::connections(graph, net),
        }
    }
}
