//! Rule engine: an ordered set of independent, pure netlist checks.

pub mod rules;

pub use rules::{GroundSlot, Rule, RuleId, RulesEngine, Status, ValidationResult};
