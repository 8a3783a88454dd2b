//! NetGuard - netlist structural validation library
//!
//! Checks a submitted netlist (components, pins, nets, connections) against
//! a fixed, ordered set of rules and returns one pass/fail result per rule
//! with the ids of the offending entities.
//!
//! # Quick Start
//!
//! ```
//! use netguard::{validate_netlist, Netlist};
//!
//! let netlist = Netlist::from_json_str(r#"{
//!     "components": [{"id": "R1", "name": "R1", "type": "resistor",
//!                     "pins": [{"id": "1", "name": "A", "type": "input"}]}],
//!     "nets": [{"id": "N1", "name": "GND",
//!               "connections": [{"componentId": "R1", "pinId": "1"}]}]
//! }"#).unwrap();
//!
//! let results = validate_netlist(&netlist);
//! assert_eq!(results.len(), 7);
//! assert!(results.iter().all(|r| r.passed()));
//! ```
//!
//! # Rules
//!
//! Evaluated in this order, one result each:
//!
//! 1. `ComponentNameRequired`
//! 2. `NetNameRequired`
//! 3. `ComponentMustHavePins`
//! 4. `PinNameRequired`
//! 5. `NetMustHaveConnections`
//! 6. `ValidConnections`
//! 7. `GndNetRequired` when no GND/GROUND net exists, otherwise `GndConnections`

pub mod analyzer;
pub mod core;
pub mod document;
pub mod model;
pub mod netlist;

// Re-export main types
pub use analyzer::{Rule, RuleId, RulesEngine, Status, ValidationResult};
pub use crate::core::{
    discover_netlist_files, validate_netlist, NetguardCore, NetguardError, ValidationOptions,
    ValidationReport, ValidationStats,
};
pub use document::NetlistDocument;
pub use model::{ConnectivitySummary, NetlistGraph};
pub use netlist::{Component, Connection, Net, Netlist, NetlistError, Pin, PinType};

/// Parse a netlist file (convenience wrapper).
pub fn parse_netlist(path: &std::path::Path) -> Result<Netlist, NetguardError> {
    let content = std::fs::read_to_string(path)?;
    Ok(Netlist::from_json_str(&content)?)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        validate_netlist, NetguardCore, NetguardError, Netlist, RuleId, Status,
        ValidationOptions, ValidationReport, ValidationResult, ValidationStats,
    };
}
