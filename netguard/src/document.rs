//! Netlist document with embedded validation results.
//!
//! This is the shape a storage layer persists: the submitted graph data
//! together with the results computed from it. Building a document always
//! re-runs the engine, so stored results never drift from stored data.

use serde::{Deserialize, Serialize};

use crate::analyzer::ValidationResult;
use crate::core::{validate_netlist, NetguardError, ValidationReport, ValidationStats};
use crate::netlist::Netlist;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetlistDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub netlist: Netlist,
    #[serde(default)]
    pub validation_results: Vec<ValidationResult>,
}

impl NetlistDocument {
    /// Validate `netlist` and wrap it with its results.
    pub fn validated(
        name: impl Into<String>,
        description: Option<String>,
        netlist: Netlist,
    ) -> Result<Self, NetguardError> {
        let name = required_name(name)?;
        let validation_results = validate_netlist(&netlist);
        Ok(Self {
            name,
            description,
            netlist,
            validation_results,
        })
    }

    /// Wrap a report's netlist and results without running the engine again.
    pub fn from_report(
        name: impl Into<String>,
        description: Option<String>,
        report: &ValidationReport,
    ) -> Result<Self, NetguardError> {
        Ok(Self {
            name: required_name(name)?,
            description,
            netlist: report.netlist.clone(),
            validation_results: report.results.clone(),
        })
    }

    /// Replace name, description and graph data, then recompute results.
    /// A blank name leaves the document untouched.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        netlist: Netlist,
    ) -> Result<(), NetguardError> {
        self.name = required_name(name)?;
        self.description = description;
        self.validation_results = validate_netlist(&netlist);
        self.netlist = netlist;
        Ok(())
    }

    pub fn stats(&self) -> ValidationStats {
        ValidationStats::from_results(&self.validation_results)
    }
}

fn required_name(name: impl Into<String>) -> Result<String, NetguardError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(NetguardError::MissingName);
    }
    Ok(name)
}
