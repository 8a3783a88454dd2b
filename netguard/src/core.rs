//! Caller-facing validation API shared by the CLI and embedding services.
//! The engine itself is pure; file access and input bounds live here.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use crate::analyzer::{RulesEngine, ValidationResult};
use crate::model::NetlistGraph;
use crate::netlist::{Netlist, NetlistError};

#[derive(Debug, thiserror::Error)]
pub enum NetguardError {
    #[error(transparent)]
    Netlist(#[from] NetlistError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input too large: {count} {what} exceeds limit of {limit}")]
    InputTooLarge {
        what: &'static str,
        count: usize,
        limit: usize,
    },
    #[error("Netlist name is required")]
    MissingName,
}

impl NetguardError {
    /// Whether the input document itself was malformed (as opposed to IO).
    pub fn is_input_error(&self) -> bool {
        !matches!(self, NetguardError::Io(_))
    }
}

/// Upper bounds applied before the engine runs. `None` means unbounded.
#[derive(Clone, Debug, Default)]
pub struct ValidationOptions {
    pub max_components: Option<usize>,
    pub max_nets: Option<usize>,
    pub max_connections: Option<usize>,
}

impl ValidationOptions {
    pub fn check_bounds(&self, netlist: &Netlist) -> Result<(), NetguardError> {
        let checks = [
            ("components", netlist.components.len(), self.max_components),
            ("nets", netlist.nets.len(), self.max_nets),
            ("connections", netlist.connection_count(), self.max_connections),
        ];
        for (what, count, limit) in checks {
            if let Some(limit) = limit {
                if count > limit {
                    return Err(NetguardError::InputTooLarge { what, count, limit });
                }
            }
        }
        Ok(())
    }
}

/// Run the default rule set. Always returns exactly seven results.
pub fn validate_netlist(netlist: &Netlist) -> Vec<ValidationResult> {
    let graph = NetlistGraph::build(netlist);
    let results = RulesEngine::with_default_rules().run(&graph);
    let failed = results.iter().filter(|r| r.failed()).count();
    tracing::info!(
        components = netlist.components.len(),
        nets = netlist.nets.len(),
        failed,
        "Validated netlist"
    );
    results
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl ValidationStats {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let failed = results.iter().filter(|r| r.failed()).count();
        Self {
            total: results.len(),
            passed: results.len() - failed,
            failed,
        }
    }

    /// Short status label, e.g. for a dashboard badge.
    pub fn badge(&self) -> String {
        if self.total == 0 {
            "Not Validated".to_string()
        } else if self.failed == 0 {
            "All Passed".to_string()
        } else {
            format!("{} Issues Found", self.failed)
        }
    }
}

/// Per-file validation result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub file: Option<PathBuf>,
    /// The netlist the results were computed from.
    #[serde(skip)]
    pub netlist: Netlist,
    pub results: Vec<ValidationResult>,
    pub stats: ValidationStats,
    pub validated_at: DateTime<Utc>,
}

impl ValidationReport {
    fn new(file: Option<PathBuf>, netlist: Netlist, results: Vec<ValidationResult>) -> Self {
        let stats = ValidationStats::from_results(&results);
        Self {
            file,
            netlist,
            results,
            stats,
            validated_at: Utc::now(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.stats.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.failed())
    }
}

/// Recursively discover netlist JSON files in a directory, sorted by path.
pub fn discover_netlist_files(dir: &Path) -> Result<Vec<PathBuf>, NetguardError> {
    let mut files = Vec::new();
    walk_dir(dir, &mut files, 0)?;
    files.sort();
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>, depth: usize) -> Result<(), NetguardError> {
    if depth > 20 {
        tracing::warn!("Directory nesting too deep, skipping {}", dir.display());
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with('.') || name == "node_modules" || name == "target" {
                continue;
            }
            walk_dir(&path, files, depth + 1)?;
        } else if path.is_file()
            && path.extension().and_then(|s| s.to_str()) == Some("json")
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Validation entry points used by the CLI and services.
pub struct NetguardCore;

impl NetguardCore {
    pub fn validate(
        netlist: &Netlist,
        options: &ValidationOptions,
    ) -> Result<Vec<ValidationResult>, NetguardError> {
        options.check_bounds(netlist)?;
        Ok(validate_netlist(netlist))
    }

    pub fn validate_value(
        value: &serde_json::Value,
        options: &ValidationOptions,
    ) -> Result<Vec<ValidationResult>, NetguardError> {
        let netlist = Netlist::from_value(value)?;
        Self::validate(&netlist, options)
    }

    pub fn validate_str(
        content: &str,
        options: &ValidationOptions,
    ) -> Result<Vec<ValidationResult>, NetguardError> {
        let netlist = Netlist::from_json_str(content)?;
        Self::validate(&netlist, options)
    }

    /// Validate one netlist JSON file.
    pub fn validate_file(
        path: &Path,
        options: &ValidationOptions,
    ) -> Result<ValidationReport, NetguardError> {
        let content = std::fs::read_to_string(path)?;
        let netlist = Netlist::from_json_str(&content)?;
        Self::into_report(Some(path.to_path_buf()), netlist, options)
    }

    /// Validate every netlist file under `dir` in parallel.
    ///
    /// Reports come back in discovery order. A file that cannot be read or
    /// has the wrong top-level shape aborts the batch with its error.
    pub fn validate_project(
        dir: &Path,
        options: &ValidationOptions,
    ) -> Result<Vec<ValidationReport>, NetguardError> {
        let files = discover_netlist_files(dir)?;
        tracing::info!("Validating {} netlist file(s) in {}", files.len(), dir.display());
        files
            .par_iter()
            .map(|path| Self::validate_file(path, options))
            .collect()
    }

    /// Report for an in-memory netlist with no backing file.
    pub fn report(
        netlist: &Netlist,
        options: &ValidationOptions,
    ) -> Result<ValidationReport, NetguardError> {
        Self::into_report(None, netlist.clone(), options)
    }

    fn into_report(
        file: Option<PathBuf>,
        netlist: Netlist,
        options: &ValidationOptions,
    ) -> Result<ValidationReport, NetguardError> {
        let results = Self::validate(&netlist, options)?;
        Ok(ValidationReport::new(file, netlist, results))
    }
}
