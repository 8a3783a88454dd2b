//! NetGuard CLI - netlist rule checking from the command line.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use netguard::{
    parse_netlist, NetguardCore, NetlistDocument, NetlistGraph, RulesEngine, ValidationOptions,
    ValidationReport, ValidationResult,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "netguard")]
#[command(about = "Netlist structural validation tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single netlist JSON file
    Check {
        /// Path to a netlist .json file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Validate every netlist JSON file in a directory
    Project {
        /// Path to project directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// List validation rules in evaluation order
    Rules {
        /// Show detailed rule descriptions
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a sample netlist to use as a template
    Sample,

    /// Print connectivity statistics for a netlist file
    Stats {
        /// Path to a netlist .json file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Exit with error code if any rule fails
    #[arg(long)]
    fail_on_failure: bool,
}

#[derive(Args)]
struct LimitArgs {
    /// Reject netlists with more components than this
    #[arg(long, value_name = "N")]
    max_components: Option<usize>,

    /// Reject netlists with more nets than this
    #[arg(long, value_name = "N")]
    max_nets: Option<usize>,

    /// Reject netlists with more connections than this
    #[arg(long, value_name = "N")]
    max_connections: Option<usize>,
}

impl From<LimitArgs> for ValidationOptions {
    fn from(args: LimitArgs) -> Self {
        ValidationOptions {
            max_components: args.max_components,
            max_nets: args.max_nets,
            max_connections: args.max_connections,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON report for CI/CD
    Json,
    /// Netlist document with embedded validationResults
    Document,
    /// GitHub Actions annotations
    Github,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let exit_code = match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn run(command: Commands) -> anyhow::Result<i32> {
    match command {
        Commands::Check {
            file,
            output,
            limits,
        } => handle_check(&file, output, limits.into()),
        Commands::Project {
            dir,
            output,
            limits,
        } => handle_project(&dir, output, limits.into()),
        Commands::Rules { verbose } => {
            handle_rules(verbose);
            Ok(0)
        }
        Commands::Sample => {
            let sample = serde_json::to_string_pretty(&netguard::netlist::sample_netlist())?;
            println!("{}", sample);
            Ok(0)
        }
        Commands::Stats { file } => handle_stats(&file),
    }
}

fn handle_check(file: &Path, output: OutputArgs, options: ValidationOptions) -> anyhow::Result<i32> {
    let report = NetguardCore::validate_file(file, &options)
        .with_context(|| format!("failed to validate {}", file.display()))?;
    let reports = [report];
    output_results(&reports, &output.format)?;
    Ok(exit_code_for(&reports, output.fail_on_failure))
}

fn handle_project(dir: &Path, output: OutputArgs, options: ValidationOptions) -> anyhow::Result<i32> {
    let reports = NetguardCore::validate_project(dir, &options)
        .with_context(|| format!("failed to validate project {}", dir.display()))?;
    tracing::debug!("Validated {} file(s) under {}", reports.len(), dir.display());
    output_results(&reports, &output.format)?;
    Ok(exit_code_for(&reports, output.fail_on_failure))
}

fn exit_code_for(reports: &[ValidationReport], fail_on_failure: bool) -> i32 {
    if fail_on_failure && reports.iter().any(|r| r.has_failures()) {
        1
    } else {
        0
    }
}

fn output_results(reports: &[ValidationReport], format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => output_human(reports),
        OutputFormat::Json => output_json(reports)?,
        OutputFormat::Document => output_documents(reports)?,
        OutputFormat::Github => output_github(reports),
    }
    Ok(())
}

fn display_file(report: &ValidationReport) -> String {
    report
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string())
}

fn affected_ids(result: &ValidationResult) -> Vec<&str> {
    result
        .component_ids
        .iter()
        .chain(result.net_ids.iter())
        .flatten()
        .map(String::as_str)
        .collect()
}

fn output_human(reports: &[ValidationReport]) {
    for report in reports {
        println!("\nFile: {}", display_file(report));
        println!("{}", "─".repeat(60));

        for result in &report.results {
            let mark = if result.passed() { "PASS" } else { "FAIL" };
            println!("  [{}] {:<24} {}", mark, result.rule, result.message);
            let ids = affected_ids(result);
            if result.failed() && !ids.is_empty() {
                println!("         {}", ids.join(", "));
            }
        }

        println!("\n  Summary: {}", report.stats.badge());
        println!("    Passed: {}", report.stats.passed);
        println!("    Failed: {}", report.stats.failed);
    }
}

fn output_json(reports: &[ValidationReport]) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "results": reports,
        "summary": {
            "total_files": reports.len(),
            "files_with_failures": reports.iter().filter(|r| r.has_failures()).count(),
            "failed_rules": reports.iter().map(|r| r.stats.failed).sum::<usize>(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_documents(reports: &[ValidationReport]) -> anyhow::Result<()> {
    let mut documents = Vec::new();
    for report in reports {
        let name = report
            .file
            .as_deref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or("netlist")
            .to_string();
        documents.push(NetlistDocument::from_report(name, None, report)?);
    }
    let output = if documents.len() == 1 {
        serde_json::to_string_pretty(&documents[0])?
    } else {
        serde_json::to_string_pretty(&documents)?
    };
    println!("{}", output);
    Ok(())
}

fn output_github(reports: &[ValidationReport]) {
    for report in reports {
        for result in report.failures() {
            let ids = affected_ids(result);
            let detail = if ids.is_empty() {
                String::new()
            } else {
                format!(" ({})", ids.join(", "))
            };
            println!(
                "::error file={},title={}::{}{}",
                display_file(report),
                result.rule,
                result.message.replace('\n', " "),
                detail
            );
        }
    }
}

fn handle_rules(verbose: bool) {
    println!("Available validation rules:\n");

    let engine = RulesEngine::with_default_rules();
    for (position, rule) in engine.rules().enumerate() {
        let ids: Vec<&str> = rule.ids().iter().map(|id| id.as_str()).collect();
        println!("  {}. {}", position + 1, ids.join(" | "));
        println!("    {}", rule.name());
        if verbose {
            println!("    {}", rule.description());
        }
        println!();
    }
}

fn handle_stats(file: &Path) -> anyhow::Result<i32> {
    let netlist =
        parse_netlist(file).with_context(|| format!("failed to read {}", file.display()))?;
    let graph = NetlistGraph::build(&netlist);
    let summary = graph.connectivity().summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(0)
}
