// src/lib.rs

pub mod cli;
pub mod config;
pub mod content;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod sink;
pub mod steps;
pub mod templates;
pub mod types;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::config::loader::load_or_default;
use crate::content::{Product, sample_input};
use crate::dag::{CancelToken, SchedulerOptions, UnitGraph, default_units, validate_units};
use crate::engine::{Pipeline, RunReport};
use crate::llm::build_completion_service;
use crate::sink::FileSink;
use crate::steps::StepRunner;
use crate::types::{ExecutionMode, UnitId};

/// High-level entry point used by `main.rs`.
///
/// `.env` must already be loaded (see [`load_dotenv`]). This wires together:
/// - config loading, with CLI overrides
/// - the seed product
/// - the completion stack and step runner
/// - the pipeline and file sink
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_or_default(args.config.as_deref())?;
    apply_overrides(&mut cfg, &args);

    let raw_input = match args.input.as_deref() {
        Some(path) => load_input(path)?,
        None => sample_input(),
    };

    if args.dry_run {
        print_dry_run(&cfg, &raw_input)?;
        return Ok(());
    }

    let completion = build_completion_service(&cfg.llm)?;
    let runner = StepRunner::new(completion).with_faq_questions(cfg.run.faq_questions);
    let options = SchedulerOptions {
        mode: cfg.run.execution,
        unit_delay: cfg.run.unit_delay(),
    };
    let mut pipeline = Pipeline::new(Arc::new(runner), options)?;

    // Ctrl-C → stop before the next unit starts.
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            warn!("Ctrl+C received; cancelling after the current unit");
            cancel.cancel();
        });
    }

    let sink = FileSink::new(&cfg.output.dir);
    info!(mode = ?cfg.run.execution, output_dir = %sink.dir().display(), "starting run");

    let report = pipeline.run_to_sink(raw_input, &sink, &cancel).await?;
    print_report(&report, &sink);
    Ok(())
}

/// Outcome of loading a `.env` file.
pub type DotenvOutcome = std::result::Result<PathBuf, dotenvy::Error>;

/// Load `.env` from the working directory or one of its parents.
///
/// Call before [`logging::init_logging`] so `CONTENTDAG_LOG` can come from
/// the file. Nothing is logged here; pass the outcome to
/// [`log_dotenv_outcome`] once a subscriber is installed.
pub fn load_dotenv() -> DotenvOutcome {
    dotenvy::dotenv()
}

/// Load a specific env file. Variables already set are left alone.
pub fn load_dotenv_from(path: &Path) -> DotenvOutcome {
    dotenvy::from_path(path).map(|()| path.to_path_buf())
}

pub fn log_dotenv_outcome(outcome: &DotenvOutcome) {
    match outcome {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => debug!("no .env file found"),
        Err(e) => warn!(error = %e, "failed to load .env"),
    }
}

fn apply_overrides(cfg: &mut ConfigFile, args: &CliArgs) {
    if args.concurrent {
        cfg.run.execution = ExecutionMode::Concurrent;
    }
    if let Some(dir) = &args.output_dir {
        cfg.output.dir = dir.clone();
    }
}

fn load_input(path: &Path) -> Result<Value> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading input file {}", path.display()))?;
    let value = serde_json::from_str(&contents)
        .with_context(|| format!("parsing input file {} as JSON", path.display()))?;
    Ok(value)
}

fn print_report(report: &RunReport, sink: &FileSink) {
    println!("unit status:");
    for (unit, status) in &report.statuses {
        println!("  {unit}: {status}");
    }
    println!();
    println!("documents:");
    for doc in report.outputs.iter() {
        println!(
            "  {} -> {} (blake3 {})",
            doc.slot,
            sink.path_for(doc.slot.name()).display(),
            doc.fingerprint
        );
    }
}

/// Print the unit graph and resolved configuration without calling the model.
fn print_dry_run(cfg: &ConfigFile, raw_input: &Value) -> Result<()> {
    let product = Product::from_raw(raw_input)?;
    let units = default_units();
    validate_units(&units)?;
    let graph = UnitGraph::from_units(&units);
    let order = graph.topological_order()?;

    println!("contentdag dry-run");
    println!("  llm.base_url = {}", cfg.llm.base_url);
    println!("  llm.model = {}", cfg.llm.model);
    println!("  llm.api_key_env = {}", cfg.llm.api_key_env);
    println!("  llm.temperature = {}", cfg.llm.temperature);
    println!("  llm.max_attempts = {}", cfg.llm.max_attempts);
    println!("  run.execution = {:?}", cfg.run.execution);
    println!("  run.faq_questions = {}", cfg.run.faq_questions);
    println!("  run.unit_delay_secs = {}", cfg.run.unit_delay_secs);
    println!("  output.dir = {}", cfg.output.dir.display());
    println!("  input.name = {}", product.name);
    println!();

    println!("units ({}):", graph.units().len());
    for id in graph.units() {
        println!("  - {id}");
        let deps = graph.dependencies_of(*id);
        if !deps.is_empty() {
            println!("      after: {}", join_ids(deps));
        }
        let dependents = graph.dependents_of(*id);
        if !dependents.is_empty() {
            println!("      feeds: {}", join_ids(dependents));
        }
        if id.uses_completion() {
            println!("      calls model: true");
        }
    }
    println!();
    println!("roots: {}", join_ids(&graph.roots()));
    println!("execution order: {}", join_ids(&order));

    debug!("dry-run complete (no execution)");
    Ok(())
}

fn join_ids(ids: &[UnitId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
