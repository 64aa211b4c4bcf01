//! CLI subcommand handlers

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use prioritizer::{PriorityEngine, PriorityRun, PriorityTier};

use crate::{
    config::Config,
    frontmatter,
    loader::{self, LoadReport},
    output::OutputHandler,
    summary,
};

/// Output format for `score`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScoreFormat {
    Table,
    Json,
}

/// Everything a command needs: the loaded files and one scoring pass over them
pub struct Workspace {
    pub loaded: LoadReport,
    pub run: PriorityRun,
}

impl Workspace {
    pub fn load(dir: &Path, config: &Config) -> Result<Self> {
        let engine = PriorityEngine::new(config.scoring.clone())?;
        let loaded = loader::load_requirements(dir)?;
        let run = engine.run(loaded.records());

        if run.cycles_detected() > 0 {
            tracing::warn!(
                cycles = run.cycles_detected(),
                "Dependency cycles found; affected scores depend on visit order"
            );
        }

        Ok(Self { loaded, run })
    }
}

fn report_invalid_files(output: &OutputHandler, loaded: &LoadReport) {
    for (path, error) in &loaded.invalid {
        output.print_warning(&format!("Skipped {}: {}", path.display(), error));
    }
}

/// Print scores for every requirement
pub fn score(
    dir: &Path,
    config: &Config,
    format: ScoreFormat,
    tier: Option<PriorityTier>,
) -> Result<()> {
    let workspace = Workspace::load(dir, config)?;
    let ranked: Vec<_> = workspace
        .run
        .ranked()
        .into_iter()
        .filter(|a| tier.map_or(true, |t| a.tier == t))
        .collect();

    match format {
        ScoreFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
        ScoreFormat::Table => {
            let output = OutputHandler::new(config.display.color, config.display.show_indicators);
            report_invalid_files(&output, &workspace.loaded);
            output.print_header(&format!("Requirement Priorities ({})", ranked.len()));

            if ranked.is_empty() {
                output.print_info("No requirements found");
            } else {
                output.print_assignments_table(&ranked);
            }
        }
    }

    Ok(())
}

/// Write (or print) the markdown summary
pub fn summary(dir: &Path, config: &Config, output_path: Option<&Path>, stdout: bool) -> Result<()> {
    let workspace = Workspace::load(dir, config)?;
    let document = summary::render_markdown(&workspace.run.summary(), Utc::now());

    if stdout {
        print!("{}", document);
        return Ok(());
    }

    let path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.summary_path(dir));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, document).with_context(|| format!("Failed to write {}", path.display()))?;

    let output = OutputHandler::new(config.display.color, config.display.show_indicators);
    output.print_success(&format!("Summary written to {}", path.display()));
    Ok(())
}

/// Run validation mode. Returns `true` when no issues were found.
pub fn validate(dir: &Path, config: &Config) -> Result<bool> {
    let workspace = Workspace::load(dir, config)?;
    let report = workspace.run.validate();
    let output = OutputHandler::new(config.display.color, config.display.show_indicators);

    report_invalid_files(&output, &workspace.loaded);
    output.print_header("Priority Validation");

    for issue in &report.issues {
        output.print_issue(issue);
    }

    println!();
    if report.is_clean() {
        output.print_success(&format!("{} requirements checked, no issues", report.checked));
    } else {
        output.print_error(&format!(
            "{} requirements checked: {} score drift, {} critical but blocked",
            report.checked,
            report.drift_count(),
            report.critical_blocked_count()
        ));
    }

    Ok(report.is_clean())
}

/// A pending frontmatter change
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedUpdate {
    pub id: String,
    pub path: std::path::PathBuf,
    pub tier: PriorityTier,
    pub score: f64,
}

/// Files whose persisted priority differs from the fresh run
pub fn plan_updates(workspace: &Workspace) -> Vec<PlannedUpdate> {
    workspace
        .loaded
        .requirements
        .iter()
        .filter_map(|loaded| {
            let assignment = workspace.run.get(&loaded.record.id)?;
            // Duplicate ids: only the file that was actually scored is updated
            if workspace.loaded.path_of(&loaded.record.id) != Some(loaded.path.as_path()) {
                return None;
            }

            let score = assignment.rounded_score();
            let tier_label = assignment.tier.as_str();
            let unchanged = loaded.record.priority.as_deref() == Some(tier_label)
                && loaded.record.priority_score == Some(score);

            (!unchanged).then(|| PlannedUpdate {
                id: loaded.record.id.clone(),
                path: loaded.path.clone(),
                tier: assignment.tier,
                score,
            })
        })
        .collect()
}

/// Apply one update to its file
pub fn apply_update(update: &PlannedUpdate) -> Result<()> {
    let content = fs::read_to_string(&update.path)
        .with_context(|| format!("Failed to read {}", update.path.display()))?;
    let fields = [
        ("priority", update.tier.as_str().to_string()),
        ("priorityScore", format!("{:.1}", update.score)),
    ];

    let Some(updated) = frontmatter::set_fields(&content, &fields) else {
        anyhow::bail!("{} no longer has frontmatter", update.path.display());
    };
    fs::write(&update.path, updated)
        .with_context(|| format!("Failed to write {}", update.path.display()))?;
    Ok(())
}

/// Persist fresh priorities into requirement frontmatter
pub fn update(dir: &Path, config: &Config, dry_run: bool) -> Result<usize> {
    let workspace = Workspace::load(dir, config)?;
    let updates = plan_updates(&workspace);
    let output = OutputHandler::new(config.display.color, config.display.show_indicators);

    output.print_header(if dry_run { "Priority Update (dry run)" } else { "Priority Update" });

    for update in &updates {
        let line = format!(
            "{} → {} ({:.1})  {}",
            update.id,
            update.tier,
            update.score,
            update.path.display().to_string().dimmed()
        );
        if dry_run {
            output.print_info(&line);
        } else {
            apply_update(update)?;
            output.print_success(&line);
        }
    }

    if updates.is_empty() {
        output.print_success("All persisted priorities are current");
    } else if dry_run {
        output.print_info(&format!("{} files would change", updates.len()));
    } else {
        tracing::info!(files = updates.len(), "Updated requirement priorities");
    }

    Ok(updates.len())
}

/// Show the effective configuration
pub fn show_config(config: &Config, source: Option<&Path>, show: bool) -> Result<()> {
    let output = OutputHandler::new(config.display.color, config.display.show_indicators);
    output.print_header("Configuration");
    match source {
        Some(path) => println!("  {} {}", "Source:".dimmed(), path.display()),
        None => println!("  {} built-in defaults", "Source:".dimmed()),
    }

    match config_listing(config, show)? {
        Some(listing) => {
            println!();
            print!("{}", listing);
        }
        None => output.print_info("Run with --show to print the effective configuration"),
    }
    Ok(())
}

/// Effective configuration as TOML, only when asked for
fn config_listing(config: &Config, show: bool) -> Result<Option<String>> {
    if !show {
        return Ok(None);
    }
    Ok(Some(config.to_toml()?))
}
