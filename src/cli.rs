// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::{ConfigManager, ScoringClient};
use crate::notify::{ConsoleNotifier, Notifier, Severity};
use crate::render::ResultRenderer;
use crate::submission::{SubmissionController, SubmitOutcome};
use crate::theme::ThemeManager;
use crate::types::{SessionHandle, UploadFile};

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Score a resume against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, default_value = "/tmp/resume-scorer.log")]
    pub log_file: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit a resume and job description for scoring
    Score {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long, conflicts_with = "job_file", required_unless_present = "job_file")]
        job_description: Option<String>,
        /// Read the job description from a text file
        #[arg(long)]
        job_file: Option<PathBuf>,
        /// Save a JSON report into the configured report directory
        #[arg(long)]
        report: bool,
        /// Save a JSON report into this directory
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },
    /// Check that the scoring service is reachable
    Health,
    /// Show or switch the color theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

pub async fn handle_command(command: Command, config: ConfigManager) -> Result<()> {
    match command {
        Command::Score {
            resume,
            job_description,
            job_file,
            report,
            report_dir,
        } => {
            let job_description = match (job_description, job_file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read job description: {}", path.display()))?,
                (None, None) => anyhow::bail!("Provide --job-description or --job-file"),
            };
            let report_dir = report_dir.or_else(|| report.then(|| config.paths.report_dir.clone()));

            score(&config, resume, &job_description, report_dir).await
        }

        Command::Health => {
            let client = ScoringClient::new(config.service.base_url.clone())?;
            let health = client.health().await?;
            if health.is_ok() {
                println!(
                    "✓ {} is up at {}",
                    health.service.as_deref().unwrap_or("Scoring service"),
                    client.base_url()
                );
                Ok(())
            } else {
                anyhow::bail!("Scoring service reported status: {}", health.status)
            }
        }

        Command::Theme { toggle } => {
            let mut manager = ThemeManager::load(&config.paths.theme_path).await?;
            if toggle {
                let theme = manager.toggle().await?;
                ConsoleNotifier.notify(&format!("Switched to {} theme", theme), Severity::Info);
            } else {
                println!("Current theme: {}", manager.current());
            }
            Ok(())
        }
    }
}

async fn score(
    config: &ConfigManager,
    resume: PathBuf,
    job_description: &str,
    report_dir: Option<PathBuf>,
) -> Result<()> {
    let endpoint = Arc::new(ScoringClient::new(config.service.base_url.clone())?);
    let renderer = ResultRenderer::headless(config.render.timing());
    let controller = SubmissionController::new(endpoint, renderer, Arc::new(ConsoleNotifier));

    let file = UploadFile::from_path(&resume).await?;
    if let Some(file_info) = controller.select_file(Some(file)) {
        println!("📄 {} ({})", file_info.name, file_info.size);
    }

    match controller.submit_pending(job_description).await {
        SubmitOutcome::Succeeded(session) => {
            print_results(&controller, &session);
            if let Some(dir) = report_dir {
                let path = controller.download_report(&dir).await?;
                println!("  📁 {}", path.display());
            }
            Ok(())
        }
        SubmitOutcome::Rejected(err) => anyhow::bail!("Invalid submission: {}", err),
        SubmitOutcome::Failed => {
            error!("Scoring failed for {}", resume.display());
            anyhow::bail!("Analysis failed")
        }
        other => anyhow::bail!("Submission did not complete: {:?}", other),
    }
}

fn print_results(controller: &SubmissionController, session: &SessionHandle) {
    let view = controller.results();
    info!("Printing results for session {}", session);

    println!();
    println!("Session: {}", session);
    println!("Overall score: {}", view.score.as_deref().unwrap_or("N/A"));
    if let Some(description) = &view.score_description {
        println!("  {}", description);
    }

    for chart in controller.renderer().charts() {
        println!();
        println!("{} ({:?})", chart.title, chart.kind);
        if chart.series.is_empty() {
            println!("  no data");
            continue;
        }
        let values = chart
            .series
            .datasets
            .first()
            .map(|dataset| dataset.data.as_slice())
            .unwrap_or_default();
        for (label, value) in chart.series.labels.iter().zip(values) {
            println!("  {:<30} {:>6.1}", label, value);
        }
    }

    print_panel("Additional points", view.additional_points.as_deref());
    print_panel("Improvements", view.improvements.as_deref());
}

fn print_panel(title: &str, items: Option<&[String]>) {
    let Some(items) = items else {
        return;
    };
    println!();
    println!("{}", title);
    for item in items {
        println!("  • {}", item);
    }
}
