//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::article::{
    examples::missing_files, ArticleProcessor, ArticleResult, ProcessingRequest,
    ProcessingState, FEW_SHOT_EXAMPLES,
};
use crate::cli::args::{ConfigCommand, ProcessArgs};
use crate::config::{ensure_api_key, Settings};
use crate::llm::{build_provider, PromptBuilder};
use crate::storage::{render_metadata, save_result};
use crate::MaqalError;

/// Convert one article and optionally save the results
pub async fn process_article(settings: &Settings, args: ProcessArgs) -> Result<()> {
    let article_text = read_article(args.input.as_deref())?;
    if article_text.trim().is_empty() {
        return Err(MaqalError::EmptyArticle.into());
    }

    let filename = args
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);
    if !args.no_save && filename.is_none() {
        return Err(MaqalError::MissingFilename)
            .context("Pass --filename, or --no-save to only preview the result");
    }

    let date = if args.today {
        Some(today())
    } else {
        args.date.clone()
    };

    let request = ProcessingRequest {
        article_text,
        date,
        output_filename: filename.clone(),
        author: args.author.clone(),
    };

    let prompts = PromptBuilder::from_examples_dir(&settings.general.examples_dir)?;

    let mut settings = settings.clone();
    ensure_api_key(&mut settings)?;
    let provider = build_provider(&settings)?;

    let processor = ArticleProcessor::new(Arc::from(provider), prompts);
    let progress = tokio::spawn(report_progress(processor.subscribe()));

    let outcome = processor.process(&request).await;
    // Closing the channel ends the progress task.
    drop(processor);
    let _ = progress.await;
    let result = outcome?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_preview(&result)?;
    }

    if args.no_save {
        return Ok(());
    }

    // Checked above: saving requires a filename.
    let Some(base) = filename else {
        return Ok(());
    };
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| settings.general.output_dir.clone());

    let saved = save_result(&result, &output_dir, &base, args.image.as_deref())
        .context("Failed to save files")?;

    eprintln!();
    eprintln!("Files saved successfully:");
    eprintln!("  Markdown: {}", saved.markdown.display());
    eprintln!("  JSON: {}", saved.metadata.display());
    if let Some(image) = saved.image {
        eprintln!("  Image: {}", image.display());
    }

    Ok(())
}

fn read_article(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read article: {}", path.display())),
        _ => {
            if let Some(hint) = stdin_hint(std::io::stdin().is_terminal()) {
                eprintln!("{hint}");
            }

            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read article from stdin")?;
            Ok(text)
        }
    }
}

/// Shown before blocking on an interactive stdin.
fn stdin_hint(is_terminal: bool) -> Option<&'static str> {
    is_terminal.then_some("Reading article from stdin, end with Ctrl-D")
}

fn today() -> String {
    Local::now().format("%-d %b %Y").to_string()
}

async fn report_progress(mut states: tokio::sync::watch::Receiver<ProcessingState>) {
    while states.changed().await.is_ok() {
        let state = states.borrow_and_update().clone();
        match state {
            ProcessingState::Processing => eprintln!("Processing article..."),
            ProcessingState::Done | ProcessingState::Failed(_) => break,
            ProcessingState::Idle => {}
        }
    }
}

fn print_preview(result: &ArticleResult) -> Result<()> {
    println!("Markdown:");
    println!("{}", result.markdown);
    println!();
    println!("Metadata:");
    println!("{}", render_metadata(&result.metadata)?);

    if !result.clarifying_questions.is_empty() {
        println!();
        println!("The following information is needed from you:");
        for question in &result.clarifying_questions {
            println!("- {}", question);
        }
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(&redacted(settings))?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn redacted(settings: &Settings) -> Settings {
    let mut settings = settings.clone();
    if settings.has_api_key() {
        settings.llm.api_key = "********".to_string();
    }
    settings
}

#[derive(Serialize)]
struct DoctorCheck {
    name: String,
    status: &'static str,
    detail: String,
}

#[derive(Serialize)]
struct DoctorReport {
    provider: String,
    model: String,
    examples_dir: PathBuf,
    output_dir: PathBuf,
    checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    fn is_ready(&self) -> bool {
        self.checks.iter().all(|c| c.status == "ok")
    }
}

/// Run diagnostic checks to help troubleshoot local setup issues.
pub async fn run_doctor(settings: &Settings, json: bool) -> Result<()> {
    let report = collect_doctor_report(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("maqal doctor");
    println!("provider: {} ({})", report.provider, report.model);
    println!("examples: {}", report.examples_dir.display());
    println!("output:   {}", report.output_dir.display());
    println!();

    for check in &report.checks {
        println!("{:<22} {:<8} {}", check.name, check.status, check.detail);
    }

    if !report.is_ready() {
        println!();
        println!("warning: processing will fail until the checks above pass.");
    }

    Ok(())
}

fn collect_doctor_report(settings: &Settings) -> DoctorReport {
    let mut checks = vec![DoctorCheck {
        name: "api-key".to_string(),
        status: if settings.has_api_key() { "ok" } else { "missing" },
        detail: "llm.api_key, MAQAL_GEMINI_API_KEY or GOOGLE_API_KEY (prompted when interactive)"
            .to_string(),
    }];

    for name in FEW_SHOT_EXAMPLES {
        let missing = missing_files(&settings.general.examples_dir, name);
        let detail = if missing.is_empty() {
            "txt, md and json present".to_string()
        } else {
            missing
                .iter()
                .map(|p| format!("missing {}", p.display()))
                .collect::<Vec<_>>()
                .join(", ")
        };
        checks.push(DoctorCheck {
            name: format!("example:{name}"),
            status: if missing.is_empty() { "ok" } else { "missing" },
            detail,
        });
    }

    DoctorReport {
        provider: settings.llm.provider.clone(),
        model: settings.llm.model.clone(),
        examples_dir: settings.general.examples_dir.clone(),
        output_dir: settings.general.output_dir.clone(),
        checks,
    }
}
