use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use resumo_core::{
    AnalysisSession, Config, ExportFormat, Exporter, ReportView, ResumoError, SampleProvider,
    SectionKey, SessionError, SystemClipboard,
    export::json::load_document,
    load_config,
    logging::{LogConfig, LogFormat, init_logging},
};

mod display;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for ExportFormat (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliFormat {
    #[value(alias = "txt")]
    Text,
    Json,
    Pdf,
    Docx,
}

impl From<CliFormat> for ExportFormat {
    fn from(cli: CliFormat) -> Self {
        match cli {
            CliFormat::Text => ExportFormat::Text,
            CliFormat::Json => ExportFormat::Json,
            CliFormat::Pdf => ExportFormat::Pdf,
            CliFormat::Docx => ExportFormat::Docx,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliSection {
    #[value(alias = "keyConcepts")]
    KeyConcepts,
    #[value(alias = "mainPoints")]
    MainPoints,
    #[value(alias = "importantContexts")]
    ImportantContexts,
    #[value(alias = "learningStructure")]
    LearningStructure,
    #[value(alias = "studyTechniques")]
    StudyTechniques,
    #[value(alias = "studyQuestions")]
    StudyQuestions,
}

impl From<CliSection> for SectionKey {
    fn from(cli: CliSection) -> Self {
        match cli {
            CliSection::KeyConcepts => SectionKey::KeyConcepts,
            CliSection::MainPoints => SectionKey::MainPoints,
            CliSection::ImportantContexts => SectionKey::ImportantContexts,
            CliSection::LearningStructure => SectionKey::LearningStructure,
            CliSection::StudyTechniques => SectionKey::StudyTechniques,
            CliSection::StudyQuestions => SectionKey::StudyQuestions,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum CliLogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(cli: CliLogFormat) -> Self {
        match cli {
            CliLogFormat::Pretty => LogFormat::Pretty,
            CliLogFormat::Compact => LogFormat::Compact,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "resumo")]
#[command(about = "Analyze YouTube videos into structured study reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, default_value = "pretty")]
    log_format: CliLogFormat,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a video and print the report
    Analyze {
        /// Video URL
        url: String,

        /// Export the report in this format (repeatable)
        #[arg(short, long = "format")]
        formats: Vec<CliFormat>,

        /// Collapse a section in the printed report and the PDF (repeatable)
        #[arg(long)]
        collapse: Vec<CliSection>,

        /// Copy the full text report to the clipboard
        #[arg(long)]
        copy: bool,

        /// Output directory for exports (defaults to the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a previously exported JSON report
    Show {
        file: PathBuf,

        #[arg(long)]
        collapse: Vec<CliSection>,
    },

    /// Export a previously exported JSON report to other formats
    Export {
        file: PathBuf,

        #[arg(short, long = "format", required = true)]
        formats: Vec<CliFormat>,

        #[arg(long)]
        collapse: Vec<CliSection>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn apply_collapse(view: &mut ReportView, collapse: &[CliSection]) {
    for section in collapse {
        view.toggles_mut().set_open((*section).into(), false);
    }
}

fn exporter_for(config: &Config, output: Option<PathBuf>) -> Exporter {
    match output {
        Some(dir) => Exporter::new(dir, config.pdf.clone()),
        None => Exporter::from_config(config),
    }
}

async fn run_exports(exporter: &Exporter, view: &ReportView, formats: &[CliFormat]) -> Result<()> {
    for format in formats {
        let format: ExportFormat = (*format).into();
        match exporter
            .export_format(format, view.document(), Some(view))
            .await
        {
            Ok(Some(path)) => println!(
                "{} Saved {}",
                style("✓").green().bold(),
                style(path.display()).cyan()
            ),
            Ok(None) => println!(
                "{} Nothing to export as {}",
                style("-").dim(),
                format.extension()
            ),
            Err(ResumoError::FontNotFound { searched }) => eprintln!(
                "{} PDF export needs a TrueType font family; set pdf.font_dir in the config (searched: {})",
                style("Error:").red().bold(),
                searched
            ),
            Err(e) => {
                return Err(e).with_context(|| format!("{} export failed", format.extension()));
            }
        }
    }
    Ok(())
}

async fn analyze(
    config: &Config,
    url: String,
    formats: &[CliFormat],
    collapse: &[CliSection],
    copy: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let provider = SampleProvider::new(config.provider.latency());
    let mut session = AnalysisSession::new();
    session.set_url(url);

    println!(
        "\n{}  {}\n",
        style("resumo").cyan().bold(),
        style("Video Analyzer").dim()
    );

    let step_start = Instant::now();
    let spinner = create_spinner("Analyzing video...");
    let view = match session.analyze(&provider).await {
        Ok(view) => {
            spinner.finish_with_message(format!(
                "{} Analysis complete {}",
                style("✓").green().bold(),
                style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
            ));
            view
        }
        Err(ResumoError::Session(SessionError::EmptyUrl)) => {
            spinner.finish_and_clear();
            eprintln!(
                "{} {}",
                style("Error:").red().bold(),
                SessionError::EmptyUrl
            );
            std::process::exit(1);
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).context("analysis failed");
        }
    };

    apply_collapse(view, collapse);

    println!("{}", style("─".repeat(60)).dim());
    println!("{}", display::render_report(view));

    if copy {
        match SystemClipboard::new() {
            Ok(mut clipboard) => {
                if view.copy_report(&mut clipboard, Instant::now()) {
                    println!("{} Copiado!", style("✓").green().bold());
                }
            }
            Err(e) => tracing::warn!("clipboard unavailable: {e}"),
        }
    }

    if !formats.is_empty() {
        run_exports(&exporter_for(config, output), view, formats).await?;
    }
    Ok(())
}

async fn load_view(file: &Path, collapse: &[CliSection]) -> Result<ReportView> {
    let doc = load_document(file)
        .await
        .with_context(|| format!("failed to load report {}", file.display()))?;
    let mut view = ReportView::new(Arc::new(doc));
    apply_collapse(&mut view, collapse);
    Ok(view)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format.into()));

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(output_dir = %config.output_dir.display(), "configuration loaded");

    match cli.command {
        Command::Analyze {
            url,
            formats,
            collapse,
            copy,
            output,
        } => analyze(&config, url, &formats, &collapse, copy, output).await,
        Command::Show { file, collapse } => {
            let view = load_view(&file, &collapse).await?;
            println!("{}", display::render_report(&view));
            Ok(())
        }
        Command::Export {
            file,
            formats,
            collapse,
            output,
        } => {
            let view = load_view(&file, &collapse).await?;
            run_exports(&exporter_for(&config, output), &view, &formats).await
        }
    }
}
