use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use identscore_core::config::{Config, ReportFormat, CONFIG_FILE_NAME};
use identscore_core::extractor::LanguageExtractor;
use identscore_core::pipeline::{discover_files, PipelineError, ScoringPipeline};
use identscore_core::scorer::EntityScorer;
use identscore_core::types::{EntityKind, Language};
use identscore_core::vocabulary::Vocabulary;

use identscore_cpp::CppExtractor;
use identscore_csharp::CSharpExtractor;
use identscore_java::JavaExtractor;
use identscore_javascript::JavaScriptExtractor;
use identscore_python::PythonExtractor;
use identscore_report::text;

#[derive(Parser)]
#[command(name = "identscore")]
#[command(about = "Score how readable the identifiers in a codebase are")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every identifier in a file or directory and write reports
    Analyze {
        /// File or directory to analyze
        path: PathBuf,
        /// Source language: java, csharp, python, javascript or cpp
        #[arg(short, long)]
        language: Option<Language>,
        /// Newline-delimited word list (overrides the config file)
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
        /// Config file path (defaults to .identscore.toml in the analyzed directory or above)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory for report files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Report formats, comma separated: csv, json, text
        #[arg(short, long, value_delimiter = ',')]
        format: Vec<ReportFormat>,
        /// Only print errors
        #[arg(short, long)]
        quiet: bool,
    },
    /// Score identifiers given on the command line
    Score {
        /// Identifiers to score
        #[arg(required = true)]
        identifiers: Vec<String>,
        /// Newline-delimited word list (overrides the config file)
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
        /// Treat identifiers as dotted import paths
        #[arg(long)]
        import: bool,
    },
    /// Create a default .identscore.toml configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

struct AnalyzeArgs {
    path: PathBuf,
    language: Option<Language>,
    dictionary: Option<PathBuf>,
    config: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    formats: Vec<ReportFormat>,
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            path,
            language,
            dictionary,
            config,
            output_dir,
            format,
            quiet,
        } => cmd_analyze(AnalyzeArgs {
            path,
            language,
            dictionary,
            config,
            output_dir,
            formats: format,
            quiet,
        }),
        Commands::Score {
            identifiers,
            dictionary,
            import,
        } => cmd_score(&identifiers, dictionary.as_deref(), import).map(|()| 0),
        Commands::Init { force } => cmd_init(force).map(|()| 0),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Returns the process exit code: 0 on success, 1 when a report could not be written.
fn cmd_analyze(args: AnalyzeArgs) -> Result<i32> {
    let config = load_config(&args.path, args.config.as_deref())?;

    let language = args
        .language
        .or(config.project.language)
        .context("no language given. Pass --language or set `language` under [project] in .identscore.toml")?;

    let files = discover_files(&args.path, language, &config.project.exclude_patterns)?;
    tracing::info!(
        language = %language,
        files = files.len(),
        "discovered source files"
    );

    let dictionary = args
        .dictionary
        .unwrap_or_else(|| config.vocabulary.dictionary.clone());
    let pipeline = ScoringPipeline::new(
        extractor_for(language)?,
        EntityScorer::new(load_vocabulary(&dictionary, &config)),
        config.extraction.excluded(),
    );

    let result = match pipeline.run(&files) {
        Ok(result) => result,
        Err(PipelineError::NothingToAnalyze { language }) => {
            println!(
                "No valid {} files found in {}.",
                language.report_name(),
                args.path.display()
            );
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    };

    let formats = if args.formats.is_empty() {
        config.report.formats.clone()
    } else {
        args.formats
    };
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.report.output_dir.clone());

    let mut failed = 0usize;
    for format in formats {
        if format == ReportFormat::Text {
            print!("{}", text::format_report(&result));
            continue;
        }
        for written in identscore_report::write_reports(&result, format, &output_dir) {
            match written {
                Ok(path) => {
                    if !args.quiet {
                        println!("{} {}", "Wrote".green(), path.display());
                    }
                }
                Err(e) => {
                    tracing::debug!("report write failed: {e:?}");
                    eprintln!("Error: {e}");
                    failed += 1;
                }
            }
        }
    }

    if !args.quiet {
        println!(
            "Average Comprehensibility Score: {:.2} ({} files, {} entities)",
            result.overall_average,
            result.file_results.len(),
            result.entity_count()
        );
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

fn cmd_score(identifiers: &[String], dictionary: Option<&Path>, import: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config = Config::load_or_default(&cwd);
    let dictionary = dictionary
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.vocabulary.dictionary.clone());
    let scorer = EntityScorer::new(load_vocabulary(&dictionary, &config));

    let kind = if import {
        EntityKind::Import
    } else {
        EntityKind::Variable
    };
    for identifier in identifiers {
        let breakdown = scorer.breakdown(identifier, kind);
        print!("{}", text::format_breakdown(identifier, &breakdown));
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let target = PathBuf::from(CONFIG_FILE_NAME);
    if target.exists() && !force {
        anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
    }
    std::fs::write(&target, Config::default_toml())
        .with_context(|| format!("failed to write {CONFIG_FILE_NAME}"))?;
    println!("Created {CONFIG_FILE_NAME} with default configuration.");
    Ok(())
}

fn load_config(project_path: &Path, config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => Config::load(p),
        None => Ok(Config::load_or_default(project_path)),
    }
}

fn load_vocabulary(dictionary: &Path, config: &Config) -> Vocabulary {
    Vocabulary::load_or_empty(dictionary).with_allowlist(&config.vocabulary.allowlist)
}

fn extractor_for(language: Language) -> Result<Box<dyn LanguageExtractor>> {
    let extractor: Box<dyn LanguageExtractor> = match language {
        Language::Java => Box::new(JavaExtractor::new().context("failed to initialize Java extractor")?),
        Language::CSharp => {
            Box::new(CSharpExtractor::new().context("failed to initialize C# extractor")?)
        }
        Language::Python => {
            Box::new(PythonExtractor::new().context("failed to initialize Python extractor")?)
        }
        Language::JavaScript => Box::new(
            JavaScriptExtractor::new().context("failed to initialize JavaScript extractor")?,
        ),
        Language::Cpp => {
            Box::new(CppExtractor::new().context("failed to initialize C/C++ extractor")?)
        }
    };
    Ok(extractor)
}
