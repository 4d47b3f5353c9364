//! docsift CLI - PDF outlines and persona-driven section ranking

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::embed::ollama::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use docsift::pipeline::{document_name, list_pdfs};
use docsift::render::{to_json, write_json};
use docsift::{
    AnalysisRun, AnalyzeOptions, Analyzer, Embedder, HashedEmbedder, JsonFormat, OllamaEmbedder,
    OutOfRange, ParseOptions, TopSizes,
};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Outline PDFs and rank their sections for a persona", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the most relevant section of every PDF in a directory
    Analyze {
        /// Directory containing PDF files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Who the ranking is for
        #[arg(short, long, env = "DOCSIFT_PERSONA")]
        persona: String,

        /// The task the persona wants done
        #[arg(short, long, env = "DOCSIFT_JOB")]
        job: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        embedding: EmbeddingArgs,

        #[command(flatten)]
        outline: OutlineArgs,

        /// Load and score documents in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Write the title and outline of each PDF as JSON
    Outline {
        /// PDF file or directory of PDF files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory (defaults to the input directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        outline: OutlineArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct EmbeddingArgs {
    /// Embedding backend
    #[arg(long, value_enum, default_value = "hashed", env = "DOCSIFT_EMBEDDER")]
    embedder: EmbedderKind,

    /// Ollama server address
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "DOCSIFT_OLLAMA_URL")]
    ollama_url: String,

    /// Ollama embedding model
    #[arg(long, default_value = DEFAULT_MODEL, env = "DOCSIFT_OLLAMA_MODEL")]
    ollama_model: String,

    /// Ollama request timeout in seconds
    #[arg(long, default_value = "30")]
    ollama_timeout: u64,
}

#[derive(clap::Args)]
struct OutlineArgs {
    /// Give headings below the third size tier the H3 level instead of dropping them
    #[arg(long)]
    demote: bool,

    /// Fail a document on its first undecodable page
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EmbedderKind {
    /// Offline feature hashing
    Hashed,
    /// Local Ollama server
    Ollama,
    /// In-process all-MiniLM-L6-v2
    #[cfg(feature = "fastembed")]
    Minilm,
}

impl EmbeddingArgs {
    fn build(&self) -> Result<Box<dyn Embedder>, Box<dyn std::error::Error>> {
        Ok(match self.embedder {
            EmbedderKind::Hashed => Box::new(HashedEmbedder::default()),
            EmbedderKind::Ollama => Box::new(OllamaEmbedder::with_timeout(
                &self.ollama_url,
                &self.ollama_model,
                Duration::from_secs(self.ollama_timeout),
            )?),
            #[cfg(feature = "fastembed")]
            EmbedderKind::Minilm => Box::new(docsift::MiniLmEmbedder::new()?),
        })
    }
}

impl OutlineArgs {
    fn options(&self) -> AnalyzeOptions {
        let policy = if self.demote {
            OutOfRange::Demote
        } else {
            OutOfRange::Drop
        };
        let parse = if self.strict {
            ParseOptions::new().strict()
        } else {
            ParseOptions::new().lenient()
        };
        AnalyzeOptions::new()
            .with_level_strategy(TopSizes::new().with_out_of_range(policy))
            .with_parse_options(parse)
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            persona,
            job,
            output,
            compact,
            embedding,
            outline,
            parallel,
        } => cmd_analyze(
            &input,
            &persona,
            &job,
            output.as_deref(),
            json_format(compact),
            &embedding,
            outline.options().with_parallel(parallel),
        ),
        Commands::Outline {
            input,
            output,
            compact,
            outline,
        } => cmd_outline(
            &input,
            output.as_deref(),
            json_format(compact),
            outline.options(),
        ),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress_bar(len: usize) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn cmd_analyze(
    input: &Path,
    persona: &str,
    job: &str,
    output: Option<&Path>,
    format: JsonFormat,
    embedding: &EmbeddingArgs,
    options: AnalyzeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let embedder = embedding.build()?;
    let parallel = options.parallel;
    let analyzer = Analyzer::with_options(embedder.as_ref(), options);

    let paths = list_pdfs(input)?;
    let names: Vec<String> = paths.iter().map(|p| document_name(p)).collect();
    let pb = progress_bar(paths.len())?;

    let (loaded, failures) = if parallel {
        pb.set_message("Loading documents...");
        let result = analyzer.load_all(&paths);
        pb.set_position(paths.len() as u64);
        result
    } else {
        let mut loaded = Vec::new();
        let mut failures = Vec::new();
        for path in &paths {
            pb.set_message(document_name(path));
            let (mut ok, mut failed) = analyzer.load_all(std::slice::from_ref(path));
            loaded.append(&mut ok);
            failures.append(&mut failed);
            pb.inc(1);
        }
        (loaded, failures)
    };

    pb.set_message("Ranking sections...");
    let report = analyzer.analyze_loaded(names, &loaded, persona, job);
    pb.finish_and_clear();

    let run = AnalysisRun { report, failures };
    for failure in &run.failures {
        eprintln!(
            "{} {}: {}",
            "Skipped".yellow(),
            failure.document,
            failure.reason
        );
    }

    match output {
        Some(path) => {
            write_json(&run.report, path, format)?;
            println!(
                "{} {} sections from {} documents",
                "Ranked".green().bold(),
                run.report.extracted_sections.len(),
                run.report.metadata.input_documents.len()
            );
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", to_json(&run.report, format)?),
    }

    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    format: JsonFormat,
    options: AnalyzeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let (paths, default_dir) = if input.is_dir() {
        (list_pdfs(input)?, input.to_path_buf())
    } else {
        let parent = input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        (vec![input.to_path_buf()], parent)
    };
    let output_dir = output.map(Path::to_path_buf).unwrap_or(default_dir);
    fs::create_dir_all(&output_dir)?;

    let embedder = HashedEmbedder::default();
    let analyzer = Analyzer::with_options(&embedder, options);
    let pb = progress_bar(paths.len())?;

    let mut written = Vec::new();
    let mut failed = 0usize;
    for path in &paths {
        pb.set_message(document_name(path));
        match analyzer.outline_file(path) {
            Ok(outline) => {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                let target = output_dir.join(format!("{}.json", stem));
                write_json(&outline, &target, format)?;
                log::info!("{}: {} headings", path.display(), outline.len());
                written.push(target);
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Skipped".yellow(), path.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("\n{}", "Output files:".green().bold());
    for (i, target) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), target.display());
    }
    if failed > 0 {
        println!("{} {} documents failed", "Warning:".yellow().bold(), failed);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona-driven section ranking");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_args() {
        let cli = Cli::try_parse_from([
            "docsift",
            "analyze",
            "pdfs",
            "--persona",
            "Travel Planner",
            "--job",
            "Plan a trip",
            "--compact",
            "--demote",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                persona,
                compact,
                outline,
                embedding,
                ..
            } => {
                assert_eq!(persona, "Travel Planner");
                assert!(compact);
                assert!(outline.demote);
                assert!(matches!(embedding.embedder, EmbedderKind::Hashed));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_outline_writes_nothing_for_empty_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out");
        cmd_outline(dir.path(), Some(&out), JsonFormat::Pretty, AnalyzeOptions::new()).unwrap();
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }
}
