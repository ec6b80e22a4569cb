//! Jargon - glossary annotations for project documents
//!
//! Entry point for the `jargon` binary: the stdio language server editors
//! launch, plus a few commands for checking documents from a terminal.

use clap::{Parser, Subcommand};
use jargon_core::{
    error::{JargonError, Result},
    report::AnnotationRenderer,
    lsp, GlossaryLoader, JargonConfig, Scanner,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "jargon")]
#[command(about = "Explain project jargon where it appears", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Configuration file (TOML)
    #[arg(long, env = "JARGON_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the language server (stdio mode)
    Serve,

    /// Annotate files and print every jargon occurrence
    Check {
        /// Files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Workspace roots holding glossary files (default: current directory)
        #[arg(short, long = "root")]
        roots: Vec<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Stop annotating a term in a namespace
    Known {
        /// Namespace the term belongs to
        namespace: String,

        /// Term name
        term: String,

        /// Workspace root whose known-terms file is updated
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// List namespaces with their term counts
    Namespaces {
        /// Workspace roots holding glossary files (default: current directory)
        #[arg(short, long = "root")]
        roots: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!(
        "jargon={0},jargon_core={0}",
        level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    debug!("Jargon v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => JargonConfig::load(path)?,
        None => JargonConfig::default(),
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            lsp::serve(config).await;
            Ok(())
        }
        Commands::Check {
            files,
            roots,
            no_color,
        } => {
            let color = !no_color && std::io::stdout().is_terminal();
            let count = check_files(config, &files, &default_roots(roots), color)?;
            eprintln!("{} jargon occurrence(s) in {} file(s)", count, files.len());
            Ok(())
        }
        Commands::Known {
            namespace,
            term,
            root,
        } => {
            let loader = GlossaryLoader::new(config);
            if loader.persist_known(&root, &namespace, &term)? {
                println!(
                    "'{}' is now known in '{}' ({})",
                    term,
                    namespace,
                    loader.known_terms_path(&root).display()
                );
            } else {
                println!("'{}' was already known in '{}'", term, namespace);
            }
            Ok(())
        }
        Commands::Namespaces { roots } => {
            let loader = GlossaryLoader::new(config);
            let glossary = loader.compile_required(&default_roots(roots))?;

            for namespace in glossary.namespaces() {
                println!(
                    "{:<24} {:>5} entries {:>5} known",
                    namespace.to_string(),
                    namespace.terms.len(),
                    namespace.known_terms.len()
                );
            }
            Ok(())
        }
    }
}

fn default_roots(roots: Vec<PathBuf>) -> Vec<PathBuf> {
    if roots.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        roots
    }
}

/// Scan `files` and print rendered annotations; returns the total count
fn check_files(
    config: JargonConfig,
    files: &[PathBuf],
    roots: &[PathBuf],
    color: bool,
) -> Result<usize> {
    let loader = GlossaryLoader::new(config);
    let glossary = loader.compile_required(roots)?;
    let scanner = Scanner::new();
    let renderer = AnnotationRenderer::new(color);

    let mut total = 0;
    for file in files {
        let location = file
            .canonicalize()
            .unwrap_or_else(|_| file.clone())
            .display()
            .to_string();
        if loader.is_glossary_document(&location) {
            debug!("Skipping glossary file {}", location);
            continue;
        }

        let text = std::fs::read_to_string(file).map_err(|e| {
            JargonError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", file.display(), e),
            ))
        })?;

        let annotations = scanner.scan(&glossary, &location, &text)?;
        print!(
            "{}",
            renderer.render_all(&annotations, &file.display().to_string(), &text)?
        );
        total += annotations.len();
    }

    Ok(total)
}
