use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Documentation server for the Model Context Protocol
///
/// Serves a markdown documentation tree to MCP clients like Claude Code and
/// Gemini CLI over stdio.
#[derive(Parser, Debug)]
#[command(name = "docmcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Documentation root directory
    ///
    /// If not specified, attempts to auto-detect by walking up from the
    /// current directory looking for a `docs` folder.
    #[arg(short, long)]
    docs_root: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true);

    // stdout carries the protocol, so logs go to stderr or a file
    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn detect_docs_root(provided: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = provided {
        return Ok(path.canonicalize()?);
    }

    // Walk up from the current directory looking for a docs folder
    let current_dir = std::env::current_dir()?;
    let mut dir = current_dir.as_path();

    loop {
        let docs_dir = dir.join("docs");
        if docs_dir.is_dir() {
            info!("Detected docs root: {}", docs_dir.display());
            return Ok(docs_dir);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    // Fall back to ./docs; the scanner treats a missing root as an empty corpus
    info!("Using ./docs as docs root");
    Ok(current_dir.join("docs"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    setup_logging(&args.log_level, args.log_file)?;

    info!("Starting DOCMCP v{}", env!("CARGO_PKG_VERSION"));

    // Resolve the documentation root
    let docs_root = detect_docs_root(args.docs_root)?;
    info!("Docs root: {}", docs_root.display());

    let config = std::sync::Arc::new(docmcp::DocsConfig::new(docs_root));

    // Create MCP server
    let server = docmcp::McpServer::new(config);

    info!("DOCMCP server starting - ready to accept MCP requests on stdio");

    // Run MCP server (this blocks until the client disconnects)
    match server.run().await {
        Ok(()) => {
            info!("MCP server stopped normally");
        }
        Err(e) => {
            eprintln!("MCP server error: {}", e);
            return Err(e);
        }
    }

    info!("DOCMCP shut down successfully");

    Ok(())
}
