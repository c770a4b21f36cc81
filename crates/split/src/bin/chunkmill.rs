//! chunkmill — split a document into retrieval-sized chunks.
//!
//! Reads a file (or stdin), runs the cleanup pass and the chunking engine,
//! and prints the resulting chunks as delimited text or JSON.

use std::io::Read;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use chunkmill_split::{clean_text, split_text, SplitConfig};

// ── CLI ─────────────────────────────────────────────────────────────

/// Split a document into bounded, overlapping chunks.
#[derive(Parser, Debug)]
#[command(name = "chunkmill", version, about)]
struct Cli {
    /// Input file; "-" or omitted reads stdin.
    input: Option<String>,

    /// Target maximum chunk size in characters.
    #[arg(long, env = "CHUNKMILL_CHUNK_LEN", default_value_t = 512)]
    chunk_len: usize,

    /// Fraction of chunk_len carried across chunk boundaries.
    #[arg(long, env = "CHUNKMILL_OVERLAP_RATIO", default_value_t = 0.2)]
    overlap_ratio: f32,

    /// Literal separator tried before the built-in ladder (repeatable).
    #[arg(long = "separator")]
    separators: Vec<String>,

    /// Skip the whitespace/control-character cleanup pass.
    #[arg(long)]
    raw: bool,

    /// Emit the result as JSON instead of delimited text.
    #[arg(long)]
    json: bool,
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let text = match cli.input.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?
        }
    };
    let text = if cli.raw { text } else { clean_text(&text) };

    let config = SplitConfig {
        chunk_len: cli.chunk_len,
        overlap_ratio: cli.overlap_ratio,
        custom_separators: cli.separators,
    };
    let result = split_text(&text, &config)?;

    info!(
        chunks = result.chunks.len(),
        chars = result.chars,
        "document split"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for (i, chunk) in result.chunks.iter().enumerate() {
            println!("── chunk {} ({} chars) ──", i, chunk.chars().count());
            println!("{chunk}");
        }
    }
    Ok(())
}
