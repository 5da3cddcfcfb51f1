use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod input;
mod solve;

use cli::Cli;
use input::ReaderSource;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let reader: Box<dyn BufRead> = match &cli.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut source = ReaderSource::new(reader);

    let mut stderr = io::stderr();
    let prompt: Option<&mut dyn Write> = if cli.prompt {
        Some(&mut stderr)
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    solve::run(&cli, &mut source, prompt, &mut out)?;
    out.flush()?;
    Ok(())
}
