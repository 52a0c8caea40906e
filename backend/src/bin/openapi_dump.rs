//! Write the Mount Manager OpenAPI document as JSON.
//!
//! Prints to stdout unless `--output <path>` is given.

use std::io::Write as _;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use mount_manager::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Dump the Mount Manager OpenAPI document")]
struct Args {
    /// Destination file; stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise OpenAPI document")?;

    match args.output {
        Some(path) => std::fs::write(&path, document)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => writeln!(std::io::stdout().lock(), "{document}")
            .wrap_err("failed to write to stdout")?,
    }
    Ok(())
}
