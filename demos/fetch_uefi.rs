//! Run the UEFI download task once from the command line.
//!
//! Extracts into `Downloaded/UEFI` under the current directory. Set `RUST_LOG`
//! to control log output, e.g. `RUST_LOG=uefi_fetch=debug`.
//!
//! ```bash
//! cargo run --example fetch_uefi
//! ```

use tracing_subscriber::EnvFilter;
use uefi_fetch::{Config, ExtractionOutcome, UefiDownload};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let task = UefiDownload::from_config(Config::default())?;

    match task.run().await? {
        ExtractionOutcome::Skipped { destination } => {
            println!("{} already exists, nothing to do", destination.display());
        }
        ExtractionOutcome::Extracted { root, files } => {
            println!("Extracted {} files from {}", files.len(), root);
            for file in files {
                println!("  {}", file.display());
            }
        }
    }

    Ok(())
}
