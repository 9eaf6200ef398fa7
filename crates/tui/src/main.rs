//! Main entry point for the ak-tui binary.
//!
//! Runs the TUI against the configuration found in the current directory.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let root = std::env::current_dir()?;
    ak_tui::run_app(&root).await
}
