//! Exports the `ak-protocol` types as TypeScript definitions.
//!
//! ```text
//! ak-protocol-ts --out-dir web/src/lib/generated
//! ```

use ak_protocol::*;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use ts_rs::TS;

#[derive(Parser, Debug)]
#[command(name = "ak-protocol-ts", about = "Generate TypeScript bindings for ak-protocol")]
struct Args {
    /// Directory the `.ts` files are written to.
    #[arg(long, default_value = "bindings")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let out = args.out_dir.as_path();
    GenericItem::export_all_to(out)?;
    MinimalPersonaSnapshot::export_all_to(out)?;
    LlmProviderDescriptor::export_all_to(out)?;
    UserGroup::export_all_to(out)?;
    PinnedOrderRequest::export_all_to(out)?;
    UserSpecificAgentPreference::export_all_to(out)?;
    CurrentUser::export_all_to(out)?;
    ClientConfig::export_all_to(out)?;
    Event::export_all_to(out)?;

    println!("Wrote TypeScript bindings to {}", out.display());
    Ok(())
}
