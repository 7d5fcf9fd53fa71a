//! `scanctx profile` - Contextualize a stand-alone profile.

use super::control_line;
use crate::cli::args::{OutputFormat, ProfileArgs};
use crate::exit_codes::SUCCESS;
use crate::input::load_profile;
use anyhow::Result;
use scanctx_core::{contextualize_profile, GraphSummary};

pub fn run(args: ProfileArgs) -> Result<i32> {
    let profile = load_profile(&args.input)?;
    let ctx = contextualize_profile(&profile);

    match args.format {
        OutputFormat::Json => {
            let summary = GraphSummary::from_graph(ctx.graph());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!("PROFILE {}", ctx.profile().name());
            for control in ctx.profile().controls() {
                println!("  {}", control_line(&control));
            }
        }
    }
    Ok(SUCCESS)
}
