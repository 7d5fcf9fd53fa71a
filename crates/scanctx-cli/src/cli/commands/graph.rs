//! `scanctx graph` - Link an evaluation and print the overlay graph.

use super::control_line;
use crate::cli::args::{GraphArgs, OutputFormat};
use crate::exit_codes::SUCCESS;
use crate::input::load_evaluation;
use anyhow::Result;
use scanctx_core::{contextualize_evaluation, ControlRef, GraphSummary};

pub fn run(args: GraphArgs) -> Result<i32> {
    let evaluation = load_evaluation(&args.input)?;
    let ctx = contextualize_evaluation(&evaluation);

    match args.format {
        OutputFormat::Json => {
            let mut summary = GraphSummary::from_graph(&ctx);
            if args.effective {
                summary.controls.retain(|c| c.extended_by.is_empty());
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!("PROFILES");
            for profile in ctx.contains() {
                let parents: Vec<_> = profile.extends_from().map(|p| p.name()).collect();
                if parents.is_empty() {
                    println!("  {}", profile.name());
                } else {
                    println!("  {} -> {}", profile.name(), parents.join(", "));
                }
            }

            println!();
            println!("{:<42} {:<40} FLAGS", "  CONTROL", "ROOT");
            let controls: Vec<ControlRef<'_, '_>> = if args.effective {
                ctx.effective_controls().collect()
            } else {
                ctx.controls().collect()
            };
            for control in &controls {
                println!("  {}", control_line(control));
            }

            let stats = GraphSummary::from_graph(&ctx).stats;
            eprintln!(
                "{} profiles, {} controls ({} linked, {} redundant)",
                stats.profiles, stats.controls, stats.linked, stats.redundant
            );
        }
    }

    Ok(SUCCESS)
}
