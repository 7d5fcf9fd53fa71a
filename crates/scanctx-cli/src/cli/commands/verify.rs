//! `scanctx verify` - Structural check of the linked overlay graph.

use crate::cli::args::VerifyArgs;
use crate::exit_codes::{SUCCESS, VERIFY_FAILED};
use crate::input::load_evaluation;
use anyhow::Result;
use scanctx_core::contextualize_evaluation;

pub fn run(args: VerifyArgs) -> Result<i32> {
    let evaluation = load_evaluation(&args.input)?;
    let ctx = contextualize_evaluation(&evaluation);

    match ctx.verify() {
        Ok(()) => {
            eprintln!(
                "OK: {} profiles, {} controls",
                ctx.profile_count(),
                ctx.control_count()
            );
            Ok(SUCCESS)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                breaks_traversal = e.breaks_traversal(),
                "Overlay graph failed verification"
            );
            eprintln!("FAILED: {e}");
            if e.breaks_traversal() {
                eprintln!("root and full_code cannot be computed on this graph");
            }
            Ok(VERIFY_FAILED)
        }
    }
}
