//! `scanctx code` - Print the full layered source of a control.

use crate::cli::args::CodeArgs;
use crate::exit_codes::{SUCCESS, VERIFY_FAILED};
use crate::input::load_evaluation;
use anyhow::Result;
use scanctx_core::{contextualize_evaluation, ControlRef};

pub fn run(args: CodeArgs) -> Result<i32> {
    let evaluation = load_evaluation(&args.input)?;
    let ctx = contextualize_evaluation(&evaluation);

    let matches: Vec<ControlRef<'_, '_>> = match &args.profile {
        Some(profile) => ctx.find_control(profile, &args.control).into_iter().collect(),
        None => ctx
            .effective_controls()
            .filter(|c| c.id() == args.control)
            .collect(),
    };

    if matches.is_empty() {
        eprintln!("no control '{}' found", args.control);
        return Ok(VERIFY_FAILED);
    }

    for (i, control) in matches.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", control.full_code());
    }
    Ok(SUCCESS)
}
