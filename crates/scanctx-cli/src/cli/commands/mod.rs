use super::args::*;

pub mod code;
pub mod graph;
pub mod profile;
pub mod verify;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Graph(args) => graph::run(args),
        Command::Code(args) => code::run(args),
        Command::Profile(args) => profile::run(args),
        Command::Verify(args) => verify::run(args),
    }
}

/// One line per control: `profile/id`, its root, and overlay flags.
pub(crate) fn control_line(control: &scanctx_core::ControlRef<'_, '_>) -> String {
    let key = format!("{}/{}", control.sourced_from().name(), control.id());
    let root = control.root();
    let root_key = format!("{}/{}", root.sourced_from().name(), root.id());

    let mut flags = Vec::new();
    if control.is_redundant() {
        flags.push("redundant".to_string());
    }
    if control.depth() > 0 {
        flags.push(format!("depth={}", control.depth()));
    }
    let overlays = control.extended_by().count();
    if overlays > 0 {
        flags.push(format!("overlaid-by={overlays}"));
    }

    format!("{key:<40} {root_key:<40} {}", flags.join(" "))
        .trim_end()
        .to_string()
}
