//! Diagram command implementation.

use brigade_ir::{DiagramStyle, render};

use super::common::{ConfigArgs, print_resources};

/// Execute the diagram command.
pub fn execute(args: &ConfigArgs, ascii: bool) -> anyhow::Result<()> {
    let built = args.build()?;
    let style = if ascii {
        DiagramStyle::Ascii
    } else {
        DiagramStyle::Unicode
    };
    println!("{}", render(&built.circuit, style));
    print_resources(&built);
    Ok(())
}
