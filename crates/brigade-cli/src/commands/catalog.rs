//! Catalog command implementation.

use console::style;

use brigade_synth::Catalog;

/// Execute the catalog command.
pub fn execute() {
    let catalog = Catalog::standard();
    println!(
        "{:<34} {:>3} {:>3} {:>3} {:>3} {:>5} {:>3}  {:<14} {}",
        style("scheme").bold(),
        "T",
        "TD",
        "CX",
        "H",
        "depth",
        "anc",
        "exit",
        "packs"
    );
    for scheme in catalog.iter() {
        let p = &scheme.profile;
        println!(
            "{:<34} {:>3} {:>3} {:>3} {:>3} {:>5} {:>3}  {:<14} {}",
            scheme.name(),
            p.t_count,
            p.t_depth,
            p.cx_count,
            p.h_count,
            p.depth,
            p.ancillas,
            scheme.exit_state.name(),
            if scheme.parallelizable { "yes" } else { "no" }
        );
    }
    println!();
    println!("{} schemes", catalog.len());
}
