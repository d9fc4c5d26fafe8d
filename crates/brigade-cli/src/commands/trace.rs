//! Trace command implementation.

use console::style;

use brigade_sim::{BasisInput, trace};

use super::common::ConfigArgs;

/// Execute the trace command.
pub fn execute(
    args: &ConfigArgs,
    address: u64,
    memory: u64,
    bus: bool,
    target: bool,
    json: bool,
) -> anyhow::Result<()> {
    let cells = 1u64 << args.address_qubits.min(6);
    if address >= cells {
        anyhow::bail!(
            "Address {address} out of range for {} address qubits",
            args.address_qubits
        );
    }

    let built = args.build()?;
    let input = BasisInput {
        address,
        bus,
        memory,
        target,
    };
    let tr = trace(&built.circuit, &input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tr)?);
        return Ok(());
    }

    println!("{}", style(&tr.circuit).bold());
    println!("  initial   {}", tr.initial);
    if let Some(expected) = &tr.expected {
        println!("  expected  {expected}");
    }
    println!();
    for step in &tr.steps {
        println!(
            "  moment {:>4}  {:>3} ops  support {}",
            step.moment, step.operations, step.support
        );
    }
    println!();
    for amp in &tr.amplitudes {
        let marker = if tr.expected.as_deref() == Some(amp.state.as_str()) {
            style("*").green()
        } else {
            style(" ")
        };
        println!("  {} {} ({:+.4}{:+.4}i)", marker, amp.state, amp.re, amp.im);
    }
    println!("  peak support {}", tr.peak_support());
    Ok(())
}
