//! Text diagrams of moment-ordered circuits.
//!
//! One row per qubit, one column per moment. Multi-qubit gates draw their
//! controls and target in the same column and cross the wires in between.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::gate::Gate;

/// Character set used for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramStyle {
    /// Box-drawing characters.
    #[default]
    Unicode,
    /// Plain ASCII for terminals and logs that mangle Unicode.
    Ascii,
}

impl DiagramStyle {
    fn wire(self) -> char {
        match self {
            DiagramStyle::Unicode => '─',
            DiagramStyle::Ascii => '-',
        }
    }

    fn crossing(self) -> &'static str {
        match self {
            DiagramStyle::Unicode => "┼",
            DiagramStyle::Ascii => "+",
        }
    }

    fn control(self) -> &'static str {
        match self {
            DiagramStyle::Unicode => "●",
            DiagramStyle::Ascii => "@",
        }
    }

    fn not_target(self) -> &'static str {
        match self {
            DiagramStyle::Unicode => "⊕",
            DiagramStyle::Ascii => "X",
        }
    }

    fn single(self, gate: Gate) -> &'static str {
        match (gate, self) {
            (Gate::H, _) => "H",
            (Gate::S, _) => "S",
            (Gate::T, _) => "T",
            (Gate::Sdg, DiagramStyle::Unicode) => "S†",
            (Gate::Tdg, DiagramStyle::Unicode) => "T†",
            (Gate::Sdg, DiagramStyle::Ascii) => "Sdg",
            (Gate::Tdg, DiagramStyle::Ascii) => "Tdg",
            (Gate::CX | Gate::CCX, _) => "?",
        }
    }
}

/// Render `circuit` as a multi-line string.
pub fn render(circuit: &Circuit, style: DiagramStyle) -> String {
    let n = circuit.num_qubits();
    if n == 0 {
        return String::new();
    }
    let label_width = circuit
        .qubits()
        .iter()
        .map(|q| q.name.chars().count())
        .max()
        .unwrap_or(0);
    let mut rows: Vec<String> = circuit
        .qubits()
        .iter()
        .map(|q| format!("{:>label_width$}: ", q.name))
        .collect();

    let wire = style.wire();
    for moment in circuit.moments() {
        let mut cells: Vec<Option<&str>> = vec![None; n];
        // Crossings first so gate symbols overwrite them.
        for op in moment.operations() {
            if op.qubits.len() > 1 {
                let lo = op.qubits.iter().map(|q| q.index()).min().unwrap_or(0);
                let hi = op.qubits.iter().map(|q| q.index()).max().unwrap_or(0);
                for cell in &mut cells[lo..=hi] {
                    cell.get_or_insert(style.crossing());
                }
            }
        }
        for op in moment.operations() {
            let Some((target, controls)) = op.qubits.split_last() else {
                continue;
            };
            if controls.is_empty() {
                cells[target.index()] = Some(style.single(op.gate));
            } else {
                for c in controls {
                    cells[c.index()] = Some(style.control());
                }
                cells[target.index()] = Some(style.not_target());
            }
        }

        let width = cells
            .iter()
            .flatten()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(1);
        for (row, cell) in rows.iter_mut().zip(&cells) {
            let symbol = cell.unwrap_or("");
            let len = symbol.chars().count();
            row.push(wire);
            row.push_str(symbol);
            for _ in len..width {
                row.push(wire);
            }
            row.push(wire);
        }
    }

    rows.join("\n")
}

impl Circuit {
    /// Render this circuit with box-drawing characters.
    pub fn to_diagram(&self) -> String {
        render(self, DiagramStyle::Unicode)
    }
}
