//! Compute gate statistics
//!
//! ```
//! # use cirgraph::{CircuitGraph, GateType};
//! let mut graph = CircuitGraph::new();
//! graph.add_input("a");
//! graph.add_input("b");
//! graph.add_gate(GateType::And, &["a", "b"], "c").unwrap();
//! graph.add_output("c");
//! let stats = graph.graph_stats();
//!
//! // Check that there is no Xor gate
//! assert_eq!(stats.count(GateType::Xor), 0);
//! assert_eq!(stats.count(GateType::And), 1);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::{CircuitGraph, GateType};

/// Number of inputs, outputs, lines and gates in a circuit graph
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of primary inputs
    pub nb_inputs: usize,
    /// Number of primary outputs
    pub nb_outputs: usize,
    /// Number of lines
    pub nb_lines: usize,
    /// Number of gates, including learnt gates
    pub nb_gates: usize,
    /// Number of learnt gates
    pub nb_learnt: usize,
    /// Number of circuit gates of each type; learnt gates are not included
    pub gate_types: BTreeMap<GateType, usize>,
}

impl GraphStats {
    /// Number of circuit gates of a given type
    pub fn count(&self, tp: GateType) -> usize {
        self.gate_types.get(&tp).copied().unwrap_or(0)
    }

    /// Number of gates that are not primary inputs or learnt clauses
    pub fn nb_logic_gates(&self) -> usize {
        self.nb_gates - self.nb_learnt - self.count(GateType::Input)
    }
}

fn plural(n: usize) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} input{}", self.nb_inputs, plural(self.nb_inputs))?;
        writeln!(f, "# {} output{}", self.nb_outputs, plural(self.nb_outputs))?;
        writeln!(f, "# {} line{}", self.nb_lines, plural(self.nb_lines))?;
        writeln!(f, "# {} gate{}:", self.nb_gates, plural(self.nb_gates))?;
        for (tp, nb) in &self.gate_types {
            writeln!(f, "#     {} {}", nb, tp)?;
        }
        if self.nb_learnt != 0 {
            writeln!(f, "#     {} learnt", self.nb_learnt)?;
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the graph
pub fn stats(g: &CircuitGraph) -> GraphStats {
    let mut ret = GraphStats {
        nb_inputs: g.nb_inputs(),
        nb_outputs: g.nb_outputs(),
        nb_lines: g.nb_lines(),
        nb_gates: g.nb_gates(),
        nb_learnt: 0,
        gate_types: BTreeMap::new(),
    };
    for gate in g.gates() {
        if gate.is_learnt() {
            ret.nb_learnt += 1;
        } else {
            *ret.gate_types.entry(gate.gate_type()).or_insert(0) += 1;
        }
    }
    ret
}
