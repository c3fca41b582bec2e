use thiserror::Error;

use crate::graph::gate::{Arity, GateId, GateType};
use crate::graph::line::LineId;

/// Errors reported by the construction and access operations of a circuit graph
///
/// A failed operation leaves the graph unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The number of inputs does not match the gate type
    #[error("{}{gate_type} gate expects {expected} inputs, got {found}", learnt_prefix(.learnt))]
    InvalidArity {
        /// Type of the gate
        gate_type: GateType,
        /// Whether the gate is a learnt clause
        learnt: bool,
        /// Accepted number of inputs
        expected: Arity,
        /// Number of inputs given
        found: usize,
    },

    /// A learnt gate was given a different number of polarities and inputs
    #[error("learnt gate has {inputs} inputs but {polarities} polarities")]
    PolarityMismatch {
        /// Number of inputs given
        inputs: usize,
        /// Number of polarities given
        polarities: usize,
    },

    /// A polarity marker is neither positive nor negative
    #[error("invalid polarity {0}, expected 1 or -1")]
    InvalidPolarity(i32),

    /// Input gates are only created by declaring a primary input
    #[error("input gates cannot be added as logic gates")]
    InputGateType,

    /// The line identity is out of range
    #[error("unknown line {id} (graph has {nb_lines} lines)")]
    UnknownLineId {
        /// Requested identity
        id: LineId,
        /// Number of lines in the graph
        nb_lines: usize,
    },

    /// The gate identity is out of range
    #[error("unknown gate {id} (graph has {nb_gates} gates)")]
    UnknownGateId {
        /// Requested identity
        id: GateId,
        /// Number of gates in the graph
        nb_gates: usize,
    },

    /// Watch pointers were requested on a circuit gate
    #[error("gate {0} is not a learnt gate")]
    NotLearnt(GateId),

    /// A watched line is not an input of the gate
    #[error("line {line} is not an input of gate {gate}")]
    NotAGateInput {
        /// Gate being updated
        gate: GateId,
        /// Offending line
        line: LineId,
    },
}

fn learnt_prefix(learnt: &bool) -> &'static str {
    if *learnt {
        "learnt "
    } else {
        ""
    }
}
