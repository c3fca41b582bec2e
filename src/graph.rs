//! Representation and handling of circuit graphs

mod circuit_graph;
mod error;
mod gate;
pub mod generators;
mod line;
pub mod stats;

pub use circuit_graph::{CircuitGraph, LEARNT_LABEL};
pub use error::GraphError;
pub use gate::{Arity, Gate, GateId, GateType, Polarity};
pub use line::{Line, LineId};
