//! Circuit graphs for test generation and fault analysis
//!
//! This crate provides the datastructure used by test pattern generation tools on
//! combinational circuits: a graph of named lines connected by logic gates, built
//! incrementally from a netlist.
//!
//! # Usage
//!
//! ```bash
//! # Read a netlist and show its statistics
//! # At the moment, only .bench files are supported
//! cirgraph c17.bench --stats
//! # Show every gate as well, with detailed logging
//! cirgraph c17.bench --list -vv
//! ```
//!
//! # Datastructures
//!
//! `CircuitGraph` owns all lines and gates. Lines are interned by name: requesting a name
//! that already exists returns the same line. Lines and gates are identified by
//! `LineId` and `GateId`, which are dense indices in creation order and never change.
//!
//! Each line has at most one driving gate and a set of consuming gates (its fanout).
//! Gates have a type (Input, And, Nand, Or, Nor, Xor, Xnor, Not or Buff), ordered input lines
//! and an output line. The number of inputs is checked against the type when the gate is added.
//!
//! Learnt gates are Or clauses over signed literals, as produced by a SAT solver. They
//! have no output line, carry a polarity for each input, and watch their first two inputs.
//!
//! For example, here is a half adder with a clause learnt from it:
//! ```
//! # use cirgraph::{CircuitGraph, GateType, Polarity};
//! let mut graph = CircuitGraph::new();
//! let a = graph.add_input("a");
//! let b = graph.add_input("b");
//! graph.add_gate(GateType::Xor, &["a", "b"], "sum").unwrap();
//! graph.add_gate(GateType::And, &["a", "b"], "carry").unwrap();
//! let sum = graph.add_output("sum");
//! graph.add_output("carry");
//!
//! let clause = graph
//!     .add_learnt_gate(&[a, b, sum], &[Polarity::Negative, Polarity::Negative, Polarity::Negative])
//!     .unwrap();
//! assert_eq!(graph.gate(clause).unwrap().watch_pointers(), Some((a, b)));
//! assert_eq!(graph.gate_to_string(clause).unwrap(), "<learnt> = OR(!a, !b, !sum)");
//! ```
//!
//! Construction errors, such as a gate with the wrong number of inputs, are reported as
//! `GraphError` values and leave the graph unchanged.

#![warn(missing_docs)]

pub mod cmd;
pub mod graph;
pub mod io;

pub use graph::{
    generators, stats, Arity, CircuitGraph, Gate, GateId, GateType, GraphError, Line, LineId,
    Polarity,
};
