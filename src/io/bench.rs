//! IO for .bench (ISCAS89) files

use std::io::{BufRead, BufReader, Read};

use log::debug;
use thiserror::Error;

use crate::{CircuitGraph, GateType, GraphError};

/// Errors encountered while reading a .bench file
#[derive(Debug, Error)]
pub enum ParseError {
    /// The statement does not follow the .bench syntax
    #[error("line {line}: malformed statement `{statement}`")]
    Syntax {
        /// Line number in the file, starting at 1
        line: usize,
        /// Offending statement
        statement: String,
    },

    /// A declaration is neither INPUT nor OUTPUT
    #[error("line {line}: unknown keyword {keyword}")]
    UnknownKeyword {
        /// Line number in the file, starting at 1
        line: usize,
        /// Offending keyword
        keyword: String,
    },

    /// The gate type is not a known combinational gate
    #[error("line {line}: unknown gate type {name}")]
    UnknownGateType {
        /// Line number in the file, starting at 1
        line: usize,
        /// Offending gate type
        name: String,
    },

    /// Flip-flops and other sequential elements are not supported
    #[error("line {line}: sequential element {name} is not supported")]
    Sequential {
        /// Line number in the file, starting at 1
        line: usize,
        /// Name of the sequential element
        name: String,
    },

    /// The statement was rejected by the circuit graph
    #[error("line {line}: {source}")]
    Graph {
        /// Line number in the file, starting at 1
        line: usize,
        /// Error from the graph
        source: GraphError,
    },

    /// The file could not be read
    #[error("error during file IO: {0}")]
    Io(#[from] std::io::Error),
}

fn gate_type(name: &str, line: usize) -> Result<GateType, ParseError> {
    match name.to_uppercase().as_str() {
        "AND" => Ok(GateType::And),
        "NAND" => Ok(GateType::Nand),
        "OR" => Ok(GateType::Or),
        "NOR" => Ok(GateType::Nor),
        "XOR" => Ok(GateType::Xor),
        "XNOR" => Ok(GateType::Xnor),
        "NOT" => Ok(GateType::Not),
        "BUF" | "BUFF" => Ok(GateType::Buff),
        "DFF" | "DFFRSE" | "LATCH" => Err(ParseError::Sequential {
            line,
            name: name.to_string(),
        }),
        _ => Err(ParseError::UnknownGateType {
            line,
            name: name.to_string(),
        }),
    }
}

fn read_declaration(t: &str, line: usize, graph: &mut CircuitGraph) -> Result<(), ParseError> {
    let parts: Vec<_> = t
        .split(&['(', ')'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 2 || !t.ends_with(')') {
        return Err(ParseError::Syntax {
            line,
            statement: t.to_string(),
        });
    }
    match parts[0].to_uppercase().as_str() {
        "INPUT" => {
            graph.add_input(parts[1]);
        }
        "OUTPUT" => {
            graph.add_output(parts[1]);
        }
        _ => {
            return Err(ParseError::UnknownKeyword {
                line,
                keyword: parts[0].to_string(),
            })
        }
    }
    Ok(())
}

fn read_assignment(t: &str, line: usize, graph: &mut CircuitGraph) -> Result<(), ParseError> {
    let syntax_error = || ParseError::Syntax {
        line,
        statement: t.to_string(),
    };
    let (output, expr) = t.split_once('=').ok_or_else(syntax_error)?;
    let output = output.trim();
    let expr = expr.trim();
    let (name, args) = expr.split_once('(').ok_or_else(syntax_error)?;
    let args = args.strip_suffix(')').ok_or_else(syntax_error)?;
    let inputs: Vec<&str> = args.split(',').map(|s| s.trim()).collect();
    if output.is_empty() || inputs.iter().any(|s| s.is_empty()) {
        return Err(syntax_error());
    }
    let tp = gate_type(name.trim(), line)?;
    graph
        .add_gate(tp, inputs.as_slice(), output)
        .map_err(|source| ParseError::Graph { line, source })?;
    Ok(())
}

/// Read statements from a .bench file into an existing graph
///
/// Statements are applied in file order: lines are created on first use, whether as
/// gate input, gate output, primary input or primary output.
pub fn read_bench_into<R: Read>(r: R, graph: &mut CircuitGraph) -> Result<(), ParseError> {
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let s = l?;
        let line = i + 1;
        let t = s.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if t.contains('=') {
            read_assignment(t, line, graph)?;
        } else {
            read_declaration(t, line, graph)?;
        }
    }
    debug!(
        "Read {} lines and {} gates",
        graph.nb_lines(),
        graph.nb_gates()
    );
    Ok(())
}

/// Read a circuit in .bench format, as used by the ISCAS benchmarks
///
/// These files describe the design with simple statements like:
/// ```text
///     # This is a comment
///     INPUT(i0)
///     INPUT(i1)
///     x0 = AND(i0, i1)
///     x1 = NAND(x0, i1)
///     x2 = OR(x0, i0)
///     x3 = NOR(i0, x1)
///     x4 = XOR(x3, x2)
///     x5 = BUFF(x4)
///     x6 = NOT(x5)
///     OUTPUT(x6)
/// ```
pub fn read_bench<R: Read>(r: R) -> Result<CircuitGraph, ParseError> {
    let mut graph = CircuitGraph::new();
    read_bench_into(r, &mut graph)?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_read() {
        let example = "# c17-like example
INPUT(i0)
INPUT(i1)

OUTPUT(x6)
OUTPUT(x4)

x0 = AND(i0, i1)
x1 = NAND(i0, i1)
x2 = OR(x0, i0)
x3 = NOR(i0, x1)
x4 = XOR(x3, x2)
x5 = buff(x4)
x6 = NOT(x5)
x7 = XNOR(  i0, i1 )
x8   =  BUF(x7)
";
        let g = read_bench(example.as_bytes()).unwrap();
        g.check();
        assert_eq!(g.nb_inputs(), 2);
        assert_eq!(g.nb_outputs(), 2);
        assert_eq!(g.nb_gates(), 11);
        assert_eq!(g.nb_lines(), 11);
        // Outputs are created when declared, before the gate driving them
        assert_eq!(g.line_id("x6").unwrap().index(), 2);
        assert!(g.line_by_name("x6").unwrap().is_driven());
        let stats = g.graph_stats();
        assert_eq!(stats.count(GateType::Buff), 2);
        assert_eq!(stats.count(GateType::Xnor), 1);
    }

    #[test]
    fn test_end_to_end() {
        let g = read_bench("INPUT(a)\nINPUT(b)\nc = AND(a, b)\nOUTPUT(c)\n".as_bytes()).unwrap();
        let names = |ids: &[crate::LineId]| -> Vec<String> {
            ids.iter()
                .map(|l| g.line(*l).unwrap().name().to_string())
                .collect()
        };
        assert_eq!(names(g.inputs()), vec!["a", "b"]);
        assert_eq!(names(g.outputs()), vec!["c"]);
        assert_eq!(g.nb_gates(), 3);
        let stats = g.to_string() + &g.graph_stats().to_string();
        assert!(stats.contains("#     1 AND"));
        assert!(stats.contains("#     2 Input"));
    }

    #[test]
    fn test_errors() {
        let err = read_bench("INPUT(a)\nx = AND(a)\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Graph {
                line: 2,
                source: GraphError::InvalidArity { .. }
            }
        ));
        let err = read_bench("INPUT(a)\n\nx = DFF(a)\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Sequential { line: 3, .. }));
        let err = read_bench("x = MAJ(a, b, c)\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::UnknownGateType { line: 1, .. }));
        let err = read_bench("WIRE(a)\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::UnknownKeyword { .. }));
        let err = read_bench("x = AND(a, )\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        let err = read_bench("x = AND a, b\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        let err = read_bench("INPUT a\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(
            read_bench("INPUT(a)\nx = NOT(a, a)\n".as_bytes())
                .unwrap_err()
                .to_string(),
            "line 2: NOT gate expects exactly 1 inputs, got 2"
        );
    }

    #[test]
    fn test_read_into() {
        let mut g = CircuitGraph::new();
        read_bench_into("INPUT(a)\nINPUT(b)\n".as_bytes(), &mut g).unwrap();
        read_bench_into("INPUT(a)\nc = OR(a, b)\nOUTPUT(c)\n".as_bytes(), &mut g).unwrap();
        assert_eq!(g.nb_inputs(), 2);
        assert_eq!(g.nb_gates(), 3);
        g.check();
    }
}
