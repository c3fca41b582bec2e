use std::fmt;

use fxhash::FxHashMap;
use itertools::Itertools;
use log::{debug, warn};

use crate::graph::error::GraphError;
use crate::graph::gate::{Arity, Gate, GateId, GateType, Polarity};
use crate::graph::line::{Line, LineId};
use crate::graph::stats::{self, GraphStats};

/// Placeholder used as the output name when rendering learnt gates
pub const LEARNT_LABEL: &str = "<learnt>";

/// Representation of a combinational circuit as named lines connected by gates
///
/// Lines and gates live in append-only arenas and refer to each other by identity,
/// so that identities stay valid for the whole lifetime of the graph.
/// Lines are interned by name: there is exactly one line for each name ever requested.
#[derive(Debug, Clone, Default)]
pub struct CircuitGraph {
    lines: Vec<Line>,
    gates: Vec<Gate>,
    inputs: Vec<LineId>,
    outputs: Vec<LineId>,
    name_to_line: FxHashMap<String, LineId>,
}

impl CircuitGraph {
    /// Create a new, empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of primary inputs
    pub fn nb_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Return the number of primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Return the number of lines
    pub fn nb_lines(&self) -> usize {
        self.lines.len()
    }

    /// Return the number of gates, including input gates and learnt gates
    pub fn nb_gates(&self) -> usize {
        self.gates.len()
    }

    /// Primary input lines, in declaration order
    pub fn inputs(&self) -> &[LineId] {
        &self.inputs
    }

    /// Primary output lines, in declaration order
    pub fn outputs(&self) -> &[LineId] {
        &self.outputs
    }

    /// All lines, indexed by identity
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All gates, indexed by identity
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Learnt gates, in creation order
    pub fn learnt_gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.gates.iter().filter(|g| g.is_learnt())
    }

    /// Get the line with a given identity
    pub fn line(&self, id: LineId) -> Result<&Line, GraphError> {
        self.lines.get(id.index()).ok_or(GraphError::UnknownLineId {
            id,
            nb_lines: self.nb_lines(),
        })
    }

    /// Get the gate with a given identity
    pub fn gate(&self, id: GateId) -> Result<&Gate, GraphError> {
        self.gates.get(id.index()).ok_or(GraphError::UnknownGateId {
            id,
            nb_gates: self.nb_gates(),
        })
    }

    /// Find the line with a given name, if it exists
    pub fn line_id(&self, name: &str) -> Option<LineId> {
        self.name_to_line.get(name).copied()
    }

    /// Find the line with a given name, if it exists
    pub fn line_by_name(&self, name: &str) -> Option<&Line> {
        self.line_id(name).map(|id| &self.lines[id.index()])
    }

    /// Return the line with this name, creating it if it does not exist yet
    pub fn ensure_line(&mut self, name: &str) -> LineId {
        if let Some(id) = self.name_to_line.get(name) {
            return *id;
        }
        let id = LineId::new(self.lines.len());
        self.lines.push(Line::new(id, name));
        self.name_to_line.insert(name.to_string(), id);
        id
    }

    /// Declare a primary input, creating an input gate driving it
    ///
    /// Declaring the same input twice has no effect after the first time.
    pub fn add_input(&mut self, name: &str) -> LineId {
        let id = self.ensure_line(name);
        if self.inputs.contains(&id) {
            warn!("Input {name} is declared twice");
            return id;
        }
        let gate = GateId::new(self.gates.len());
        self.gates.push(Gate::input(gate, id));
        self.inputs.push(id);
        self.drive(id, gate);
        debug!("Added input {name} as {id}");
        id
    }

    /// Declare a primary output
    ///
    /// Declaring the same output twice has no effect after the first time.
    pub fn add_output(&mut self, name: &str) -> LineId {
        let id = self.ensure_line(name);
        let line = &mut self.lines[id.index()];
        if !line.is_output() {
            line.set_output();
            self.outputs.push(id);
            debug!("Added output {name} as {id}");
        }
        id
    }

    /// Add a logic gate, creating its input and output lines as needed
    ///
    /// The gate becomes the driver of the output line. A line that is already driven gets
    /// its driver replaced: multiple drivers are not detected.
    pub fn add_gate<S: AsRef<str>>(
        &mut self,
        tp: GateType,
        input_names: &[S],
        output_name: &str,
    ) -> Result<GateId, GraphError> {
        if tp == GateType::Input {
            return Err(GraphError::InputGateType);
        }
        if !tp.arity().accepts(input_names.len()) {
            return Err(GraphError::InvalidArity {
                gate_type: tp,
                learnt: false,
                expected: tp.arity(),
                found: input_names.len(),
            });
        }

        let inputs: Box<[LineId]> = input_names
            .iter()
            .map(|n| self.ensure_line(n.as_ref()))
            .collect();
        let output = self.ensure_line(output_name);

        let gate = GateId::new(self.gates.len());
        self.gates.push(Gate::logic(gate, tp, inputs, output));
        self.drive(output, gate);
        self.connect_inputs(gate);
        debug!("Added gate {}", self.render(gate));
        Ok(gate)
    }

    /// Add a learnt clause over existing lines
    ///
    /// The clause is an Or gate without output line. Its first two inputs become the watched literals.
    pub fn add_learnt_gate(
        &mut self,
        inputs: &[LineId],
        polarities: &[Polarity],
    ) -> Result<GateId, GraphError> {
        let arity = Arity::AtLeast(2);
        if !arity.accepts(inputs.len()) {
            return Err(GraphError::InvalidArity {
                gate_type: GateType::Or,
                learnt: true,
                expected: arity,
                found: inputs.len(),
            });
        }
        if inputs.len() != polarities.len() {
            return Err(GraphError::PolarityMismatch {
                inputs: inputs.len(),
                polarities: polarities.len(),
            });
        }
        for l in inputs {
            self.line(*l)?;
        }

        let gate = GateId::new(self.gates.len());
        self.gates
            .push(Gate::learnt(gate, inputs.into(), polarities.into()));
        self.connect_inputs(gate);
        debug!("Added learnt gate {}", self.render(gate));
        Ok(gate)
    }

    /// Move the watched literals of a learnt gate; both lines must be inputs of the gate
    pub fn set_watch_pointers(
        &mut self,
        gate: GateId,
        watches: (LineId, LineId),
    ) -> Result<(), GraphError> {
        let g = self.gate(gate)?;
        if !g.is_learnt() {
            return Err(GraphError::NotLearnt(gate));
        }
        for line in [watches.0, watches.1] {
            if !g.inputs().contains(&line) {
                return Err(GraphError::NotAGateInput { gate, line });
            }
        }
        self.gates[gate.index()].set_watch_pointers(watches);
        Ok(())
    }

    /// Render a gate as `<output> = <TYPE>(<input1>, <input2>, ...)`
    pub fn gate_to_string(&self, gate: GateId) -> Result<String, GraphError> {
        self.gate(gate)?;
        Ok(self.render(gate))
    }

    /// Compute the statistics of the graph
    pub fn graph_stats(&self) -> GraphStats {
        stats::stats(self)
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        assert_eq!(self.lines.len(), self.name_to_line.len());
        for (i, l) in self.lines.iter().enumerate() {
            assert_eq!(l.id().index(), i, "Line {} has a wrong id", l.name());
            assert_eq!(self.line_id(l.name()), Some(l.id()));
            if let Some(g) = l.source() {
                assert_eq!(self.gates[g.index()].output(), Some(l.id()));
            }
            for g in l.fanout() {
                assert!(self.gates[g.index()].inputs().contains(&l.id()));
            }
            assert_eq!(l.is_output(), self.outputs.contains(&l.id()));
        }
        for (i, g) in self.gates.iter().enumerate() {
            assert_eq!(g.id().index(), i, "Gate {} has a wrong id", g.id());
            assert!(
                g.is_learnt() || g.gate_type().arity().accepts(g.inputs().len()),
                "Gate {} has a wrong arity",
                g.id()
            );
            for l in g.inputs() {
                assert!(self.lines[l.index()].fanout().contains(&g.id()));
            }
            if let Some(p) = g.inputs_polarity() {
                assert_eq!(p.len(), g.inputs().len());
            }
        }
        for i in &self.inputs {
            assert!(self.lines[i.index()].is_driven(), "Input {i} is not driven");
        }
    }

    fn drive(&mut self, line: LineId, gate: GateId) {
        let l = &mut self.lines[line.index()];
        if let Some(prev) = l.set_source(gate) {
            warn!(
                "Line {} was driven by gate {prev}, now driven by gate {gate}",
                l.name()
            );
        }
    }

    fn connect_inputs(&mut self, gate: GateId) {
        for l in self.gates[gate.index()].inputs() {
            self.lines[l.index()].connect_as_input(gate);
        }
    }

    fn line_name(&self, l: LineId) -> &str {
        self.lines[l.index()].name()
    }

    fn render(&self, gate: GateId) -> String {
        let g = &self.gates[gate.index()];
        let output = match g.output() {
            Some(o) => self.line_name(o),
            None => LEARNT_LABEL,
        };
        let inputs = g
            .literals()
            .map(|(l, p)| {
                if g.is_learnt() && p.is_negative() {
                    format!("!{}", self.line_name(l))
                } else {
                    self.line_name(l).to_string()
                }
            })
            .join(", ");
        format!("{} = {}({})", output, g.gate_type(), inputs)
    }
}

impl fmt::Display for CircuitGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit with {} inputs, {} outputs:",
            self.nb_inputs(),
            self.nb_outputs()
        )?;
        for i in 0..self.nb_gates() {
            writeln!(f, "\t{}", self.render(GateId::new(i)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_circuit() -> CircuitGraph {
        let mut g = CircuitGraph::new();
        g.add_input("a");
        g.add_input("b");
        g.add_gate(GateType::And, &["a", "b"], "c").unwrap();
        g.add_output("c");
        g
    }

    #[test]
    fn test_basic() {
        let g = and_circuit();
        g.check();
        let a = g.line_id("a").unwrap();
        let b = g.line_id("b").unwrap();
        let c = g.line_id("c").unwrap();
        assert_eq!(g.inputs(), &[a, b]);
        assert_eq!(g.outputs(), &[c]);
        assert_eq!(g.nb_gates(), 3);
        assert_eq!(g.nb_lines(), 3);
        assert_eq!(g.gate(GateId::new(0)).unwrap().gate_type(), GateType::Input);
        assert_eq!(g.gate(GateId::new(1)).unwrap().gate_type(), GateType::Input);
        assert_eq!(g.gate(GateId::new(2)).unwrap().gate_type(), GateType::And);
        assert!(g.line(c).unwrap().is_output());
        assert!(!g.line(a).unwrap().is_output());

        let stats = g.graph_stats();
        assert_eq!(stats.count(GateType::And), 1);
        assert_eq!(stats.count(GateType::Input), 2);
        assert_eq!(stats.count(GateType::Or), 0);
    }

    #[test]
    fn test_identity_density() {
        let mut g = CircuitGraph::new();
        let names = ["x", "y", "z", "w", "v"];
        for (i, n) in names.iter().enumerate() {
            assert_eq!(g.ensure_line(n), LineId::new(i));
        }
        for (i, l) in g.lines().iter().enumerate() {
            assert_eq!(l.id().index(), i);
            assert_eq!(l.name(), names[i]);
        }
    }

    #[test]
    fn test_interning() {
        let mut g = CircuitGraph::new();
        let a = g.ensure_line("a");
        for _ in 0..5 {
            assert_eq!(g.ensure_line("a"), a);
        }
        assert_eq!(g.add_output("a"), a);
        assert_eq!(g.add_input("a"), a);
        g.add_gate(GateType::Not, &["a"], "b").unwrap();
        assert_eq!(g.ensure_line("b"), LineId::new(1));
        assert_eq!(g.nb_lines(), 2);
        g.check();
    }

    #[test]
    fn test_arity() {
        let mut g = CircuitGraph::new();
        assert!(matches!(
            g.add_gate(GateType::And, &["a"], "x"),
            Err(GraphError::InvalidArity {
                gate_type: GateType::And,
                found: 1,
                ..
            })
        ));
        assert!(matches!(
            g.add_gate(GateType::Xor, &["a", "b", "c"], "x"),
            Err(GraphError::InvalidArity { found: 3, .. })
        ));
        assert!(matches!(
            g.add_gate(GateType::Not, &["a", "b"], "x"),
            Err(GraphError::InvalidArity { found: 2, .. })
        ));
        assert_eq!(
            g.add_gate(GateType::Input, &[] as &[&str], "x"),
            Err(GraphError::InputGateType)
        );
        // Failed calls leave the graph untouched
        assert_eq!(g.nb_lines(), 0);
        assert_eq!(g.nb_gates(), 0);

        assert!(g.add_gate(GateType::And, &["a", "b"], "x").is_ok());
        assert!(g.add_gate(GateType::Nor, &["a", "b", "x"], "y").is_ok());
        assert!(g.add_gate(GateType::Xnor, &["a", "b"], "z").is_ok());
        assert!(g.add_gate(GateType::Buff, &["z"], "t").is_ok());
        g.check();
    }

    #[test]
    fn test_output_idempotence() {
        let mut g = CircuitGraph::new();
        let z = g.add_output("z");
        assert_eq!(g.add_output("z"), z);
        assert_eq!(g.outputs(), &[z]);
        assert_eq!(g.nb_gates(), 0);
    }

    #[test]
    fn test_input_idempotence() {
        let mut g = CircuitGraph::new();
        let a = g.add_input("a");
        assert_eq!(g.add_input("a"), a);
        assert_eq!(g.inputs(), &[a]);
        assert_eq!(g.nb_gates(), 1);
        assert_eq!(g.line(a).unwrap().source(), Some(GateId::new(0)));
    }

    #[test]
    fn test_fanout() {
        let g = and_circuit();
        let and = GateId::new(2);
        let a = g.line_by_name("a").unwrap();
        let b = g.line_by_name("b").unwrap();
        let c = g.line_by_name("c").unwrap();
        assert_eq!(a.fanout(), &[and]);
        assert_eq!(b.fanout(), &[and]);
        assert_eq!(c.source(), Some(and));
        assert!(c.fanout().is_empty());
        assert_eq!(g.gate(and).unwrap().inputs(), &[a.id(), b.id()]);
        assert_eq!(g.gate(and).unwrap().output(), Some(c.id()));
    }

    #[test]
    fn test_fanout_accumulates() {
        let mut g = and_circuit();
        let x = g.add_gate(GateType::Or, &["a", "c"], "x").unwrap();
        let y = g.add_gate(GateType::Nand, &["a", "a"], "y").unwrap();
        let a = g.line_by_name("a").unwrap();
        assert_eq!(a.fanout(), &[GateId::new(2), x, y]);
        g.check();
    }

    #[test]
    fn test_driver_overwrite() {
        let mut g = and_circuit();
        let second = g.add_gate(GateType::Or, &["a", "b"], "c").unwrap();
        let c = g.line_by_name("c").unwrap();
        assert_eq!(c.source(), Some(second));
        assert_eq!(g.nb_gates(), 4);
    }

    #[test]
    fn test_learnt_gate() {
        let mut g = and_circuit();
        let a = g.line_id("a").unwrap();
        let b = g.line_id("b").unwrap();
        let c = g.line_id("c").unwrap();
        let pols: Vec<Polarity> = [1, -1, 1]
            .into_iter()
            .map(|s| Polarity::try_from(s).unwrap())
            .collect();
        let id = g.add_learnt_gate(&[a, b, c], &pols).unwrap();
        let gate = g.gate(id).unwrap();
        assert!(gate.is_learnt());
        assert_eq!(gate.inputs().len(), 3);
        assert_eq!(
            gate.inputs_polarity()
                .unwrap()
                .iter()
                .map(|p| p.sign())
                .collect::<Vec<_>>(),
            vec![1, -1, 1]
        );
        assert_eq!(gate.watch_pointers(), Some((a, b)));
        assert_eq!(gate.output(), None);
        assert!(g.line(c).unwrap().fanout().contains(&id));
        assert_eq!(g.nb_lines(), 3);
        assert_eq!(g.learnt_gates().count(), 1);
        assert_eq!(g.gate_to_string(id).unwrap(), "<learnt> = OR(a, !b, c)");
        g.check();
    }

    #[test]
    fn test_learnt_gate_errors() {
        let mut g = and_circuit();
        let a = g.line_id("a").unwrap();
        let b = g.line_id("b").unwrap();
        let p = Polarity::Positive;
        assert!(matches!(
            g.add_learnt_gate(&[a], &[p]),
            Err(GraphError::InvalidArity { learnt: true, .. })
        ));
        assert_eq!(
            g.add_learnt_gate(&[a, b], &[p]),
            Err(GraphError::PolarityMismatch {
                inputs: 2,
                polarities: 1
            })
        );
        assert!(matches!(
            g.add_learnt_gate(&[a, LineId::new(42)], &[p, p]),
            Err(GraphError::UnknownLineId { nb_lines: 3, .. })
        ));
        assert_eq!(g.nb_gates(), 3);
    }

    #[test]
    fn test_watch_pointers() {
        let mut g = and_circuit();
        let a = g.line_id("a").unwrap();
        let b = g.line_id("b").unwrap();
        let c = g.line_id("c").unwrap();
        let p = Polarity::Negative;
        let id = g.add_learnt_gate(&[a, b, c], &[p, p, p]).unwrap();
        g.set_watch_pointers(id, (c, a)).unwrap();
        assert_eq!(g.gate(id).unwrap().watch_pointers(), Some((c, a)));
        assert_eq!(
            g.set_watch_pointers(GateId::new(2), (a, b)),
            Err(GraphError::NotLearnt(GateId::new(2)))
        );
        let d = g.ensure_line("d");
        assert_eq!(
            g.set_watch_pointers(id, (a, d)),
            Err(GraphError::NotAGateInput { gate: id, line: d })
        );
        assert!(matches!(
            g.set_watch_pointers(GateId::new(99), (a, b)),
            Err(GraphError::UnknownGateId { .. })
        ));
    }

    #[test]
    fn test_unknown_id() {
        let mut g = CircuitGraph::new();
        for n in ["a", "b", "c", "d", "e"] {
            g.ensure_line(n);
        }
        assert_eq!(
            g.line(LineId::new(9999)),
            Err(GraphError::UnknownLineId {
                id: LineId::new(9999),
                nb_lines: 5
            })
        );
        assert_eq!(g.line(LineId::new(4)).unwrap().name(), "e");
        assert!(g.gate(GateId::new(0)).is_err());
        assert!(g.gate_to_string(GateId::new(0)).is_err());
        assert_eq!(g.line_id("f"), None);
    }

    #[test]
    fn test_render() {
        let mut g = and_circuit();
        g.add_gate(GateType::Xnor, &["a", "c"], "d").unwrap();
        assert_eq!(g.gate_to_string(GateId::new(0)).unwrap(), "a = Input()");
        assert_eq!(g.gate_to_string(GateId::new(2)).unwrap(), "c = AND(a, b)");
        assert_eq!(g.gate_to_string(GateId::new(3)).unwrap(), "d = XNOR(a, c)");
        let s = format!("{g}");
        assert!(s.starts_with("Circuit with 2 inputs, 1 outputs:\n"));
        assert!(s.contains("\tc = AND(a, b)\n"));
    }
}
