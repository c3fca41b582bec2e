use std::fmt;

use crate::graph::gate::GateId;

/// Identity of a line in a circuit graph
///
/// Lines are numbered in creation order, starting at zero, and the numbering is never reused.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct LineId(u32);

impl LineId {
    /// Create an identity from a raw index
    pub fn new(i: usize) -> LineId {
        LineId(i as u32)
    }

    /// Obtain the index of the line in the graph storage
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for LineId {
    fn from(i: usize) -> LineId {
        LineId::new(i)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

/// A named signal, with at most one driving gate and any number of consuming gates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    name: String,
    is_output: bool,
    source: Option<GateId>,
    fanout: Vec<GateId>,
}

impl Line {
    pub(crate) fn new(id: LineId, name: &str) -> Line {
        Line {
            id,
            name: name.to_string(),
            is_output: false,
            source: None,
            fanout: Vec::new(),
        }
    }

    /// Identity of the line
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Name of the line in the netlist
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the line is a primary output
    pub fn is_output(&self) -> bool {
        self.is_output
    }

    /// Gate driving the line, if any
    pub fn source(&self) -> Option<GateId> {
        self.source
    }

    /// Returns whether a gate drives the line
    pub fn is_driven(&self) -> bool {
        self.source.is_some()
    }

    /// Gates using the line as an input, in creation order
    pub fn fanout(&self) -> &[GateId] {
        &self.fanout
    }

    pub(crate) fn set_output(&mut self) {
        self.is_output = true;
    }

    /// Set the driver, returning the previous one
    pub(crate) fn set_source(&mut self, gate: GateId) -> Option<GateId> {
        self.source.replace(gate)
    }

    /// Record a consuming gate
    ///
    /// Gates are created in increasing id order, so a gate using the same line twice
    /// is always the last one recorded.
    pub(crate) fn connect_as_input(&mut self, gate: GateId) {
        if self.fanout.last() != Some(&gate) {
            self.fanout.push(gate);
        }
    }
}
