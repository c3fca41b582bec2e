use std::fmt;

use crate::graph::error::GraphError;
use crate::graph::line::LineId;

/// Identity of a gate in a circuit graph
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct GateId(u32);

impl GateId {
    /// Create an identity from a raw index
    pub fn new(i: usize) -> GateId {
        GateId(i as u32)
    }

    /// Obtain the index of the gate in the graph storage
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Logic function of a gate
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum GateType {
    /// Primary input, with no fanin
    Input,
    /// N-input And gate
    And,
    /// N-input Nand gate
    Nand,
    /// Inverter
    Not,
    /// N-input Or gate
    Or,
    /// N-input Nor gate
    Nor,
    /// 2-input Xor gate
    Xor,
    /// 2-input Xnor gate
    Xnor,
    /// Buffer
    Buff,
}

impl GateType {
    /// All gate types, in order
    pub const ALL: [GateType; 9] = [
        GateType::Input,
        GateType::And,
        GateType::Nand,
        GateType::Not,
        GateType::Or,
        GateType::Nor,
        GateType::Xor,
        GateType::Xnor,
        GateType::Buff,
    ];

    /// Name of the gate type, as used when rendering gates
    pub fn name(&self) -> &'static str {
        use GateType::*;
        match self {
            Input => "Input",
            And => "AND",
            Nand => "NAND",
            Not => "NOT",
            Or => "OR",
            Nor => "NOR",
            Xor => "XOR",
            Xnor => "XNOR",
            Buff => "BUFF",
        }
    }

    /// Number of inputs accepted by this type of gate
    pub fn arity(&self) -> Arity {
        use GateType::*;
        match self {
            Input => Arity::Exactly(0),
            And | Nand | Or | Nor => Arity::AtLeast(2),
            Xor | Xnor => Arity::Exactly(2),
            Not | Buff => Arity::Exactly(1),
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Number of inputs accepted by a gate
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Arity {
    /// Exactly this number of inputs
    Exactly(usize),
    /// This number of inputs or more
    AtLeast(usize),
}

impl Arity {
    /// Returns whether a gate with this number of inputs is valid
    pub fn accepts(&self, nb_inputs: usize) -> bool {
        match self {
            Arity::Exactly(n) => nb_inputs == *n,
            Arity::AtLeast(n) => nb_inputs >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Sign of a literal in a learnt clause
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Polarity {
    /// The line appears as is
    Positive,
    /// The line appears complemented
    Negative,
}

impl Polarity {
    /// Signed representation: 1 or -1
    pub fn sign(&self) -> i32 {
        match self {
            Polarity::Positive => 1,
            Polarity::Negative => -1,
        }
    }

    /// Returns true for a complemented literal
    pub fn is_negative(&self) -> bool {
        *self == Polarity::Negative
    }
}

impl TryFrom<i32> for Polarity {
    type Error = GraphError;

    fn try_from(s: i32) -> Result<Polarity, GraphError> {
        match s.signum() {
            1 => Ok(Polarity::Positive),
            -1 => Ok(Polarity::Negative),
            _ => Err(GraphError::InvalidPolarity(s)),
        }
    }
}

impl From<bool> for Polarity {
    /// True for a complemented literal, in the same way as an inverted signal
    fn from(negative: bool) -> Polarity {
        if negative {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }
}

/// Extra data of a learnt gate: one polarity per input and the two watched literals
#[derive(Debug, Clone, PartialEq, Eq)]
struct LearntClause {
    polarities: Box<[Polarity]>,
    watches: (LineId, LineId),
}

/// Logic gate, connecting ordered input lines to at most one output line
///
/// Learnt gates are Or clauses over signed literals: they have no output line, and carry
/// the polarity of each input along with two watched inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    id: GateId,
    tp: GateType,
    inputs: Box<[LineId]>,
    output: Option<LineId>,
    clause: Option<Box<LearntClause>>,
}

impl Gate {
    /// Create a primary input gate driving the line
    pub(crate) fn input(id: GateId, output: LineId) -> Gate {
        Gate {
            id,
            tp: GateType::Input,
            inputs: Box::new([]),
            output: Some(output),
            clause: None,
        }
    }

    /// Create a logic gate; arity must have been checked already
    pub(crate) fn logic(id: GateId, tp: GateType, inputs: Box<[LineId]>, output: LineId) -> Gate {
        debug_assert!(tp.arity().accepts(inputs.len()));
        Gate {
            id,
            tp,
            inputs,
            output: Some(output),
            clause: None,
        }
    }

    /// Create a learnt Or clause, watching its first two inputs
    pub(crate) fn learnt(id: GateId, inputs: Box<[LineId]>, polarities: Box<[Polarity]>) -> Gate {
        debug_assert!(inputs.len() >= 2 && inputs.len() == polarities.len());
        let watches = (inputs[0], inputs[1]);
        Gate {
            id,
            tp: GateType::Or,
            inputs,
            output: None,
            clause: Some(Box::new(LearntClause {
                polarities,
                watches,
            })),
        }
    }

    /// Identity of the gate
    pub fn id(&self) -> GateId {
        self.id
    }

    /// Logic function of the gate; always Or for a learnt gate
    pub fn gate_type(&self) -> GateType {
        self.tp
    }

    /// Input lines, in positional order
    pub fn inputs(&self) -> &[LineId] {
        &self.inputs
    }

    /// Output line; None for a learnt gate
    pub fn output(&self) -> Option<LineId> {
        self.output
    }

    /// Returns whether this is a learnt clause rather than a circuit gate
    pub fn is_learnt(&self) -> bool {
        self.clause.is_some()
    }

    /// Polarity of each input of a learnt gate
    pub fn inputs_polarity(&self) -> Option<&[Polarity]> {
        self.clause.as_ref().map(|c| c.polarities.as_ref())
    }

    /// Watched inputs of a learnt gate
    pub fn watch_pointers(&self) -> Option<(LineId, LineId)> {
        self.clause.as_ref().map(|c| c.watches)
    }

    pub(crate) fn set_watch_pointers(&mut self, watches: (LineId, LineId)) -> bool {
        match &mut self.clause {
            Some(c) => {
                c.watches = watches;
                true
            }
            None => false,
        }
    }

    /// Input lines with their polarity; circuit gate inputs are all positive
    pub fn literals(&self) -> impl Iterator<Item = (LineId, Polarity)> + '_ {
        self.inputs.iter().enumerate().map(|(i, l)| {
            let p = match &self.clause {
                Some(c) => c.polarities[i],
                None => Polarity::Positive,
            };
            (*l, p)
        })
    }
}
