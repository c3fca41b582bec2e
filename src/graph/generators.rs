//! Circuit generators and templates
//!
//! All generators build the graph through the construction API, in the same order a
//! netlist reader would.

/// Adder generators
pub mod adder {
    use crate::{CircuitGraph, GateType, GraphError};

    /// A simple and slow ripple-carry adder, with inputs `a<i>`, `b<i>` and outputs `s<i>`, `cout`
    pub fn ripple_carry(len: usize) -> Result<CircuitGraph, GraphError> {
        let mut ret = CircuitGraph::new();
        for i in 0..len {
            ret.add_input(&format!("a{i}"));
            ret.add_input(&format!("b{i}"));
        }
        let mut carry: Option<String> = None;
        for i in 0..len {
            let (a, b) = (format!("a{i}"), format!("b{i}"));
            let p = format!("p{i}");
            let g = format!("g{i}");
            let s = format!("s{i}");
            ret.add_gate(GateType::Xor, &[&a, &b], &p)?;
            ret.add_gate(GateType::And, &[&a, &b], &g)?;
            let next_carry = format!("c{i}");
            match carry {
                None => {
                    ret.add_gate(GateType::Buff, &[&p], &s)?;
                    ret.add_gate(GateType::Buff, &[&g], &next_carry)?;
                }
                Some(c) => {
                    let t = format!("t{i}");
                    ret.add_gate(GateType::Xor, &[&p, &c], &s)?;
                    ret.add_gate(GateType::And, &[&p, &c], &t)?;
                    ret.add_gate(GateType::Or, &[&g, &t], &next_carry)?;
                }
            }
            ret.add_output(&s);
            carry = Some(next_carry);
        }
        if let Some(c) = carry {
            ret.add_gate(GateType::Buff, &[&c], "cout")?;
            ret.add_output("cout");
        }
        ret.check();
        Ok(ret)
    }
}

/// Parity generators
pub mod parity {
    use crate::{CircuitGraph, GateType, GraphError};

    /// A balanced tree of Xor gates over inputs `i<k>`, with a single output `parity`
    pub fn xor_tree(len: usize) -> Result<CircuitGraph, GraphError> {
        let mut ret = CircuitGraph::new();
        let mut level: Vec<String> = (0..len).map(|i| format!("i{i}")).collect();
        for name in &level {
            ret.add_input(name);
        }
        let mut cnt = 0;
        while level.len() > 1 {
            let mut next_level = Vec::new();
            for pair in level.chunks(2) {
                if let [a, b] = pair {
                    let x = format!("x{cnt}");
                    cnt += 1;
                    ret.add_gate(GateType::Xor, &[a, b], &x)?;
                    next_level.push(x);
                } else {
                    next_level.push(pair[0].clone());
                }
            }
            level = next_level;
        }
        if let Some(last) = level.first() {
            ret.add_gate(GateType::Buff, &[last], "parity")?;
            ret.add_output("parity");
        }
        ret.check();
        Ok(ret)
    }
}

/// Random circuits, to exercise the datastructure
pub mod random {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{CircuitGraph, GateType, GraphError};

    /// Generate a random combinational circuit
    ///
    /// Gates only use lines created before them, so the circuit is acyclic. Lines that are
    /// not used by any gate become primary outputs.
    pub fn random_circuit(
        nb_inputs: usize,
        nb_gates: usize,
        seed: u64,
    ) -> Result<CircuitGraph, GraphError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ret = CircuitGraph::new();
        let mut names: Vec<String> = Vec::new();
        for i in 0..nb_inputs {
            let name = format!("i{i}");
            ret.add_input(&name);
            names.push(name);
        }
        if names.is_empty() {
            return Ok(ret);
        }
        let types = &GateType::ALL[1..];
        for i in 0..nb_gates {
            let tp = types[rng.gen_range(0..types.len())];
            let nb_deps = match tp.arity() {
                crate::Arity::Exactly(n) => n,
                crate::Arity::AtLeast(n) => rng.gen_range(n..n + 3),
            };
            let deps: Vec<&str> = (0..nb_deps)
                .map(|_| names[rng.gen_range(0..names.len())].as_str())
                .collect();
            let name = format!("x{i}");
            ret.add_gate(tp, deps.as_slice(), &name)?;
            names.push(name);
        }
        let unused: Vec<String> = ret
            .lines()
            .iter()
            .filter(|l| l.fanout().is_empty())
            .map(|l| l.name().to_string())
            .collect();
        for name in unused {
            ret.add_output(&name);
        }
        ret.check();
        Ok(ret)
    }
}
