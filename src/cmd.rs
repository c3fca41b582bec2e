//! Command line interface

use crate::io::{read_network_file, Error};
use crate::CircuitGraph;
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};

/// Command line arguments
///
/// Read a combinational netlist in .bench (ISCAS89) format and build its circuit graph.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Netlist to read
    pub file: PathBuf,

    /// Show statistics about the circuit: number of inputs, outputs, lines and gates by type
    #[arg(short, long)]
    pub stats: bool,

    /// Show every gate of the circuit
    #[arg(short, long)]
    pub list: bool,

    /// Increase logging verbosity; may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Options of a run, passed explicitly to the entry points that need them
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Print the gate listing after reading
    pub write_gates: bool,
    /// Print the statistics after reading
    pub write_stats: bool,
}

impl Cli {
    /// Options selected on the command line
    pub fn config(&self) -> Config {
        Config {
            write_gates: self.list,
            write_stats: self.stats,
        }
    }

    /// Logging level selected on the command line
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Read the netlist and report on it
    pub fn run(&self) -> Result<CircuitGraph, Error> {
        run(&self.file, &self.config())
    }
}

/// Read a netlist and print the reports requested by the configuration
pub fn run(file: &Path, config: &Config) -> Result<CircuitGraph, Error> {
    let graph = read_network_file(file)?;
    info!(
        "Read {}: {} inputs, {} outputs, {} gates",
        file.display(),
        graph.nb_inputs(),
        graph.nb_outputs(),
        graph.nb_gates()
    );
    if config.write_gates {
        print!("{}", graph);
    }
    if config.write_stats {
        println!("{}", graph.graph_stats());
    }
    Ok(graph)
}
