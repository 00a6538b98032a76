use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cfgdom - dominator trees for control flow graphs
#[derive(Debug, Parser)]
#[command(name = "cfgdom", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Verify every computed dominator tree before printing it.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Abort when the dominator fixpoint needs more than this many passes.
    #[arg(long, global = true, value_name = "N")]
    pub max_passes: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute and print the dominator tree of a graph.
    Tree {
        /// Path to the edge-list file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Output format: text, json, dot.
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the postorder numbering the dominator builder works with.
    Postorder {
        /// Path to the edge-list file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Output format: text, json, dot.
        #[arg(long, default_value = "text")]
        format: String,
    },
}
