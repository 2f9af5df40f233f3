//! CLI module for the experiment mutex engine
//!
//! Runs exclusion operations against a JSON snapshot of experiments and
//! exclusions and prints results as JSON.

pub mod exclusion;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Experiment mutex - manage mutual exclusion between experiments
#[derive(Parser)]
#[command(name = "experiment-mutex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Snapshot file to operate on (overrides configuration)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List experiments mutually exclusive with an experiment
    Exclusions {
        experiment_id: String,
    },

    /// List experiments of the same application that are not exclusive with it
    NonExclusions {
        experiment_id: String,
    },

    /// Make candidates mutually exclusive with a base experiment
    Create {
        base_id: String,

        #[arg(required = true)]
        candidates: Vec<String>,

        /// User recorded as the author of the change
        #[arg(long)]
        user: String,

        /// Email of the author
        #[arg(long)]
        email: Option<String>,
    },

    /// Remove the exclusion between two experiments
    Delete {
        first_id: String,
        second_id: String,

        /// User recorded as the author of the change
        #[arg(long)]
        user: String,

        /// Email of the author
        #[arg(long)]
        email: Option<String>,
    },
}
