// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use seasync_core::{PollutionType, Severity};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "seasync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first marine pollution reporting")]
#[command(
    long_about = "Offline-first marine pollution reporting.\n\n\
    Reports are submitted to the remote server when it is reachable and \
    queued on this device otherwise. The queue is drained when the server \
    becomes reachable again."
)]
pub struct Cli {
    /// Directory holding the local store and config.toml
    #[arg(long, global = true, env = "SEASYNC_DATA_DIR", value_name = "path")]
    pub data_dir: Option<PathBuf>,

    /// Remote server URL (overrides config)
    #[arg(long, global = true, value_name = "url")]
    pub remote: Option<String>,

    /// Log debug output to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report a pollution sighting
    #[command(after_help = "\
Examples:
  seasync add plastic \"Bottles on the beach\" --lat 33.77 --lon -118.19
  seasync add oil-spill \"Sheen near pier\" --lat 33.75 --lon -118.17 -s high
  seasync add debris \"Ghost net\" --lat 33.76 --lon -118.18 --photo net.jpg")]
    Add {
        /// Pollution type (plastic, oil-spill, debris, chemical, sewage, other)
        pollution_type: PollutionType,

        /// What was seen
        #[arg(value_parser = non_empty_string)]
        description: String,

        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Severity (low, medium, high, critical)
        #[arg(long, short)]
        severity: Option<Severity>,

        /// Photo to attach
        #[arg(long, value_name = "FILE")]
        photo: Option<PathBuf>,

        /// Reporter id (overrides config user_id)
        #[arg(long)]
        user: Option<String>,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List known reports, including ones still queued on this device
    List {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show connectivity and queue status
    Status {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Submit queued reports now
    Sync,

    /// Re-fetch reports from the server
    Refresh,

    /// Add the sample reports (once per installation)
    Seed,

    /// Stay running and submit queued reports whenever the server is reachable
    Watch,
}
