//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chef role survey: collect, inspect and export responses
#[derive(Parser)]
#[command(name = "chef-survey")]
#[command(about = "chef-survey - Assign each chef a role and see how everyone voted", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (defaults to ./survey.toml when present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file)
        #[arg(short = 'p', long)]
        port: Option<u16>,
    },

    /// List the chefs and roles
    Catalog,

    /// Record a response from the command line
    Submit {
        /// Respondent name
        #[arg(short = 'n', long)]
        name: String,

        /// Respondent email
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Assignment as CHEF=ROLE; later flags take a role away from earlier holders
        #[arg(short = 'a', long = "assign", value_name = "CHEF=ROLE")]
        assignments: Vec<String>,
    },

    /// Show role counts for every chef
    Stats {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every stored response
    Results,

    /// Write all responses as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Delete all responses
    Reset {
        /// Confirm the deletion
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}
