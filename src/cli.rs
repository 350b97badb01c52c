//! CLI definitions for TransAssist.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// TransAssist CLI.
#[derive(Parser)]
#[command(name = "transassist")]
#[command(about = "AI-assisted translation for web-based translation platforms")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.transassist/config.toml)
    #[arg(short, long, global = true, env = "TRANSASSIST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List registered sites
    Sites {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show how a hostname or URL resolves
    CheckSite {
        /// Hostname or page URL
        host: String,
    },

    /// Run discovery and injection over a saved page
    Scan {
        /// HTML file to scan
        file: PathBuf,

        /// Hostname the page was served from
        #[arg(long)]
        host: String,

        /// Translate every decorated input through the background service
        #[arg(long)]
        translate: bool,

        /// Write translations into the inputs (implies --translate)
        #[arg(long)]
        apply: bool,

        /// Write the resulting page here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve background requests as JSON lines on stdin/stdout
    Bridge,

    /// Always load the assistant on a host that is not a registered site
    ForceEnable {
        /// Hostname or page URL
        host: String,

        /// Remove the host from the list instead
        #[arg(long)]
        disable: bool,
    },

    /// Check the configuration file and site catalog
    Validate,
}
