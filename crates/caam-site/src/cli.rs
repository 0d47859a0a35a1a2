use std::path::PathBuf;

use caam_core::FilterSelection;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "caam-site", version, about = "Fetch and prepare the CAAM website's sheet-driven data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch both sheets and write page data and rendered documents
    Build {
        /// Output directory (overrides CAAM_OUTPUT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Fail the build when the events sheet is unavailable too
        #[arg(long)]
        strict: bool,
    },
    /// Print the next, upcoming and past events
    Events,
    /// Search the member directory
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Speciality to match (repeatable)
    #[arg(long)]
    pub speciality: Vec<String>,
    /// Language to match (repeatable)
    #[arg(long)]
    pub language: Vec<String>,
    /// City to match, or "Non-CA" (repeatable)
    #[arg(long)]
    pub city: Vec<String>,
    /// "CA", "Non-CA" or a literal state (repeatable)
    #[arg(long)]
    pub state: Vec<String>,
}

impl SearchArgs {
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            speciality: self.speciality.iter().cloned().collect(),
            language: self.language.iter().cloned().collect(),
            city: self.city.iter().cloned().collect(),
            state: self.state.iter().cloned().collect(),
        }
    }
}
