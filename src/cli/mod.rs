//! CLI module for the Build List API
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `parse`: extract a materials list from a plan once and print it

pub mod parse;
pub mod serve;

use clap::{Parser, Subcommand};

/// Build List API - materials extraction and Home Depot pricing
#[derive(Parser)]
#[command(name = "buildlist-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve(serve::ServeArgs),

    /// Parse a build plan into a materials list and print it as JSON
    Parse(parse::ParseArgs),
}
