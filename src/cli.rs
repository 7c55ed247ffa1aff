//! Argument grammar for the `index` and `search` subcommands.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "boolean_index", about = "A SPIMI boolean inverted-index engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Builds an index over a corpus directory.
    Index {
        input_dir: String,
        block_size: usize,
        output_file: String,
        #[arg(long, value_delimiter = ',')]
        extensions: Vec<String>,
        #[arg(long, value_enum)]
        compress: Option<CompressionScheme>,
        #[arg(long, default_value_t = 0)]
        skips: usize,
    },
    /// Evaluates a boolean query against a built index.
    Search {
        query: String,
        index_file: String,
        #[arg(long, default_value_t = 0)]
        skips: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressionScheme {
    Block,
    Front,
    String,
}
