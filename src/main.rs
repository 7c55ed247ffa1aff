use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use boolean_index::cli::{Cli, Command};
use boolean_index::index::Index;
use boolean_index::paths::{self, DEFAULT_CORPUS_DIR, DEFAULT_INDICES_DIR};
use boolean_index::text::TextPipeline;
use boolean_index::{build_compressed_dictionary, build_index, run_search};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let pipeline = TextPipeline::new();

    match cli.command {
        Command::Index {
            input_dir,
            block_size,
            output_file,
            extensions,
            compress,
            skips,
        } => {
            let input_path = paths::resolve_path(&input_dir, DEFAULT_CORPUS_DIR);
            let output_path = paths::resolve_path(&output_file, DEFAULT_INDICES_DIR);

            build_index(&input_path, block_size, &output_path, &extensions, &pipeline)
                .with_context(|| format!("failed to build index from {}", input_path.display()))?;

            if let Some(scheme) = compress {
                build_compressed_dictionary(&output_path, scheme)
                    .with_context(|| "failed to build compressed dictionary")?;
            }

            if skips > 0 {
                // Eagerly materializes the `.skips` sidecar so the first `search`
                // against this index doesn't pay the skip-table build cost.
                Index::load(&output_path, skips)
                    .with_context(|| "failed to pre-materialize skip sidecar")?;
            }
            Ok(())
        }
        Command::Search {
            query,
            index_file,
            skips,
        } => {
            let index_path = paths::resolve_path(&index_file, DEFAULT_INDICES_DIR);
            let matches = run_search(&query, Path::new(&index_path), skips, &pipeline)
                .with_context(|| format!("failed to search {}", index_path.display()))?;

            let mut ids: Vec<String> = matches.into_iter().map(|d| d.as_str().to_string()).collect();
            ids.sort();
            for id in ids {
                println!("{id}");
            }
            Ok(())
        }
    }
}
