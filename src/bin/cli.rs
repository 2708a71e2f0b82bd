//! chunkstore CLI
//!
//! Command-line interface over a directory-backed chunkstore.

use std::process::ExitCode;
use std::sync::Arc;

use chunkstore::{
    ChunkedStore, Config, ConfigOptions, FileBackend, ReadOutcome, StorageType, TracingLogger,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// chunkstore CLI
#[derive(Parser, Debug)]
#[command(name = "chunkstore-cli")]
#[command(about = "CLI for the chunkstore item store")]
#[command(version)]
struct Args {
    /// Data directory (one file per backend key)
    #[arg(short, long, default_value = "./chunkstore_data")]
    data_dir: String,

    /// Chunk size in bytes
    #[arg(short, long, default_value = "2048")]
    chunk_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set (JSON, or stored as a string if not valid JSON)
        value: String,

        /// Store without compression
        #[arg(long)]
        uncompressed: bool,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chunkstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> chunkstore::Result<()> {
    let options = ConfigOptions::builder()
        .logger(Arc::new(TracingLogger))
        .chunk_size(args.chunk_size)
        .build();
    let config = Arc::new(Config::with_options(options)?);

    let backend = FileBackend::open(&args.data_dir)
        .await
        .map_err(|e| chunkstore::StoreError::backend(args.data_dir.as_str(), e))?;
    let store = ChunkedStore::new(backend, config);

    match args.command {
        Commands::Get { key } => match store.get_item::<Value>(&key).await? {
            ReadOutcome::Found(value) => println!("{}", value),
            ReadOutcome::NotFound(reason) => println!("(nil) {:?}", reason),
        },
        Commands::Set {
            key,
            value,
            uncompressed,
        } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            let storage_type = if uncompressed {
                StorageType::Uncompressed
            } else {
                StorageType::Compressed
            };
            store.set_item(&key, &value, Some(storage_type)).await?;
            println!("OK");
        }
        Commands::Del { key } => {
            store.delete_item(&key).await?;
            println!("OK");
        }
    }

    Ok(())
}
