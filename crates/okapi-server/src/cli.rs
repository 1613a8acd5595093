use std::path::PathBuf;

use clap::Parser;

/// Okapi — a BM25 full-text search service over a directory of documents.
#[derive(Parser, Debug)]
#[command(name = "okapi", version, about, long_about = None)]
pub struct Cli {
    /// TCP port the HTTP query server listens on
    pub query_port: u16,

    /// Directory of documents to index
    pub directory_to_index: PathBuf,

    /// Directory holding the persisted index snapshot and content store
    pub index_path: PathBuf,
}

/// Process exit codes, matching the shape of the original CLI contract:
/// normal shutdown, bad arguments, and fatal initialization failure.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BAD_ARGUMENTS: i32 = 1;
    pub const FATAL_INIT: i32 = 2;
}
