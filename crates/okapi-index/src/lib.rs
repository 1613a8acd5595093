mod error;
mod indexer;
mod pipeline;
mod report;
mod scanner;
mod snapshot;

pub use error::IndexerError;
pub use indexer::Indexer;
pub use report::{IndexReport, SkipReason};
pub use scanner::scan_files;
pub use snapshot::IndexSnapshot;
