mod engine;

pub use engine::{query, DocumentScore};
