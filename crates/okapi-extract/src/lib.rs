mod error;
mod strategy;

pub use error::ExtractError;
pub use strategy::ContentStrategy;
