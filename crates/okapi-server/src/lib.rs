mod app;
mod cli;
mod error;
mod handlers;

pub use app::build_router;
pub use cli::{exit_code, Cli};
pub use error::AppError;
pub use handlers::{AppState, QueryResponse, QueryResultEntry, Statistics};
