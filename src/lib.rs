pub mod api;
pub mod context;
pub mod error;
pub mod oauth;
pub mod timefmt;

pub use api::{ApiResponse, Client};
pub use context::{AppPaths, Environment};
pub use error::YtreportyError;
