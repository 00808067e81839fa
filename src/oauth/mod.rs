pub mod refresh;
pub mod store;
pub mod token;
