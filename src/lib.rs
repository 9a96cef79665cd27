pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use error::{LoaderError, Result};
pub use loader::{LoadRequest, LoadSummary, ObservationLoader};
pub use models::ResultCode;
