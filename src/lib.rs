pub mod advisor;
pub mod app;
pub mod config;
pub mod error;
pub mod llm;
pub mod presenter;
pub mod quota;
pub mod request;
pub mod server;

pub use error::{Error, Result};
