mod builder;
mod types;

pub use builder::{DEFAULT_IMAGE_MIME_TYPE, MAX_AGE};
pub use types::*;
