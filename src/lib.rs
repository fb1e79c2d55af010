pub mod api;
pub mod core;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
