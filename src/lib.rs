pub mod config;
pub mod content;
pub mod error;
pub mod handler;
pub mod internationalization;

pub use error::{Error, Result};
