// Core utilities: math helpers and error types

pub mod error;
pub mod math;

pub use error::{ConfigError, ControllerError};
