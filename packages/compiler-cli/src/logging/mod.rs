//! Logging
//!
//! Console backend for the `log` facade.

pub mod console_logger;

pub use console_logger::ConsoleLogger;
