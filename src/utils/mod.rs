//! Utility modules
//!
//! - `mime`: MIME detection from bytes and file names
//! - `upload`: size/type limits applied to user uploads

pub mod mime;
pub mod upload;

pub use upload::*;
