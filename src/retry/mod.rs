//! Retry module
//! - policy.rs: exponential-backoff policy and the executor that applies it

pub mod policy;

pub use policy::*;
