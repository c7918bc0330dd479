//! Domain layer for bizcore
//!
//! Holds the provider lifecycle contracts, the error taxonomy and the
//! naming value objects shared by every other layer. This crate depends
//! only on serialization and trait plumbing; no provider implementation
//! and no runtime concern lives here.

pub mod error;
pub mod naming;
pub mod ports;

pub use error::{Error, Result, ResultExt};
pub use naming::CollectionNames;
