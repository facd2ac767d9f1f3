//! # Clinic Dashboard Common Library
//!
//! Shared code for the clinic dashboard service including:
//! - Dataset model and the on-disk snapshot reader
//! - Configuration loading
//! - Timestamp parsing utilities
//! - Common error types

pub mod config;
pub mod dataset;
pub mod error;
pub mod time;

pub use dataset::{Dataset, DatasetReader, RosterEntry, Satisfaction};
pub use error::{Error, Result};
