//! # DH Development Tools
//!
//! Command-line tools for development:
//! - RON data loading and validation
//! - Quick rules calculations from the terminal

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod loader;
pub mod validate;
