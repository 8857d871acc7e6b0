//! Core library components.
//!
//! The key store and lock codec form the engine; the remaining modules are
//! the project-level plumbing the CLI is built from.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod diff;
pub mod files;
pub mod gitignore;
pub mod hooks;
pub mod keystore;
pub mod status;
