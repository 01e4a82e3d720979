//! # care
//!
//! Authoring tool for remote config documents: scaffold, lint, preview resolution for a
//! client, sign and publish.

#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;
pub mod services;
