//! ht - Terminal Task Manager Library
//!
//! This library provides the core functionality for the ht CLI tool:
//! a task collection with write-through local persistence and a small
//! command interpreter over it.
//!
//! # Core Concepts
//!
//! - **Tasks**: text, priority, optional deadline, completion flag
//! - **Task Store**: the canonical in-memory collection; every mutation
//!   is immediately flushed to a local JSON file
//! - **Command Interpreter**: one line of text in, one result string out,
//!   shared by `exec`, `shell`, and the UI command bar
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `interp`: The embedded command interpreter
//! - `lock`: File locking and atomic writes
//! - `output`: Human and JSON output formatting
//! - `store`: Task collection with write-through persistence
//! - `task`: Task model, filters, and derived stats
//! - `ui`: Full-screen terminal UI

pub mod cli;
pub mod config;
pub mod error;
pub mod interp;
pub mod lock;
pub mod output;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
