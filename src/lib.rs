//! # gitwalk
//!
//! Walk directory trees for Git repositories, report their state, and run
//! commands across them.
//!
//! The crate is organized as a small pipeline:
//!
//! - [`core::discover_repos`] finds repositories under a root directory
//! - [`git::classify`] loads branch, working-tree status, and remotes
//! - [`core::StatusFilter`] and [`core::ListFilters`] select the survivors
//! - [`core::print_record`] reports each one at the chosen level
//! - [`core::execute_actions`] runs a command in each, one at a time
//!
//! Everything that touches git goes through the [`git::GitBackend`] trait,
//! so the pipeline can be exercised in tests without spawning processes.

pub mod commands;
pub mod core;
pub mod git;
pub mod utils;
