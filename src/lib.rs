//! Animal guessing game.
//!
//! A binary tree of yes/no questions ending in animal guesses. Each round
//! walks the tree from the root; a wrong guess teaches the tree a new
//! question that tells the two animals apart. The tree is stored as one
//! record per line between sessions.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
