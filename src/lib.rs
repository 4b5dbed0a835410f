//! tty-countdown library crate.
//!
//! This module exposes the internal components for integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod font;
pub mod input;
pub mod layout;
pub mod notify;
pub mod render;
pub mod session;
pub mod settings;
pub mod terminal;
pub mod timer;
