//! weatherview library
//!
//! This module exposes the client, state machine and rendering modules for
//! use by the binary and integration tests.

pub mod app;
pub mod cli;
pub mod clock;
pub mod data;
pub mod dispatch;
pub mod location;
pub mod logging;
pub mod theme;
pub mod ui;
