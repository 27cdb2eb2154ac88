// Product analysis client

// Configuration and shared plumbing
pub mod config;
pub mod logging;
pub mod messages;

// Requests and their dispatch
pub mod dispatcher;
pub mod request;

// UI handles and the click flow
pub mod cli;
pub mod handler;
pub mod ui;

#[cfg(test)]
mod testing;

pub use cli::{Cli, run};
