//! Command line dashboard for companies recruiting interns
pub mod actions;
pub mod cli;
pub mod client;
mod credentials;
pub mod dashboard;
pub mod logging;
pub mod notify;
pub mod paths;
pub mod render;
pub mod session;
pub mod settings;
pub mod views;

#[cfg(test)]
mod test_utils;
