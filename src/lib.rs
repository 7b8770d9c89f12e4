pub mod types;
pub mod error;
pub mod client;
pub mod config;
pub mod controller;
pub mod presenter;
pub mod utils;

#[cfg(test)]
mod tests;
