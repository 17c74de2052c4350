//! Command implementations.

pub mod alias;
pub mod cache;
pub mod config;
pub mod init;
pub mod resolve;
