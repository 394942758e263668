pub mod cli;
pub mod config;
pub mod consts;
pub mod core;
pub mod error;
