pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scanner;
pub mod sheet;
