pub mod batch;
pub mod config;
pub mod error;
pub mod output;
pub mod scoring;
