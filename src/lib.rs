pub mod config;
pub mod engine;
pub mod grading;
pub mod output;
pub mod report;
pub mod session;
