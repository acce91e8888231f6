pub mod config;
pub mod engine;
pub mod models;
pub mod rules;
pub mod storage;
pub mod types;
pub mod window;
