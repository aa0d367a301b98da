pub mod config;
pub mod engine;
pub mod gateway;
pub mod generator;
pub mod memory;
pub mod nlp;
pub mod types;
