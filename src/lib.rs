pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod consumer;
pub mod error;
pub mod models;
pub mod prefs;
pub mod prompt;
pub mod provider;
pub mod sse;
