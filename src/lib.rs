// src/lib.rs

pub mod api;
pub mod classifier;
pub mod config;
pub mod mood_log;
pub mod notify;
pub mod server;
pub mod services;
pub mod state;
