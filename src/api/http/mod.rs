// src/api/http/mod.rs

pub mod handlers;
mod router;

pub use handlers::AskRequest;
pub use router::http_router;
