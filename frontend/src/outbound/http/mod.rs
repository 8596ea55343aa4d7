//! REST backend adapters.
//!
//! One reqwest client implements every API port. Resource files hold the
//! endpoint paths and DTO mapping for each port; `client` owns transport,
//! headers and status mapping.

mod auth;
mod client;
mod dto;
mod employees;
mod projects;
mod tasks;

pub use client::HttpApiClient;
