//! Role-aware client for the project, task and employee management API.
//!
//! The crate is laid out hexagonally: [`domain`] holds the authorization
//! rules, the project wizard and the page services; [`outbound`] implements
//! the REST and session-store ports; [`inbound`] drives everything from the
//! command line.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::TraceId;
