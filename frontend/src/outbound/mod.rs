//! Driven adapters: the REST backend and the on-disk session store.

pub mod http;
pub mod session;
