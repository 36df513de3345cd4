//! Lantern - a small one-request-per-connection HTTP/1.1 server
//!
//! Core library: request parsing, routing, gzip negotiation and response
//! serialization, plus the listener that drives them.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
