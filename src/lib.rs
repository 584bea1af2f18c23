//! Roster - a tiny HTTP/1.1 record server
//!
//! Core library for request parsing, routing, handlers and record storage.

pub mod app;
pub mod config;
pub mod http;
pub mod server;
pub mod store;
