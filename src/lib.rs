//! staticd - minimal HTTP/1.1 static file server
//!
//! Core library for request parsing, response building and connection handling.

pub mod config;
pub mod http;
pub mod resource;
pub mod server;
