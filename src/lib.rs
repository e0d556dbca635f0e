//! predict-api: an HTTP service exposing a liveness probe and a file-upload
//! prediction endpoint.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
