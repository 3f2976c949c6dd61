//! HTTP transport and command line front end for `boundary-classifiers`.
pub mod commands;
pub mod config;
pub mod routes;
pub mod server;
