//! HTTP front end for the [`accounts`] library.
//!
//! - [`api`]: router, handlers, bearer-token guard and request-id middleware
//! - [`config`]: environment-driven server configuration
//! - [`logging`]: tracing subscriber setup and structured log helpers

pub mod api;
pub mod config;
pub mod logging;
