//! Auth backend integration tests.
//!
//! Starts the axum backend on an ephemeral port and exercises it with reqwest.

#![cfg(feature = "http")]

mod support;
mod http;
