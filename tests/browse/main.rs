//! Browse integration tests.

mod state;
mod driver;
