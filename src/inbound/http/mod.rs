//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod header;
pub mod health;
pub mod session;
pub mod signup;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
