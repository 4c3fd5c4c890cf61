//! Driven port for the relational data API.

use async_trait::async_trait;

use crate::domain::NewProfile;

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile record adapters.
    pub enum ProfileRecordsError {
        /// The data API answered with a non-success status.
        Rejected { message: String } => "data API rejected profile: {message}",
        /// The data API could not be reached.
        Transport { message: String } => "data API transport failure: {message}",
    }
}

/// Port for persisting the profile record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRecords: Send + Sync {
    /// Create the profile record.
    async fn create(&self, profile: &NewProfile) -> Result<(), ProfileRecordsError>;
}

/// Fixture adapter that accepts every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRecords;

#[async_trait]
impl ProfileRecords for FixtureProfileRecords {
    async fn create(&self, _profile: &NewProfile) -> Result<(), ProfileRecordsError> {
        Ok(())
    }
}
