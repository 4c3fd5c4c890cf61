//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the flow reaches its collaborators (auth
//! provider, object storage, data API, current-user cache); the driving
//! port is what inbound adapters call. Each trait exposes strongly typed
//! errors so adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod avatar_store;
mod current_user;
mod profile_records;
mod signup_flow;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{AuthGateway, AuthGatewayError, FixtureAuthGateway};
#[cfg(test)]
pub use avatar_store::MockAvatarStore;
pub use avatar_store::{AvatarStore, AvatarStoreError, FixtureAvatarStore};
#[cfg(test)]
pub use current_user::MockCurrentUserQuery;
pub use current_user::{CurrentUserQuery, CurrentUserQueryError, FixtureCurrentUserQuery};
#[cfg(test)]
pub use profile_records::MockProfileRecords;
pub use profile_records::{FixtureProfileRecords, ProfileRecords, ProfileRecordsError};
pub use signup_flow::{FixtureSignupFlow, SignupFlow};
