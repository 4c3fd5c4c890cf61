//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CurrentUserQuery, SignupFlow};
use crate::outbound::InMemoryCurrentUserCache;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup orchestration use-case.
    pub signup: Arc<dyn SignupFlow>,
    /// Current-user resolution for the header.
    pub current_user: Arc<dyn CurrentUserQuery>,
    /// Cache primed on signup success so the header resolves immediately.
    pub user_cache: Arc<InMemoryCurrentUserCache>,
}

impl HttpState {
    /// Construct state from a flow and a fresh cache used for both reads
    /// and priming.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use photofeed::domain::ports::FixtureSignupFlow;
    /// use photofeed::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureSignupFlow));
    /// let _signup = state.signup.clone();
    /// ```
    #[must_use]
    pub fn new(signup: Arc<dyn SignupFlow>) -> Self {
        let cache = Arc::new(InMemoryCurrentUserCache::default());
        Self {
            signup,
            current_user: cache.clone(),
            user_cache: cache,
        }
    }

    /// Construct state with an explicit current-user query, keeping the
    /// cache for signup priming.
    #[must_use]
    pub fn with_current_user(
        signup: Arc<dyn SignupFlow>,
        current_user: Arc<dyn CurrentUserQuery>,
    ) -> Self {
        Self {
            signup,
            current_user,
            user_cache: Arc::new(InMemoryCurrentUserCache::default()),
        }
    }
}
