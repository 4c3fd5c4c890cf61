//! Header view-model.
//!
//! Pure presentation data: given a feature flag and an optional current
//! user, build the navigation affordances the page header renders. No side
//! effects, no error states: an absent user degrades to a placeholder.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AvatarPath, CurrentUser};

/// Client-side routes the service hands out.
pub mod routes {
    /// Home feed.
    pub const HOME: &str = "/";
    /// Create-post page.
    pub const ADD_POST: &str = "/post";
    /// Likes page.
    pub const LIKES: &str = "/likes";
    /// Login page.
    pub const LOGIN: &str = "/auth/login";

    /// Profile page for a username.
    #[must_use]
    pub fn profile(username: &crate::domain::Username) -> String {
        format!("/user/{username}")
    }
}

/// Profile badge in the header's trailing corner.
///
/// With a loaded user the badge links to their profile and shows their
/// avatar; before the user resolves it links to the login page and shows
/// an empty placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBadge {
    /// Link target for the badge.
    pub href: String,
    /// Avatar storage path, absent while the user is unresolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AvatarPath>,
    /// Image alt text (`"{first} {last}"`), absent alongside the avatar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Navigation view rendered by the page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView {
    /// Home link behind the logo.
    pub home_href: String,
    /// Create-post action, present only when the flag is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_post_href: Option<String>,
    /// Likes link.
    pub likes_href: String,
    /// Profile badge.
    pub profile: ProfileBadge,
}

impl HeaderView {
    /// Build the header view.
    ///
    /// The add-post affordance depends only on `show_add_post`, never on
    /// whether the user has loaded.
    ///
    /// # Examples
    /// ```
    /// use photofeed::domain::HeaderView;
    ///
    /// let view = HeaderView::build(true, None);
    /// assert_eq!(view.add_post_href.as_deref(), Some("/post"));
    /// assert!(view.profile.avatar.is_none());
    /// ```
    #[must_use]
    pub fn build(show_add_post: bool, user: Option<&CurrentUser>) -> Self {
        Self {
            home_href: routes::HOME.to_owned(),
            add_post_href: show_add_post.then(|| routes::ADD_POST.to_owned()),
            likes_href: routes::LIKES.to_owned(),
            profile: user.map_or_else(ProfileBadge::placeholder, ProfileBadge::for_user),
        }
    }
}

impl ProfileBadge {
    fn for_user(user: &CurrentUser) -> Self {
        Self {
            href: routes::profile(&user.username),
            avatar: Some(user.profile_picture.clone()),
            alt: Some(user.full_name()),
        }
    }

    fn placeholder() -> Self {
        Self {
            href: routes::LOGIN.to_owned(),
            avatar: None,
            alt: None,
        }
    }
}
