use crate::macros::setter;
use crate::request::{ApiRequest, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

/// A Twitch user as returned by `GET /users`.
///
/// `email` is only present when the token carries the `user:read:email` scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub login: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub profile_image_url: String,
    #[serde(default)]
    pub broadcaster_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct GetUsers {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    login: Option<String>,
}

impl GetUsers {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt id: String);
    setter!(opt login: String);

    fn is_unfiltered(&self) -> bool {
        self.id.is_none() && self.login.is_none()
    }
}

impl ApiRequest for GetUsers {
    type Data = Self;
    type Response = UsersResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users".into()
    }

    fn data(&self) -> RequestData<&Self> {
        if self.is_unfiltered() {
            RequestData::Empty
        } else {
            RequestData::Query(self)
        }
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub data: Vec<User>,
}

impl UsersResponse {
    /// The first user in the list.
    ///
    /// Helix answers a token-scoped lookup with a one-element list.
    pub fn into_first(self) -> Option<User> {
        self.data.into_iter().next()
    }
}
