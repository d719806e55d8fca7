//! Filter context for the pictures collection
//!
//! A filter narrows the feed to one author, one superposable, a creation
//! date window or a free-text search. Replacing the filter of a running
//! paginator starts a new pagination epoch.

use crate::model::Superposable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters appended to every page request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterContext {
    /// Only pictures posted by this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Only pictures using this superposable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superposable: Option<Superposable>,

    /// Lower bound on creation time (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,

    /// Upper bound on creation time (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,

    /// Free-text search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterContext {
    /// An empty filter (the whole public feed)
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn superposable(mut self, superposable: Superposable) -> Self {
        self.superposable = Some(superposable);
        self
    }

    #[must_use]
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    #[must_use]
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// True when no parameter narrows the feed
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.superposable.is_none()
            && self.since.is_none()
            && self.until.is_none()
            && self.search.is_none()
    }

    /// Query pairs in a stable order. Blank strings are skipped.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(username) = non_blank(self.username.as_deref()) {
            params.push(("username".to_string(), username.to_string()));
        }
        if let Some(sp) = self.superposable {
            params.push(("superposable".to_string(), sp.to_string()));
        }
        // Timestamps go out as unix seconds, matching `creation_ts`
        if let Some(since) = self.since {
            params.push(("since".to_string(), since.timestamp().to_string()));
        }
        if let Some(until) = self.until {
            params.push(("until".to_string(), until.timestamp().to_string()));
        }
        if let Some(search) = non_blank(self.search.as_deref()) {
            params.push(("search".to_string(), search.to_string()));
        }

        params
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
