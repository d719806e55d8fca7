//! Records served by the pictures collection endpoint
//!
//! The paginator itself treats items as opaque; these types are what the
//! gallery actually renders.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

// ============================================================================
// Superposable
// ============================================================================

/// Overlay stamped onto a picture at upload time
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Superposable {
    Chic,
    Cry,
    Honk,
    Rage,
    Sad,
    Smirk,
    Stoned,
    Sweat,
}

// ============================================================================
// Picture
// ============================================================================

/// A picture post as returned by `GET /pictures`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub picture_id: Uuid,
    pub account_id: Uuid,
    pub superposable: Superposable,
    /// Creation time in unix seconds
    pub creation_ts: i64,
    pub author: String,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub dislike_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    /// Whether the current viewer liked it; absent when not signed in
    #[serde(default)]
    pub liked: Option<bool>,
    #[serde(default)]
    pub disliked: Option<bool>,
}

impl Picture {
    /// Creation time, `None` if the timestamp is out of range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.creation_ts, 0).single()
    }

    /// Path of the rendered JPEG relative to the image host
    pub fn image_path(&self) -> String {
        format!("pictures/{}.jpg", self.picture_id)
    }

    /// Title line shown above the picture
    pub fn title(&self) -> String {
        match self.created_at() {
            Some(ts) => format!("@{} at {}", self.author, ts.format("%Y-%m-%d %H:%M:%S")),
            None => format!("@{}", self.author),
        }
    }
}
