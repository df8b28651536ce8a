//! Core data model types shared across the synchronizer, UI and event layers.

use serde::{Deserialize, Deserializer, Serialize};

/// What: Deserialize a JSON `null` as the type's default value.
///
/// Inputs:
/// - `d`: Serde deserializer positioned at a possibly-null field.
///
/// Output: The decoded value, or `T::default()` for `null`.
///
/// Details: GraphQL payloads carry `null` for absent display fields rather
/// than omitting the key, so `#[serde(default)]` alone is not enough.
fn null_to_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Moderation status of a news item.
///
/// Soft delete is a status flag: rows are never removed from the feed, only
/// flipped between these two states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    /// Visible in the public feed.
    Active,
    /// Soft-deleted; restorable at any time.
    Inactive,
}

impl NewsStatus {
    /// The opposite status, used by the delete/restore toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    /// Wire/display spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// A single curated feed entry with editorial metadata and moderation status.
///
/// Remote-authoritative: `id` is assigned by the service and never invented
/// or renumbered locally. `title` and `description` are the only fields this
/// client edits; `status` is mutated only via the toggle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewsItem {
    /// Unique, immutable identifier assigned by the remote service.
    pub id: i64,
    /// Headline, editable through the edit modal.
    pub title: String,
    /// HTML description body, editable through the edit modal. Rendered only
    /// through the sanitizing pipeline in [`crate::richtext`].
    pub description: String,
    /// Moderation status (soft delete flag).
    pub status: NewsStatus,
    /// Ordering hint, read-only from this client's perspective.
    #[serde(default, deserialize_with = "null_to_default")]
    pub priority: i64,
    /// Language tag used as the filter key (e.g. "en", "hi").
    pub language: String,
    /// Upstream "read more" URL.
    #[serde(default, deserialize_with = "null_to_default")]
    pub url: String,
    /// Source image/asset URL.
    #[serde(rename = "sourceURL", default, deserialize_with = "null_to_default")]
    pub source_url: String,
    /// Source URL format marker as stored by the service.
    #[serde(
        rename = "sourceURLFormate",
        default,
        deserialize_with = "null_to_default"
    )]
    pub source_url_formate: String,
    /// Credited author.
    #[serde(default, deserialize_with = "null_to_default")]
    pub author: String,
    /// Publication timestamp as supplied by the service.
    #[serde(rename = "publishedAt", default, deserialize_with = "null_to_default")]
    pub published_at: String,
    /// Teaser text for the upstream link; empty when the feed should not
    /// offer one.
    #[serde(
        rename = "readMoreContent",
        default,
        deserialize_with = "null_to_default"
    )]
    pub read_more_content: String,
}

/// Read-only projection rendered by the article detail route.
///
/// Not part of the list collection; fetched independently and discarded when
/// the view is left.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArticleDetail {
    /// Unique identifier assigned by the remote service.
    pub id: i64,
    /// Headline.
    pub title: String,
    /// HTML description body, rendered through the sanitizing pipeline.
    pub description: String,
    /// Hero image URL.
    #[serde(rename = "imageURL", default, deserialize_with = "null_to_default")]
    pub image_url: String,
    /// Creation timestamp as supplied by the service.
    #[serde(rename = "createdAt", default, deserialize_with = "null_to_default")]
    pub created_at: String,
}

/// The active language-scoping criterion for the list view.
///
/// Not persisted across sessions; drives which query variant the
/// synchronizer issues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageFilter {
    /// No language scoping; the synchronizer issues the fetch-all variant.
    All,
    /// Scope to a single language code.
    Language(String),
}

impl LanguageFilter {
    /// What: Build a filter from a config/CLI language code.
    ///
    /// Inputs:
    /// - `code`: Raw code; `"all"` (any case) or blank selects no filter.
    ///
    /// Output: The corresponding filter with the code lowercased.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        if code.is_empty() || code == "all" {
            Self::All
        } else {
            Self::Language(code)
        }
    }

    /// The next filter in the UI cycle: all → en → hi → all.
    ///
    /// A filter outside the cycle (from config) steps back to `All`.
    pub fn cycled(&self) -> Self {
        match self {
            Self::All => Self::Language("en".to_string()),
            Self::Language(code) if code == "en" => Self::Language("hi".to_string()),
            Self::Language(_) => Self::All,
        }
    }

    /// Human-readable label for the filter header.
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Language(code) if code == "en" => "English",
            Self::Language(code) if code == "hi" => "Hindi",
            Self::Language(code) => code,
        }
    }
}

/// Current navigation context.
///
/// Route arguments are raw strings: parsing happens in the detail resolver so
/// malformed values degenerate to not-found instead of faulting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// The curation list.
    List,
    /// Single news item view (`newsById`).
    NewsDetail {
        /// Raw identifier from the navigation context.
        raw_id: String,
    },
    /// Single article view (`article`).
    ArticleDetail {
        /// Raw identifier from the navigation context.
        raw_id: String,
    },
}
