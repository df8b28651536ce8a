//! Typed builder for the remote service's query and mutation documents.
//!
//! One [`Operation`] variant per remote operation. The documents themselves
//! are immutable; variables are carried as typed data and serialized to the
//! wire shape only at the gateway boundary. Building an operation has no
//! error conditions: a malformed intent is a programming error, not a
//! runtime fault.

use serde::Serialize;
use serde_json::{Value, json};

use crate::state::NewsStatus;

/// Field selection shared by every news-returning operation.
const NEWS_FIELDS: &str = "\
      id
      url
      title
      author
      status
      priority
      language
      sourceURL
      description
      publishedAt
      readMoreContent
      sourceURLFormate";

/// Patch payload for the `updateNews` mutation.
///
/// Only the populated fields travel on the wire, so a status toggle never
/// resends title/description and an edit commit never touches status.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct UpdateNewsInput {
    /// Replacement headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement description body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement moderation status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NewsStatus>,
}

impl UpdateNewsInput {
    /// Patch that flips only the status flag.
    pub fn status_only(status: NewsStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that replaces only the editable content fields.
    pub fn content(title: String, description: String) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            ..Self::default()
        }
    }
}

/// A single remote operation with its typed parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Fetch the full feed.
    AllNews,
    /// Fetch the feed scoped to one language.
    NewsByLanguage {
        /// Language code, e.g. "en".
        language: String,
    },
    /// Fetch one news item by id.
    NewsById {
        /// Remote identifier.
        id: i64,
    },
    /// Fetch one article projection by id.
    Article {
        /// Remote identifier.
        id: i64,
    },
    /// Patch one news item.
    UpdateNews {
        /// Remote identifier of the target row.
        id: i64,
        /// Fields to replace.
        input: UpdateNewsInput,
    },
}

impl Operation {
    /// The immutable GraphQL document for this operation.
    pub fn document(&self) -> String {
        match self {
            Self::AllNews => format!(
                "query GetAllNews {{\n  allNews {{\n{NEWS_FIELDS}\n  }}\n}}"
            ),
            Self::NewsByLanguage { .. } => format!(
                "query GetNewsByLanguage($language: String!) {{\n  newsByLanguage(language: $language) {{\n{NEWS_FIELDS}\n  }}\n}}"
            ),
            Self::NewsById { .. } => format!(
                "query GetNewsById($id: Int!) {{\n  newsById(id: $id) {{\n{NEWS_FIELDS}\n  }}\n}}"
            ),
            Self::Article { .. } => "query GetArticleById($id: Int!) {\n  article(id: $id) {\n      id\n      title\n      description\n      imageURL\n      createdAt\n  }\n}".to_string(),
            Self::UpdateNews { .. } => format!(
                "mutation UpdateNews($id: Int!, $updateNewsInput: UpdateNewsInput!) {{\n  updateNews(id: $id, updateNewsInput: $updateNewsInput) {{\n{NEWS_FIELDS}\n  }}\n}}"
            ),
        }
    }

    /// The variables mapping for this operation.
    pub fn variables(&self) -> Value {
        match self {
            Self::AllNews => json!({}),
            Self::NewsByLanguage { language } => json!({ "language": language }),
            Self::NewsById { id } | Self::Article { id } => json!({ "id": id }),
            Self::UpdateNews { id, input } => json!({
                "id": id,
                "updateNewsInput": input,
            }),
        }
    }

    /// The payload key this operation's result lives under in the `data`
    /// envelope.
    pub fn root_field(&self) -> &'static str {
        match self {
            Self::AllNews => "allNews",
            Self::NewsByLanguage { .. } => "newsByLanguage",
            Self::NewsById { .. } => "newsById",
            Self::Article { .. } => "article",
            Self::UpdateNews { .. } => "updateNews",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Operation, UpdateNewsInput};
    use crate::state::NewsStatus;

    /// What: Each operation names the matching remote field and document.
    ///
    /// Inputs: One operation per variant.
    /// Output: Documents mention their root field and operation name;
    /// `root_field` matches the schema.
    #[test]
    fn documents_and_root_fields_line_up() {
        let ops = [
            (Operation::AllNews, "allNews", "GetAllNews"),
            (
                Operation::NewsByLanguage {
                    language: "en".to_string(),
                },
                "newsByLanguage",
                "GetNewsByLanguage",
            ),
            (Operation::NewsById { id: 3 }, "newsById", "GetNewsById"),
            (Operation::Article { id: 3 }, "article", "GetArticleById"),
            (
                Operation::UpdateNews {
                    id: 3,
                    input: UpdateNewsInput::status_only(NewsStatus::Inactive),
                },
                "updateNews",
                "UpdateNews",
            ),
        ];
        for (op, root, name) in ops {
            assert_eq!(op.root_field(), root);
            let doc = op.document();
            assert!(doc.contains(root), "document should select {root}");
            assert!(doc.contains(name), "document should be named {name}");
        }
    }

    /// What: Variables carry exactly the typed parameters.
    ///
    /// Inputs: The by-language and by-id variants.
    /// Output: JSON maps with the schema's variable names.
    #[test]
    fn variables_match_wire_names() {
        let op = Operation::NewsByLanguage {
            language: "hi".to_string(),
        };
        assert_eq!(op.variables(), serde_json::json!({ "language": "hi" }));
        let op = Operation::NewsById { id: 42 };
        assert_eq!(op.variables(), serde_json::json!({ "id": 42 }));
        assert_eq!(Operation::AllNews.variables(), serde_json::json!({}));
    }

    /// What: Update inputs serialize sparsely.
    ///
    /// Inputs: A status-only patch and a content patch.
    /// Output: Only the populated keys appear; status uses its lowercase wire
    /// spelling.
    #[test]
    fn update_input_serializes_only_populated_fields() {
        let op = Operation::UpdateNews {
            id: 7,
            input: UpdateNewsInput::status_only(NewsStatus::Inactive),
        };
        let vars = op.variables();
        assert_eq!(
            vars,
            serde_json::json!({ "id": 7, "updateNewsInput": { "status": "inactive" } })
        );
        let op = Operation::UpdateNews {
            id: 7,
            input: UpdateNewsInput::content("X".to_string(), "<p>Y</p>".to_string()),
        };
        assert_eq!(
            op.variables(),
            serde_json::json!({
                "id": 7,
                "updateNewsInput": { "title": "X", "description": "<p>Y</p>" }
            })
        );
    }
}
