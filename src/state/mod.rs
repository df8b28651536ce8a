//! Application state types: data model, modal workflow and the central
//! [`AppState`] container mutated by the event and UI layers.

pub mod app_state;
pub mod modal;
pub mod types;

pub use app_state::AppState;
pub use modal::{EditDraft, EditField, Modal};
pub use types::{ArticleDetail, LanguageFilter, NewsItem, NewsStatus, Route};
