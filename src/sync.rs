//! List synchronizer: the owner of the in-memory news collection.
//!
//! All fetches and patches to the collection go through this state machine.
//! It decides which query variant the active filter requires, issues fetch
//! tickets with monotonically increasing generation ids, and commits only the
//! most recently initiated fetch's result (last-request-wins) — a reply for a
//! superseded filter is dropped, never merged. Mutations patch single rows in
//! place after server acknowledgment; the collection is never re-fetched for
//! a mutation and rows are never removed (soft delete is a status flag).

use tracing::{debug, warn};

use crate::gql::{GatewayError, Operation, UpdateNewsInput};
use crate::state::{LanguageFilter, NewsItem, NewsStatus};

/// Loading state of the list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListLoad {
    /// Nothing fetched yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The collection holds at least one row.
    Ready,
    /// The last committed fetch returned zero rows.
    Empty,
}

/// A fetch issued by the synchronizer, to be executed by a background worker.
#[derive(Clone, Debug)]
pub struct FetchTicket {
    /// Generation id; the reply must echo it to be committed.
    pub id: u64,
    /// The query variant matching the filter at issue time.
    pub op: Operation,
}

/// Reply to a [`FetchTicket`].
#[derive(Debug)]
pub struct FetchReply {
    /// Echoed generation id from the originating ticket.
    pub id: u64,
    /// Decoded collection or the gateway failure.
    pub result: Result<Vec<NewsItem>, GatewayError>,
}

/// An id-targeted mutation requested through the synchronizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Flip the soft-delete flag of one row.
    ToggleStatus {
        /// Target row id.
        id: i64,
        /// Status the row moves to.
        to: NewsStatus,
    },
    /// Replace the editable content of one row (edit-modal commit).
    EditContent {
        /// Target row id.
        id: i64,
        /// Replacement headline.
        title: String,
        /// Replacement description body.
        description: String,
    },
}

impl Mutation {
    /// The update operation this mutation sends on the wire.
    pub fn operation(&self) -> Operation {
        match self {
            Self::ToggleStatus { id, to } => Operation::UpdateNews {
                id: *id,
                input: UpdateNewsInput::status_only(*to),
            },
            Self::EditContent {
                id,
                title,
                description,
            } => Operation::UpdateNews {
                id: *id,
                input: UpdateNewsInput::content(title.clone(), description.clone()),
            },
        }
    }

    /// Id of the row this mutation targets.
    pub fn target_id(&self) -> i64 {
        match self {
            Self::ToggleStatus { id, .. } | Self::EditContent { id, .. } => *id,
        }
    }
}

/// Reply to a [`Mutation`] request.
#[derive(Debug)]
pub struct MutationReply {
    /// The originating mutation, echoed so the patch can be applied.
    pub mutation: Mutation,
    /// Server acknowledgment or the gateway failure.
    pub result: Result<(), GatewayError>,
}

/// The collection owner and fetch coordinator for the list view.
#[derive(Debug)]
pub struct ListSync {
    items: Vec<NewsItem>,
    filter: LanguageFilter,
    load: ListLoad,
    /// Generation of the latest issued fetch; only its reply may commit.
    latest_fetch_id: u64,
    /// Next generation to allocate.
    next_fetch_id: u64,
}

impl ListSync {
    /// Create an empty synchronizer with the given startup filter.
    pub fn new(filter: LanguageFilter) -> Self {
        Self {
            items: Vec::new(),
            filter,
            load: ListLoad::Idle,
            latest_fetch_id: 0,
            next_fetch_id: 1,
        }
    }

    /// The collection, read-only. Mutations go through the patch methods.
    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    /// Row lookup by remote id.
    pub fn item(&self, id: i64) -> Option<&NewsItem> {
        self.items.iter().find(|n| n.id == id)
    }

    /// The active filter.
    pub fn filter(&self) -> &LanguageFilter {
        &self.filter
    }

    /// Current loading state.
    pub fn load(&self) -> ListLoad {
        self.load
    }

    /// The query variant the current filter requires.
    fn fetch_operation(&self) -> Operation {
        match &self.filter {
            LanguageFilter::All => Operation::AllNews,
            LanguageFilter::Language(code) => Operation::NewsByLanguage {
                language: code.clone(),
            },
        }
    }

    /// What: Start a fetch for the current filter.
    ///
    /// Inputs: none.
    ///
    /// Output: A ticket carrying a fresh generation id and the matching query
    /// variant. The synchronizer enters `Loading`; any earlier in-flight
    /// fetch is superseded from this moment.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let id = self.next_fetch_id;
        self.next_fetch_id += 1;
        self.latest_fetch_id = id;
        self.load = ListLoad::Loading;
        debug!(generation = id, filter = self.filter.label(), "list fetch started");
        FetchTicket {
            id,
            op: self.fetch_operation(),
        }
    }

    /// What: Change the active filter.
    ///
    /// Inputs:
    /// - `filter`: The new scoping criterion.
    ///
    /// Output: `Some(ticket)` when the filter actually changed (the list
    /// re-enters `Loading` immediately); `None` for a no-op change.
    pub fn set_filter(&mut self, filter: LanguageFilter) -> Option<FetchTicket> {
        if filter == self.filter {
            return None;
        }
        self.filter = filter;
        Some(self.begin_fetch())
    }

    /// What: Commit or discard a fetch reply.
    ///
    /// Inputs:
    /// - `id`: Generation echoed by the worker.
    /// - `result`: Decoded collection or gateway failure.
    ///
    /// Output: `true` when the reply was for the latest generation and was
    /// applied (successfully or as a logged, stale-retaining failure);
    /// `false` when it was superseded and dropped.
    ///
    /// Details: On failure the previous collection stays visible — the list
    /// never blocks on an error state; the operator can re-trigger the fetch.
    pub fn apply_fetch(&mut self, id: u64, result: Result<Vec<NewsItem>, GatewayError>) -> bool {
        if id != self.latest_fetch_id {
            debug!(
                generation = id,
                latest = self.latest_fetch_id,
                "dropping superseded fetch reply"
            );
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.load = if self.items.is_empty() {
                    ListLoad::Empty
                } else {
                    ListLoad::Ready
                };
            }
            Err(e) => {
                warn!(error = %e, filter = self.filter.label(), "list fetch failed; keeping previous collection");
                self.load = if self.items.is_empty() {
                    ListLoad::Empty
                } else {
                    ListLoad::Ready
                };
            }
        }
        true
    }

    /// What: Build the toggle mutation for a row.
    ///
    /// Inputs:
    /// - `id`: Target row.
    ///
    /// Output: `Some(Mutation::ToggleStatus)` flipping the row's current
    /// status; `None` when the id is not in the collection (mutations only
    /// ever target existing ids).
    pub fn toggle_target(&self, id: i64) -> Option<Mutation> {
        let item = self.item(id)?;
        Some(Mutation::ToggleStatus {
            id,
            to: item.status.toggled(),
        })
    }

    /// What: Patch the collection after a server-acknowledged mutation.
    ///
    /// Inputs:
    /// - `mutation`: The acknowledged mutation.
    ///
    /// Output: `true` when a row was patched.
    ///
    /// Details: This is the optimistic-patch point — the local mutation is
    /// applied only after acknowledgment, never speculatively, so displayed
    /// state stays consistent with the authoritative source.
    pub fn apply_mutation(&mut self, mutation: &Mutation) -> bool {
        match mutation {
            Mutation::ToggleStatus { id, to } => self.patch_status(*id, *to),
            Mutation::EditContent {
                id,
                title,
                description,
            } => self.patch_edit(*id, title, description),
        }
    }

    /// Patch a single row's status in place.
    fn patch_status(&mut self, id: i64, status: NewsStatus) -> bool {
        if let Some(item) = self.items.iter_mut().find(|n| n.id == id) {
            item.status = status;
            return true;
        }
        warn!(id, "status patch targeted an id absent from the collection");
        false
    }

    /// Patch a single row's editable content in place.
    fn patch_edit(&mut self, id: i64, title: &str, description: &str) -> bool {
        if let Some(item) = self.items.iter_mut().find(|n| n.id == id) {
            item.title = title.to_string();
            item.description = description.to_string();
            return true;
        }
        warn!(id, "edit patch targeted an id absent from the collection");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{ListLoad, ListSync, Mutation};
    use crate::gql::{GatewayError, Operation};
    use crate::state::{LanguageFilter, NewsItem, NewsStatus};

    fn item(id: i64, language: &str, status: NewsStatus) -> NewsItem {
        NewsItem {
            id,
            title: format!("Item {id}"),
            description: format!("<p>Body {id}</p>"),
            status,
            priority: id,
            language: language.to_string(),
            url: String::new(),
            source_url: String::new(),
            source_url_formate: String::new(),
            author: String::new(),
            published_at: String::new(),
            read_more_content: String::new(),
        }
    }

    /// What: Each filter issues exactly its matching query variant.
    ///
    /// Inputs: The unfiltered state and a language filter.
    /// Output: `allNews` for `All`; `newsByLanguage` with the code otherwise.
    #[test]
    fn filter_selects_query_variant() {
        let mut sync = ListSync::new(LanguageFilter::All);
        let ticket = sync.begin_fetch();
        assert_eq!(ticket.op, Operation::AllNews);
        let ticket = sync
            .set_filter(LanguageFilter::Language("hi".to_string()))
            .expect("changed filter must re-fetch");
        assert_eq!(
            ticket.op,
            Operation::NewsByLanguage {
                language: "hi".to_string()
            }
        );
        assert_eq!(sync.load(), ListLoad::Loading);
        // Setting the same filter again is a no-op.
        assert!(
            sync.set_filter(LanguageFilter::Language("hi".to_string()))
                .is_none()
        );
    }

    /// What: Last-request-wins — a superseded reply never clobbers a newer
    /// filter's result, regardless of arrival order.
    ///
    /// Inputs: Fetch A (filter all), then fetch B (filter en); B's reply
    /// lands first, A's reply lands late.
    /// Output: A's late reply is dropped; the collection reflects B.
    #[test]
    fn superseded_fetch_reply_is_dropped() {
        let mut sync = ListSync::new(LanguageFilter::All);
        let a = sync.begin_fetch();
        let b = sync
            .set_filter(LanguageFilter::Language("en".to_string()))
            .expect("filter change issues a fetch");
        assert!(sync.apply_fetch(b.id, Ok(vec![item(1, "en", NewsStatus::Active)])));
        assert!(!sync.apply_fetch(a.id, Ok(vec![item(9, "hi", NewsStatus::Active)])));
        assert_eq!(sync.items().len(), 1);
        assert_eq!(sync.items()[0].id, 1);
        assert_eq!(sync.load(), ListLoad::Ready);
    }

    /// What: A failed fetch keeps the previous collection visible.
    ///
    /// Inputs: A committed two-row fetch, then a failing refresh.
    /// Output: Rows unchanged, state `Ready`, reply still counted as applied.
    #[test]
    fn failed_fetch_retains_stale_collection() {
        let mut sync = ListSync::new(LanguageFilter::All);
        let t = sync.begin_fetch();
        assert!(sync.apply_fetch(
            t.id,
            Ok(vec![
                item(1, "en", NewsStatus::Active),
                item(2, "hi", NewsStatus::Active)
            ])
        ));
        let retry = sync.begin_fetch();
        assert!(sync.apply_fetch(
            retry.id,
            Err(GatewayError::Transport("HTTP 503".to_string()))
        ));
        assert_eq!(sync.items().len(), 2);
        assert_eq!(sync.load(), ListLoad::Ready);
    }

    /// What: A failed first fetch lands in `Empty`, not a blocking error.
    ///
    /// Inputs: A fresh synchronizer whose only fetch fails.
    /// Output: Zero rows and the `Empty` presentation.
    #[test]
    fn failed_first_fetch_shows_empty() {
        let mut sync = ListSync::new(LanguageFilter::All);
        let t = sync.begin_fetch();
        assert!(sync.apply_fetch(
            t.id,
            Err(GatewayError::Transport("network error".to_string()))
        ));
        assert!(sync.items().is_empty());
        assert_eq!(sync.load(), ListLoad::Empty);
    }

    /// What: Toggling twice returns a row to its original status.
    ///
    /// Inputs: An active row, two toggle round trips.
    /// Output: Inactive after the first ack, active after the second; the
    /// sibling row never changes.
    #[test]
    fn toggle_round_trips_are_idempotent() {
        let mut sync = ListSync::new(LanguageFilter::All);
        let t = sync.begin_fetch();
        sync.apply_fetch(
            t.id,
            Ok(vec![
                item(1, "en", NewsStatus::Active),
                item(2, "en", NewsStatus::Active),
            ]),
        );
        let first = sync.toggle_target(1).expect("row 1 exists");
        assert_eq!(
            first,
            Mutation::ToggleStatus {
                id: 1,
                to: NewsStatus::Inactive
            }
        );
        assert!(sync.apply_mutation(&first));
        assert_eq!(sync.item(1).expect("row 1").status, NewsStatus::Inactive);
        assert_eq!(sync.item(2).expect("row 2").status, NewsStatus::Active);
        let second = sync.toggle_target(1).expect("row 1 exists");
        assert!(sync.apply_mutation(&second));
        assert_eq!(sync.item(1).expect("row 1").status, NewsStatus::Active);
    }

    /// What: An edit commit patches exactly the target row; nothing is
    /// patched without acknowledgment.
    ///
    /// Inputs: A committed collection and an `EditContent` ack for id 7.
    /// Output: Row 7 carries the new content; a mutation targeting a missing
    /// id patches nothing.
    #[test]
    fn edit_patch_targets_single_row() {
        let mut sync = ListSync::new(LanguageFilter::All);
        let t = sync.begin_fetch();
        sync.apply_fetch(
            t.id,
            Ok(vec![
                item(7, "en", NewsStatus::Active),
                item(8, "en", NewsStatus::Active),
            ]),
        );
        let mutation = Mutation::EditContent {
            id: 7,
            title: "X".to_string(),
            description: "<p>Y</p>".to_string(),
        };
        assert!(sync.apply_mutation(&mutation));
        let patched = sync.item(7).expect("row 7");
        assert_eq!(patched.title, "X");
        assert_eq!(patched.description, "<p>Y</p>");
        let untouched = sync.item(8).expect("row 8");
        assert_eq!(untouched.title, "Item 8");
        // Ids never present in the collection are never invented.
        let absent = Mutation::EditContent {
            id: 99,
            title: "Z".to_string(),
            description: String::new(),
        };
        assert!(!sync.apply_mutation(&absent));
        assert_eq!(sync.items().len(), 2);
    }

    /// What: Toggles can only target existing rows.
    ///
    /// Inputs: A collection without id 42.
    /// Output: No mutation is built.
    #[test]
    fn toggle_target_requires_existing_row() {
        let sync = ListSync::new(LanguageFilter::All);
        assert!(sync.toggle_target(42).is_none());
    }
}
