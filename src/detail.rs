//! Detail resolver: single-item fetches for the news and article routes.
//!
//! Independent of the list collection. Each visit drives
//! `loading → found | not-found`; a malformed route id, a gateway failure and
//! a server-null payload all collapse into the same not-found presentation.
//! Request generations guarantee that a reply for a departed route is never
//! applied to the current view.

use tracing::{debug, warn};

use crate::gql::{GatewayError, Operation};
use crate::state::{ArticleDetail, NewsItem};

/// Which detail projection a fetch targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailKind {
    /// `newsById` — the full news item.
    News,
    /// `article` — the read-only article projection.
    Article,
}

/// What the detail view currently shows.
#[derive(Clone, Debug)]
pub enum DetailContent {
    /// A fetch is in flight.
    Loading,
    /// A news item was found.
    News(NewsItem),
    /// An article was found.
    Article(ArticleDetail),
    /// Terminal state for absent, malformed or missing records. Not an
    /// error: the view renders an explicit affordance back to the list.
    NotFound,
}

/// A detail fetch issued by the resolver, executed by a background worker.
#[derive(Clone, Debug)]
pub struct DetailTicket {
    /// Request generation; the reply must echo it to be applied.
    pub id: u64,
    /// Which projection to decode.
    pub kind: DetailKind,
    /// The by-id query to send.
    pub op: Operation,
}

/// Decoded payload of a detail fetch.
#[derive(Clone, Debug)]
pub enum DetailPayload {
    /// `newsById` result; `None` when the server returned null.
    News(Option<NewsItem>),
    /// `article` result; `None` when the server returned null.
    Article(Option<ArticleDetail>),
}

/// Reply to a [`DetailTicket`].
#[derive(Debug)]
pub struct DetailReply {
    /// Echoed request generation.
    pub id: u64,
    /// Decoded payload or the gateway failure.
    pub result: Result<DetailPayload, GatewayError>,
}

/// What: Parse a route identifier.
///
/// Inputs:
/// - `raw`: Identifier string from the navigation context.
///
/// Output: `Some(id)` for a well-formed positive integer; `None` for
/// missing, non-numeric or non-positive input.
///
/// Details: The remote service assigns positive integer ids, so zero and
/// negatives are treated as malformed rather than forwarded.
pub fn parse_item_id(raw: &str) -> Option<i64> {
    let id = raw.trim().parse::<i64>().ok()?;
    (id > 0).then_some(id)
}

/// Per-visit state machine for the two detail routes.
#[derive(Debug)]
pub struct DetailResolver {
    content: DetailContent,
    /// Generation of the latest issued request; only its reply applies.
    latest_request: u64,
    /// Next generation to allocate.
    next_request: u64,
}

impl Default for DetailResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailResolver {
    /// A resolver with no visit in progress.
    pub fn new() -> Self {
        Self {
            content: DetailContent::NotFound,
            latest_request: 0,
            next_request: 1,
        }
    }

    /// What the view should render right now.
    pub fn content(&self) -> &DetailContent {
        &self.content
    }

    /// What: Start resolving a detail route.
    ///
    /// Inputs:
    /// - `kind`: News or article projection.
    /// - `raw_id`: Raw identifier from the route.
    ///
    /// Output: `Some(ticket)` and the `Loading` presentation for a
    /// well-formed id; `None` with an immediate `NotFound` otherwise.
    ///
    /// Details: Re-invoked on every navigation, including between two detail
    /// routes — stale data is never reused across identifier changes.
    pub fn begin(&mut self, kind: DetailKind, raw_id: &str) -> Option<DetailTicket> {
        let Some(item_id) = parse_item_id(raw_id) else {
            debug!(raw_id, "malformed detail identifier; presenting not-found");
            self.content = DetailContent::NotFound;
            // Invalidate any in-flight request for the previous visit.
            self.latest_request = 0;
            return None;
        };
        let id = self.next_request;
        self.next_request += 1;
        self.latest_request = id;
        self.content = DetailContent::Loading;
        let op = match kind {
            DetailKind::News => Operation::NewsById { id: item_id },
            DetailKind::Article => Operation::Article { id: item_id },
        };
        Some(DetailTicket { id, kind, op })
    }

    /// What: Abandon the current visit (navigation back to the list).
    ///
    /// Inputs: none.
    ///
    /// Output: Any in-flight reply becomes stale and will be dropped.
    pub fn leave(&mut self) {
        self.latest_request = 0;
        self.content = DetailContent::NotFound;
    }

    /// What: Apply or discard a fetch reply.
    ///
    /// Inputs:
    /// - `reply`: The worker's reply.
    ///
    /// Output: `true` when the reply belonged to the current visit and was
    /// applied; `false` when it was stale.
    ///
    /// Details: Failures and server-null payloads both land in `NotFound` —
    /// the route's single degraded presentation, recoverable by re-visiting.
    pub fn apply(&mut self, reply: DetailReply) -> bool {
        if reply.id != self.latest_request || self.latest_request == 0 {
            debug!(
                generation = reply.id,
                latest = self.latest_request,
                "dropping stale detail reply"
            );
            return false;
        }
        self.content = match reply.result {
            Ok(DetailPayload::News(Some(item))) => DetailContent::News(item),
            Ok(DetailPayload::Article(Some(article))) => DetailContent::Article(article),
            Ok(DetailPayload::News(None) | DetailPayload::Article(None)) => {
                DetailContent::NotFound
            }
            Err(e) => {
                warn!(error = %e, "detail fetch failed; presenting not-found");
                DetailContent::NotFound
            }
        };
        true
    }
}
