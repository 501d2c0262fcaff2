//! Paginated pokemon list service.
//!
//! Wraps an [`AsyncStore`] of the current page and drives it through
//! the upstream list endpoint. Page navigation follows the `next` /
//! `previous` URLs the API hands back; the only URL parsing done here
//! is extracting the `offset` query parameter for page math.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::client::{ApiClient, ClientError};
use crate::store::{AsyncStore, Store, StoreId, Subscription};
use crate::value::Async;

/// Rows requested per page, matching the upstream default.
pub const PAGE_LIMIT: u32 = 20;

/// Errors produced while building a page from the API response.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("malformed list payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Wire shape of the upstream list endpoint.
#[derive(Debug, Deserialize)]
struct ListResponse {
    count: u32,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    name: String,
    url: String,
}

/// One row of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
}

/// Pagination facts derived from the API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paging {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// The store payload: one page of rows plus its paging facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonPage {
    pub rows: Vec<PokemonSummary>,
    pub paging: Paging,
}

/// List service over one [`AsyncStore`] of the current page.
#[derive(Clone)]
pub struct PokemonService {
    client: Arc<dyn ApiClient>,
    store: AsyncStore<PokemonPage>,
    base_url: String,
}

impl PokemonService {
    pub fn new(client: Arc<dyn ApiClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            store: AsyncStore::new(),
            base_url: base_url.into(),
        }
    }

    /// Load the first page.
    pub fn load_initial(&self) {
        self.load_page(format!(
            "{}/pokemon?limit={PAGE_LIMIT}&offset=0",
            self.base_url
        ));
    }

    /// Follow the current page's `next` link, if any. Silent no-op when
    /// the store holds no page or the last page is shown.
    pub fn next(&self) {
        if let Some(url) = self.page_link(|paging| paging.next.clone()) {
            self.load_page(url);
        }
    }

    /// Follow the current page's `previous` link, if any.
    pub fn prev(&self) {
        if let Some(url) = self.page_link(|paging| paging.previous.clone()) {
            self.load_page(url);
        }
    }

    fn page_link(&self, pick: impl FnOnce(&Paging) -> Option<String>) -> Option<String> {
        let link = self
            .store
            .snapshot()
            .get_maybe()
            .and_then(|page| pick(&page.paging));
        if link.is_none() {
            debug!(store = %self.store.id(), "page navigation ignored: no link");
        }
        link
    }

    fn load_page(&self, url: String) {
        let client = Arc::clone(&self.client);
        self.store.run(move || async move {
            let payload = client.get(&url).await.map_err(ServiceError::from)?;
            let response: ListResponse =
                serde_json::from_value(payload).map_err(ServiceError::from)?;
            Ok(build_page(&url, response))
        });
    }
}

impl Store<Async<PokemonPage>> for PokemonService {
    fn id(&self) -> StoreId {
        self.store.id()
    }

    fn snapshot(&self) -> Async<PokemonPage> {
        self.store.snapshot()
    }

    fn subscribe(
        &self,
        callback: impl Fn(&Async<PokemonPage>) + Send + Sync + 'static,
    ) -> Subscription<Async<PokemonPage>> {
        self.store.subscribe(callback)
    }
}

fn build_page(url: &str, response: ListResponse) -> PokemonPage {
    let offset = offset_from_url(url);
    let total_pages = response.count.div_ceil(PAGE_LIMIT);
    let current_page = offset / PAGE_LIMIT + 1;

    PokemonPage {
        rows: response
            .results
            .into_iter()
            .map(|entry| PokemonSummary {
                name: entry.name,
                url: entry.url,
            })
            .collect(),
        paging: Paging {
            current_page,
            total_pages,
            has_next: response.next.is_some(),
            has_prev: response.previous.is_some(),
            next: response.next,
            previous: response.previous,
        },
    }
}

/// Extract the `offset` query parameter from a page URL.
/// Absent or unparsable offsets count as 0.
fn offset_from_url(url: &str) -> u32 {
    let Some((_, query)) = url.split_once('?') else {
        return 0;
    };
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("offset="))
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}
