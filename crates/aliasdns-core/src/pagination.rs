// # Pagination
//
// Collaborator listings (tagged resources, load balancers) are token-paginated.
// `Pages` is a lazy cursor over such a listing: pages are only fetched when the
// consumer asks for them, so a search that matches on page 2 never requests
// page 3. Errors are returned from `next_page`/`find_map` directly instead of
// being smuggled out of a callback.
//
// A cursor is single-use. Restarting a search means building a new `Pages`
// from the same fetch function, which begins again at the first page.

use std::future::Future;
use std::pin::Pin;

use crate::error::ServiceError;

/// One page of a collaborator listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page (may be empty even when later pages are not)
    pub items: Vec<T>,
    /// Token for the next page; `None` or empty on the last page
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A final page
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// A page followed by another one
    pub fn with_next(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }
}

/// Boxed future returned by a page fetch
pub type PageFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<Page<T>, ServiceError>> + Send + 'a>>;

type FetchFn<'a, T> = Box<dyn FnMut(Option<String>) -> PageFuture<'a, T> + Send + 'a>;

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Lazy cursor over a token-paginated listing
pub struct Pages<'a, T> {
    fetch: FetchFn<'a, T>,
    cursor: Cursor,
    fetched: usize,
}

impl<'a, T> Pages<'a, T> {
    /// Create a cursor from a function fetching the page for a given token
    ///
    /// The first call receives `None`.
    pub fn new<F>(fetch: F) -> Self
    where
        F: FnMut(Option<String>) -> PageFuture<'a, T> + Send + 'a,
    {
        Self {
            fetch: Box::new(fetch),
            cursor: Cursor::Start,
            fetched: 0,
        }
    }

    /// Number of pages requested so far
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }

    /// Fetch the next page
    ///
    /// Returns `None` once the listing is exhausted. After an error the cursor
    /// is exhausted as well.
    pub async fn next_page(&mut self) -> Option<Result<Vec<T>, ServiceError>> {
        let token = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::Done => return None,
        };

        self.fetched += 1;
        match (self.fetch)(token).await {
            Ok(page) => {
                if let Some(next) = page.next_token.filter(|t| !t.is_empty()) {
                    self.cursor = Cursor::Next(next);
                }
                Some(Ok(page.items))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Walk pages until `f` returns `Some`, without fetching further pages
    ///
    /// Returns `Ok(None)` if the listing is exhausted without a match.
    pub async fn find_map<R, F>(&mut self, mut f: F) -> Result<Option<R>, ServiceError>
    where
        F: FnMut(T) -> Option<R>,
    {
        while let Some(page) = self.next_page().await {
            if let Some(found) = page?.into_iter().find_map(&mut f) {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}
