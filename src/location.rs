//! Page location backends.
//!
//! The binding only needs three things from the page: the current path, the
//! current search string, and a way to swap the URL without navigating.
//! `BrowserLocation` talks to `window.location` / `window.history` and is only
//! live with the `hydrate` feature. `MemoryLocation` keeps the same state in
//! memory for tests and non-browser hosts.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::QueryStateError;

/// Read/replace access to the page URL.
pub trait Location {
    /// Current path, e.g. `/page`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot read the URL.
    fn pathname(&self) -> Result<String, QueryStateError>;

    /// Current search string including the leading `?`, or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot read the URL.
    fn search(&self) -> Result<String, QueryStateError>;

    /// Replace the current history entry's URL, keeping its state payload.
    /// Must not reload the page or push a new entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the URL.
    fn replace_url(&self, url: &str) -> Result<(), QueryStateError>;
}

impl<L: Location + ?Sized> Location for &L {
    fn pathname(&self) -> Result<String, QueryStateError> {
        (**self).pathname()
    }

    fn search(&self) -> Result<String, QueryStateError> {
        (**self).search()
    }

    fn replace_url(&self, url: &str) -> Result<(), QueryStateError> {
        (**self).replace_url(url)
    }
}

// =============================================================================
// MEMORY
// =============================================================================

#[derive(Debug)]
struct MemoryPage {
    pathname: String,
    search: String,
    /// Opaque stand-in for `history.state`.
    state: Option<String>,
    history_len: usize,
    replacements: usize,
}

/// In-memory page URL with a single-entry-per-navigation history.
///
/// Clones share the same page, the way every binding on a real page shares
/// `window.location`.
#[derive(Clone, Debug)]
pub struct MemoryLocation {
    page: Rc<RefCell<MemoryPage>>,
}

impl MemoryLocation {
    /// Start at `url` (`path`, `path?query`, or `path?query#hash`; the hash is ignored).
    #[must_use]
    pub fn new(url: &str) -> Self {
        let (pathname, search) = split_url(url);
        Self {
            page: Rc::new(RefCell::new(MemoryPage {
                pathname,
                search,
                state: None,
                history_len: 1,
                replacements: 0,
            })),
        }
    }

    /// Navigate to `url`, pushing a new history entry with no state.
    pub fn navigate(&self, url: &str) {
        let (pathname, search) = split_url(url);
        let mut page = self.page.borrow_mut();
        page.pathname = pathname;
        page.search = search;
        page.state = None;
        page.history_len += 1;
    }

    /// Attach a state payload to the current history entry.
    pub fn set_state(&self, state: impl Into<String>) {
        self.page.borrow_mut().state = Some(state.into());
    }

    #[must_use]
    pub fn state(&self) -> Option<String> {
        self.page.borrow().state.clone()
    }

    /// Full URL as `path[?query]`.
    #[must_use]
    pub fn href(&self) -> String {
        let page = self.page.borrow();
        format!("{}{}", page.pathname, page.search)
    }

    /// Number of history entries pushed so far, including the first.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.page.borrow().history_len
    }

    /// Number of `replace_url` calls applied.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.page.borrow().replacements
    }
}

impl Location for MemoryLocation {
    fn pathname(&self) -> Result<String, QueryStateError> {
        Ok(self.page.borrow().pathname.clone())
    }

    fn search(&self) -> Result<String, QueryStateError> {
        Ok(self.page.borrow().search.clone())
    }

    fn replace_url(&self, url: &str) -> Result<(), QueryStateError> {
        let (pathname, search) = split_url(url);
        let mut page = self.page.borrow_mut();
        page.pathname = pathname;
        page.search = search;
        page.replacements += 1;
        Ok(())
    }
}

/// Split into `(pathname, search)` where `search` keeps its `?` and a bare
/// `?` collapses to empty, as `window.location.search` reports it.
fn split_url(url: &str) -> (String, String) {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    match url.split_once('?') {
        Some((path, query)) if !query.is_empty() => (path.to_owned(), format!("?{query}")),
        Some((path, _)) => (path.to_owned(), String::new()),
        None => (url.to_owned(), String::new()),
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// Handle to the page's `window`.
///
/// Only constructible in a browser (`hydrate` feature); everywhere else
/// [`BrowserLocation::current`] returns `None`.
#[derive(Clone, Debug)]
pub struct BrowserLocation {
    #[cfg(feature = "hydrate")]
    window: web_sys::Window,
    #[cfg(not(feature = "hydrate"))]
    _unconstructible: (),
}

impl BrowserLocation {
    /// The current window, or `None` when there is no browser context.
    #[must_use]
    pub fn current() -> Option<Self> {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window().map(|window| Self { window })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}

impl Location for BrowserLocation {
    fn pathname(&self) -> Result<String, QueryStateError> {
        #[cfg(feature = "hydrate")]
        {
            self.window.location().pathname().map_err(js_error)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(no_browser())
        }
    }

    fn search(&self) -> Result<String, QueryStateError> {
        #[cfg(feature = "hydrate")]
        {
            self.window.location().search().map_err(js_error)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(no_browser())
        }
    }

    fn replace_url(&self, url: &str) -> Result<(), QueryStateError> {
        #[cfg(feature = "hydrate")]
        {
            let history = self.window.history().map_err(js_error)?;
            let state = history.state().map_err(js_error)?;
            history
                .replace_state_with_url(&state, "", Some(url))
                .map_err(js_error)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(no_browser())
        }
    }
}

#[cfg(feature = "hydrate")]
fn js_error(err: wasm_bindgen::JsValue) -> QueryStateError {
    QueryStateError::Browser(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[cfg(not(feature = "hydrate"))]
fn no_browser() -> QueryStateError {
    QueryStateError::Browser("no browser context".to_owned())
}
