//! Query-parameter-bound value.
//!
//! DESIGN
//! ======
//! A binding is created once: it reads its parameter from the page URL (or
//! falls back to the supplied initial value when there is no page) and then
//! owns the value. Every mutation writes the value back with a non-navigating
//! URL replace. The URL is never read again after creation, so the bound value
//! is the source of truth.
//!
//! Each write re-reads the search string first, so parameters owned by other
//! bindings on the same page survive.
//!
//! ERROR HANDLING
//! ==============
//! A parameter that fails to decode at creation is returned as an error rather
//! than replaced by the initial value; callers decide whether to recover.

#[cfg(test)]
#[path = "binding_test.rs"]
mod binding_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::codec::{JsonCodec, ParamCodec};
use crate::error::QueryStateError;
use crate::location::Location;
use crate::query::{QueryParams, build_url};

/// Read and decode `param` from the location's current search string.
///
/// Returns `Ok(None)` when the parameter is absent.
///
/// # Errors
///
/// Propagates location read errors and codec decode errors.
pub fn read_param<T, C>(
    location: &impl Location,
    param: &str,
    codec: &C,
) -> Result<Option<T>, QueryStateError>
where
    C: ParamCodec<T>,
{
    let params = QueryParams::parse(&location.search()?);
    params.get(param).map(|raw| codec.decode(param, raw)).transpose()
}

/// Write `value` under `param` (or delete the parameter when the codec says
/// the value is empty) and replace the page URL. Returns the applied URL.
///
/// # Errors
///
/// Propagates codec encode errors and location read/replace errors.
pub fn write_param<T, C>(
    location: &impl Location,
    param: &str,
    value: &T,
    codec: &C,
) -> Result<String, QueryStateError>
where
    C: ParamCodec<T>,
{
    let encoded = codec.encode(param, value)?;
    let mut params = QueryParams::parse(&location.search()?);
    match &encoded {
        Some(text) => params.set(param, text.as_str()),
        None => params.delete(param),
    }
    let url = build_url(&location.pathname()?, &params.to_string());
    location.replace_url(&url)?;
    debug!(param, %url, removed = encoded.is_none(), "synced query parameter");
    Ok(url)
}

/// A value kept in sync with one URL query parameter.
///
/// `L` is the page backend; `None` means no page is available, in which case
/// the binding is a plain value holder.
#[derive(Debug)]
pub struct QueryParamBinding<T, L, C = JsonCodec> {
    param: String,
    value: T,
    location: Option<L>,
    codec: C,
}

impl<T, L> QueryParamBinding<T, L, JsonCodec>
where
    T: Serialize + DeserializeOwned,
    L: Location,
{
    /// Bind `param` with the JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns [`QueryStateError::Decode`] if the URL holds malformed JSON for
    /// `param`, or any error from the initial sync.
    pub fn new(
        param: impl Into<String>,
        initial: T,
        location: Option<L>,
    ) -> Result<Self, QueryStateError> {
        Self::with_codec(param, initial, location, JsonCodec)
    }
}

impl<T, L, C> QueryParamBinding<T, L, C>
where
    L: Location,
    C: ParamCodec<T>,
{
    /// Bind `param` with a custom codec.
    ///
    /// The value comes from the URL when the parameter is present, otherwise
    /// from `initial`. The URL is then synced once, as on first mount.
    ///
    /// # Errors
    ///
    /// Returns the codec's decode error for a malformed parameter, or any
    /// error from the initial sync.
    pub fn with_codec(
        param: impl Into<String>,
        initial: T,
        location: Option<L>,
        codec: C,
    ) -> Result<Self, QueryStateError> {
        let param = param.into();
        let from_url = match &location {
            Some(location) => read_param(location, &param, &codec)?,
            None => None,
        };
        debug!(param = %param, from_url = from_url.is_some(), "initialized query binding");
        let binding = Self {
            value: from_url.unwrap_or(initial),
            param,
            location,
            codec,
        };
        binding.sync()?;
        Ok(binding)
    }

    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[must_use]
    pub fn location(&self) -> Option<&L> {
        self.location.as_ref()
    }

    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Replace the value and sync the URL.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::sync`]. The new value is kept either way.
    pub fn set(&mut self, value: T) -> Result<(), QueryStateError> {
        self.value = value;
        self.sync()
    }

    /// Derive the next value from the previous one and sync the URL.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::sync`]. The new value is kept either way.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> Result<(), QueryStateError> {
        self.value = f(&self.value);
        self.sync()
    }

    /// Write the current value to the URL. Call after the route path changes.
    /// No-op without a location.
    ///
    /// # Errors
    ///
    /// Propagates codec and location errors.
    pub fn sync(&self) -> Result<(), QueryStateError> {
        let Some(location) = &self.location else {
            return Ok(());
        };
        write_param(location, &self.param, &self.value, &self.codec)?;
        Ok(())
    }
}
