//! Leptos hook binding a signal to a URL query parameter.
//!
//! Must be called inside a `<Router>`: the route pathname is tracked so the
//! parameter is rewritten after client-side navigation. On the server (or any
//! build without the `hydrate` feature) there is no page to read, so the
//! initial value is used as-is and the write-back effect never touches a URL.

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::binding::{read_param, write_param};
use crate::codec::{JsonCodec, ParamCodec};
use crate::error::QueryStateError;
use crate::location::BrowserLocation;

/// Signal pair for a JSON-encoded query parameter.
///
/// The getter is seeded from `?{param}=...` when present, else from
/// `initial`. Every change to the value (via `set` or `update` on the
/// returned `WriteSignal`) or to the route path rewrites the parameter with
/// `history.replaceState`.
///
/// # Errors
///
/// Returns [`QueryStateError::Decode`] if the page URL holds malformed JSON
/// for `param`.
pub fn use_query_param_state<T>(
    param: impl Into<String>,
    initial: T,
) -> Result<(ReadSignal<T>, WriteSignal<T>), QueryStateError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    use_query_param_state_with(param, initial, JsonCodec)
}

/// [`use_query_param_state`] with a custom codec.
///
/// # Errors
///
/// Returns the codec's decode error for a malformed parameter, or a browser
/// error if the page URL cannot be read.
pub fn use_query_param_state_with<T, C>(
    param: impl Into<String>,
    initial: T,
    codec: C,
) -> Result<(ReadSignal<T>, WriteSignal<T>), QueryStateError>
where
    T: Send + Sync + 'static,
    C: ParamCodec<T> + 'static,
{
    let param = param.into();
    let pathname = use_location().pathname;

    let seeded = match BrowserLocation::current() {
        Some(page) => read_param(&page, &param, &codec)?,
        None => None,
    };
    tracing::debug!(param = %param, from_url = seeded.is_some(), "initialized query signal");
    let (value, set_value) = signal(seeded.unwrap_or(initial));

    // Write back whenever the value or the route path changes.
    Effect::new(move || {
        pathname.track();
        value.with(|current| {
            let Some(page) = BrowserLocation::current() else {
                return;
            };
            if let Err(e) = write_param(&page, &param, current, &codec) {
                tracing::warn!(error = %e, param = %param, "query parameter sync failed");
            }
        });
    });

    Ok((value, set_value))
}
