//! # query-param-state
//!
//! Keeps one piece of client-side UI state in sync with a URL query parameter.
//! The parameter seeds the value on load and back-navigation, and every change
//! to the value is written back with a non-navigating history replace.
//!
//! `hook` exposes the Leptos entry point (`use_query_param_state`). The
//! browser-independent pieces underneath (`binding`, `codec`, `query`,
//! `location`) carry the actual read/write rules and run natively in tests
//! against `MemoryLocation`.

pub mod binding;
pub mod codec;
pub mod error;
pub mod hook;
pub mod location;
pub mod query;

pub use binding::{QueryParamBinding, read_param, write_param};
pub use codec::{JsonCodec, ParamCodec, PlainCodec};
pub use error::QueryStateError;
pub use hook::{use_query_param_state, use_query_param_state_with};
pub use location::{BrowserLocation, Location, MemoryLocation};
pub use query::{QueryParams, build_url};
