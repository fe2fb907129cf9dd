//! # Quotes Core
//!
//! The catalog's business logic, organized the hexagonal way:
//!
//! * **[`pagination`]**: the page merger and the response envelopes. Pure, no IO.
//! * **[`query`]**: turns raw listing parameters into a validated [`query::ListQuery`].
//! * **[`store`]**: the storage ports and the in-memory adapter.
//! * **[`listing`]**, **[`catalog`]**, **[`maintenance`]**: the use cases
//!   driven by the HTTP layer and the command line.
//! * **[`statistics`]**: aggregate counts over the catalog.

pub mod catalog;
pub mod listing;
pub mod maintenance;
pub mod pagination;
pub mod query;
pub mod statistics;
pub mod store;
