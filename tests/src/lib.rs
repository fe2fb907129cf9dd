//! Cross-crate tests: the listing over a real store and the HTTP surface.

#[cfg(test)]
mod support;

mod api;
mod listing;
