//! Pure synthesis of the displacement map and the composite filter chain.
//!
//! Everything here is deterministic: no I/O, randomness or clocks, and identical inputs produce
//! byte-identical data URIs.

pub(crate) mod composite;
pub(crate) mod data_uri;
pub(crate) mod displacement;
