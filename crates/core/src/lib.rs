//! Functional core for sagefemme.
//!
//! Pure types and functions shared by the server: the template model and its
//! lookup filters, the cached snapshot and its freshness rules, and the
//! storage contract. Nothing in this crate performs I/O.

pub mod cache;
pub mod serde;
pub mod storage;
pub mod template;
