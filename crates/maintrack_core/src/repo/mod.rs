//! Local key-value storage contracts and the period ledger repository.
//!
//! # Responsibility
//! - Model the browser-style local store as a `KeyValueStore` trait.
//! - Keep JSON encoding of ledgers out of the record store.
//!
//! # Invariants
//! - Repository APIs return transport (`Db`), encoding (`Serialization`) and
//!   capacity (`QuotaExceeded`) failures as distinct variants.

pub mod kv_store;
pub mod period_repo;
