//! Flutter-facing bridge over `maintrack_core`.

pub mod api;
