//! Flutter-facing bridge for the Routino notes core.

pub mod api;
