//! Implementation of the `#[derive(Filterable)]` macro.
//!
//! Generates the field registry, field name constants and the accessor
//! from `#[filter(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::filterable_derive_impl;
