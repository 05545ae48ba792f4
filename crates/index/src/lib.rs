//! Reverse link index for linkmend
//!
//! Maps a target item to the set of [`linkmend_core::ItemLink`]s that
//! reference it, with idempotent maintenance operations and bincode
//! persistence for durability across process restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod link_index;

pub use link_index::LinkIndex;
