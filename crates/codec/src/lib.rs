//! Field codecs for linkmend
//!
//! A field's raw stored value does not trivially decode to item ids: each
//! field type family has its own encoding. This crate provides:
//! - FieldCodec: the decode/rewrite/remove contract
//! - CodecRegistry: field type name -> codec routing
//! - Built-in codecs for single-id, id-list, and XML general-link fields

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod link;
pub mod list;
pub mod reference;
pub mod registry;
pub mod traits;

pub use link::GeneralLinkCodec;
pub use list::ListCodec;
pub use reference::ReferenceCodec;
pub use registry::CodecRegistry;
pub use traits::{DecodedRef, FieldCodec};
