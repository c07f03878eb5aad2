//! Schema catalog
//!
//! Declares the exact JSON shape each structured model call must return.
//! The matching instruction templates live in [`crate::prompts`].

pub mod catalog;
mod node;

pub use node::{SchemaNode, SchemaType};
