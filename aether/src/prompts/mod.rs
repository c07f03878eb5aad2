//! Instruction templates
//!
//! Every model call starts from a named template rendered with user text.
//! Templates are embedded in the binary and may be overridden per name from
//! a directory of `.pmt` files.

pub mod embedded;
mod loader;

pub use loader::{PromptContext, PromptError, PromptLoader};
