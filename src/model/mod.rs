//! Data model types shared by the tree and its outer surfaces

mod document;
mod hash;

pub use document::TreeDocument;
pub use hash::Digest;
