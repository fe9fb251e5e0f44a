pub mod document;
pub mod pii;

pub use document::{Document, ID_FIELD};
pub use pii::{Masked, MaskedEmail};
