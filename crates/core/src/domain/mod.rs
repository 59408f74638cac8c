pub mod selection;
pub mod share;

pub use selection::Selection;
pub use share::{Share, ShareRejection};
