pub mod edit;
pub mod highlight;
pub mod range;
pub mod selection;

pub use edit::TextEdit;
pub use highlight::{Highlight, HighlightSet, Rgb};
pub use range::{MentionId, Range};
pub use selection::Selection;
