//! Mention Core - Platform-agnostic @mention tracking
//!
//! This crate keeps mentions (named, id-bearing tokens inserted into free
//! text) consistent while the text around them is edited. It's designed to
//! be driven by any text-input host, native terminal or WASM alike: the
//! host reports edits before they land and selections after they land, and
//! the tracker answers with range updates and selection corrections.

pub mod app;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod export;
pub mod listener;
pub mod model;
pub mod template;
pub mod text;
pub mod tracker;

pub use app::{App, Mode};
pub use config::{Contact, MentionConfig};
pub use cursor::LineIndex;
pub use editor::MentionEditor;
pub use error::{MentionError, MentionResult};
pub use export::{to_json, ExportMention, ExportMessage};
pub use listener::TextChangeListener;
pub use model::{Highlight, HighlightSet, MentionId, Range, Rgb, Selection, TextEdit};
pub use template::MentionFormat;
pub use tracker::{DeleteAction, EditEffect, MentionTracker};
