//! Diff engine for Tessera.
//!
//! Compares two stored versions line by line and produces an ordered list of
//! context/added/removed entries, change counters, and a rendered HTML form.
//!
//! # Key Types
//!
//! - [`DiffEngine`] -- binds the diff pipeline to a [`VersionStore`](tessera_versions::VersionStore)
//! - [`DiffResult`] -- both versions, entries, rendered HTML, counters
//! - [`DiffEntry`] / [`DiffKind`] -- one aligned line
//!
//! The pieces are also usable on their own: [`split_lines`] turns content
//! into lines, [`align_lines`] pairs them up, and [`render_html`] /
//! [`render_text`] format the entries.
//!
//! The aligner is a greedy pairwise walk. It never looks ahead to
//! resynchronize, so an inserted line in the middle shows every following
//! line as changed.

pub mod align;
pub mod engine;
pub mod error;
pub mod lines;
pub mod render;

pub use align::{align_lines, Alignment, DiffEntry, DiffKind};
pub use engine::{DiffEngine, DiffResult};
pub use error::{CompareResult, DiffError};
pub use lines::{decode_content, split_lines};
pub use render::{html_escape, render_html, render_text};
