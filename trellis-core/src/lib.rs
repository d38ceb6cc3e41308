//! Trellis Core - Tabular input boundary
//!
//! This crate owns everything that happens before a graph exists: the
//! strongly-typed row record, node kinds and their display sizes, and the
//! CSV reader that turns loosely-typed tabular input into validated rows.
//!
//! All "is this field missing or malformed" handling lives here, so the
//! graph layer only ever sees rows that are already well-formed.

mod error;
mod node;
mod row;

pub use error::{IngestError, RowError};
pub use node::{Node, NodeKind, SizeMap};
pub use row::{read_rows, read_rows_from_path, ParentLink, RawRow, Row};
