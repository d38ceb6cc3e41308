//! Row records and CSV ingestion.
//!
//! Input arrives as loosely-typed records with four named columns:
//! `node`, `parent`, `type`, `relationship`. This module validates each
//! record into a [`Row`] before it can reach the graph builder, so
//! malformed input is rejected in one place with a row number attached.

use crate::error::{IngestError, RowError};
use crate::node::NodeKind;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::debug;

/// One record as it appears in the input, before validation.
///
/// Every field is optional here; [`Row::from_raw`] decides what is
/// actually required. Columns beyond the four named ones are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub node: Option<String>,

    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub relationship: Option<String>,
}

/// A validated link from a node to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    /// Id of the parent node.
    pub id: String,

    /// Label describing the relationship, e.g. "reports_to".
    pub relationship: String,
}

/// A validated input row.
///
/// Invariant: when `parent` is present, its relationship label is
/// non-empty. Root rows have no parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub kind: NodeKind,
    pub parent: Option<ParentLink>,
}

impl Row {
    /// Validates a raw record.
    ///
    /// `row` is the 1-based data row number used in error messages.
    pub fn from_raw(raw: RawRow, row: u64) -> Result<Self, RowError> {
        let id = non_empty(raw.node).ok_or(RowError::MissingField { row, field: "node" })?;

        let kind_value = non_empty(raw.kind).ok_or(RowError::MissingField { row, field: "type" })?;
        let kind = NodeKind::parse(&kind_value).ok_or(RowError::UnknownKind {
            row,
            value: kind_value,
        })?;

        // A relationship label is required exactly when a parent is named.
        let parent = match non_empty(raw.parent) {
            Some(parent_id) => {
                let relationship = non_empty(raw.relationship).ok_or(RowError::MissingField {
                    row,
                    field: "relationship",
                })?;
                Some(ParentLink {
                    id: parent_id,
                    relationship,
                })
            }
            None => None,
        };

        Ok(Self { id, kind, parent })
    }
}

/// Treats empty and whitespace-only cells as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Reads and validates CSV rows from any reader.
///
/// The first record must be a header naming the columns.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<Row>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in csv_reader.deserialize::<RawRow>().enumerate() {
        let raw = record?;
        rows.push(Row::from_raw(raw, i as u64 + 1)?);
    }

    debug!(rows = rows.len(), "tabular input validated");
    Ok(rows)
}

/// Reads and validates CSV rows from a file.
pub fn read_rows_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Row>, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<Row>, IngestError> {
        read_rows(input.as_bytes())
    }

    #[test]
    fn test_parses_roots_and_children() {
        let rows = parse(
            "node,parent,type,relationship\n\
             TeamA,,lead,\n\
             Bob,TeamA,member,reports_to\n",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "TeamA");
        assert_eq!(rows[0].kind, NodeKind::Lead);
        assert!(rows[0].parent.is_none());

        let link = rows[1].parent.as_ref().unwrap();
        assert_eq!(link.id, "TeamA");
        assert_eq!(link.relationship, "reports_to");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let rows = parse(
            "node,parent,type,relationship,notes\n\
             TeamA,,lead,,irrelevant\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_whitespace_cells_are_absent() {
        let rows = parse(
            "node,parent,type,relationship\n\
             TeamA,   ,lead,  \n",
        )
        .unwrap();
        assert!(rows[0].parent.is_none());
    }

    #[test]
    fn test_missing_node_rejected() {
        let err = parse(
            "node,parent,type,relationship\n\
             ,,lead,\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Row(RowError::MissingField { row: 1, field: "node" })
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = parse(
            "node,parent,type,relationship\n\
             TeamA,,boss,\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Row(RowError::UnknownKind { row: 1, ref value }) if value == "boss"
        ));
    }

    #[test]
    fn test_parent_requires_relationship() {
        let err = parse(
            "node,parent,type,relationship\n\
             Bob,TeamA,member,\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Row(RowError::MissingField {
                row: 1,
                field: "relationship"
            })
        ));
    }
}
