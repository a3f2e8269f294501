//! Alignment table rendering
//!
//! Turns the row-major alignment result (one row per alignment position, one
//! cell per witness) into column-major display columns (one per witness), with
//! each position classified as invariant or variant.
//!
//! A position is invariant when its non-gap cells all read the same after
//! normalization. A position where every witness has a gap has no readings at
//! all and is classified variant.

use crate::collatex::error::Result;
use crate::collatex::result::{AlignmentResult, Cell};
use std::collections::HashSet;

/// One witness's readings across all alignment positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayColumn {
    /// Witness sigil
    pub header: String,
    /// One cell per alignment position, in table order
    pub cells: Vec<DisplayCell>,
}

/// A normalized, classified cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    /// Tokens joined by single spaces; `None` for gaps
    pub text: Option<String>,
    /// Classification of the whole alignment position
    pub variant: bool,
    /// The witness has no token at this position
    pub gap: bool,
}

impl DisplayCell {
    /// Cell text, empty for gaps
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Join a cell's tokens into its display text
///
/// No trimming or escaping happens here; that is left to the emitter.
pub fn normalize_cell(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Gap => None,
        Cell::Tokens(tokens) => Some(
            tokens
                .iter()
                .map(|token| token.display())
                .collect::<Vec<_>>()
                .join(" "),
        ),
    }
}

/// Whether a row of normalized cells differs between witnesses
pub fn is_variant(normalized: &[Option<String>]) -> bool {
    let distinct: HashSet<&str> = normalized.iter().flatten().map(String::as_str).collect();
    distinct.len() != 1
}

/// Render an alignment result into display columns
///
/// Columns follow `sigils` order and cells follow `table` order. Fails with
/// `MalformedResult` if any row does not have one cell per sigil; no partial
/// output is produced in that case.
pub fn render(result: &AlignmentResult) -> Result<Vec<DisplayColumn>> {
    result.validate()?;

    let mut columns: Vec<DisplayColumn> = result
        .sigils
        .iter()
        .map(|sigil| DisplayColumn {
            header: sigil.clone(),
            cells: Vec::with_capacity(result.table.len()),
        })
        .collect();

    for row in &result.table {
        for (column, cell) in columns.iter_mut().zip(classify_row(row)) {
            column.cells.push(cell);
        }
    }

    Ok(columns)
}

fn classify_row(row: &[Cell]) -> Vec<DisplayCell> {
    let normalized: Vec<Option<String>> = row.iter().map(normalize_cell).collect();
    let variant = is_variant(&normalized);

    normalized
        .into_iter()
        .map(|text| DisplayCell {
            gap: text.is_none(),
            text,
            variant,
        })
        .collect()
}
