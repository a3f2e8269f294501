//! CSV and TSV export for rendered alignment tables

use super::renderer::DisplayColumn;
use crate::collatex::error::{CollateXError, Result};
use csv::WriterBuilder;

/// Field separator for delimited export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    fn byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// Write one record per witness: the sigil, then each cell's text
///
/// Gaps are written as empty fields.
pub fn to_delimited(columns: &[DisplayColumn], delimiter: Delimiter) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter.byte())
        .flexible(true)
        .from_writer(Vec::new());

    for column in columns {
        let record = std::iter::once(column.header.as_str())
            .chain(column.cells.iter().map(|cell| cell.text_or_empty()));
        writer
            .write_record(record)
            .map_err(|e| CollateXError::Output(format!("Failed to write record: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CollateXError::Output(format!("Failed to flush table: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| CollateXError::Output(format!("Table is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collatex::result::{AlignmentResult, Cell};
    use crate::table::render;

    fn columns() -> Vec<DisplayColumn> {
        let result = AlignmentResult::new(
            vec!["A".into(), "B".into()],
            vec![
                vec![Cell::tokens(["the", "black"]), Cell::tokens(["the"])],
                vec![Cell::tokens(["cat,"]), Cell::Gap],
            ],
        );
        render(&result).unwrap()
    }

    fn read_back(text: &str, delimiter: Delimiter) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter.byte())
            .from_reader(text.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_csv_quotes_and_gaps() {
        let csv = to_delimited(&columns(), Delimiter::Comma).unwrap();
        assert!(csv.starts_with("A,the black,\"cat,\"\n"));

        let records = read_back(&csv, Delimiter::Comma);
        assert_eq!(records, vec![vec!["A", "the black", "cat,"], vec!["B", "the", ""]]);
    }

    #[test]
    fn test_tsv() {
        let tsv = to_delimited(&columns(), Delimiter::Tab).unwrap();
        assert!(tsv.starts_with("A\tthe black\tcat,\n"));

        let records = read_back(&tsv, Delimiter::Tab);
        assert_eq!(records[1], vec!["B", "the", ""]);
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_delimited(&[], Delimiter::Comma).unwrap(), "");
    }
}
