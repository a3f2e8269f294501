//! Collation results and the response parse boundary
//!
//! Every response representation gets its own variant in `CollationOutput`.
//! Structured results are validated here before they reach the table renderer.

use super::error::{CollateXError, Result};
use serde::{Deserialize, Serialize};

/// Response representation requested through the `Accept` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    /// Alignment table as JSON
    Json,
    /// TEI parallel segmentation markup
    Tei,
    /// Variant graph rendered as SVG
    Svg,
    /// Variant graph as GraphViz dot source
    GraphViz,
    /// Variant graph as GraphML
    GraphMl,
}

impl ResultFormat {
    /// Mime type sent as `Accept`
    pub fn mime_type(&self) -> &'static str {
        match self {
            ResultFormat::Json => "application/json",
            ResultFormat::Tei => "application/tei+xml",
            ResultFormat::Svg => "image/svg+xml",
            ResultFormat::GraphViz => "text/plain",
            ResultFormat::GraphMl => "application/graphml+xml",
        }
    }
}

/// Parsed collation response, tagged by representation
#[derive(Debug, Clone, PartialEq)]
pub enum CollationOutput {
    /// Structured alignment table
    Alignment(AlignmentResult),
    /// Markup text (TEI, SVG, GraphML)
    Markup(String),
    /// Plain-text graph description (GraphViz dot)
    GraphDescription(String),
}

impl CollationOutput {
    /// Parse a raw response body according to the format that was requested
    pub fn parse(format: ResultFormat, body: String) -> Result<Self> {
        match format {
            ResultFormat::Json => Ok(CollationOutput::Alignment(AlignmentResult::from_json(
                &body,
            )?)),
            ResultFormat::Tei | ResultFormat::Svg | ResultFormat::GraphMl => {
                Ok(CollationOutput::Markup(body))
            }
            ResultFormat::GraphViz => Ok(CollationOutput::GraphDescription(body)),
        }
    }

    /// Text of a markup or graph description response
    pub fn into_text(self) -> Option<String> {
        match self {
            CollationOutput::Markup(text) | CollationOutput::GraphDescription(text) => Some(text),
            CollationOutput::Alignment(_) => None,
        }
    }
}

/// A single token as returned by the service
///
/// Tokens are plain strings by default. Services configured to return token
/// data send objects instead, which carry the original text in `t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Text(String),
    Structured(serde_json::Value),
}

impl Token {
    /// Text shown for this token in a table cell
    pub fn display(&self) -> String {
        match self {
            Token::Text(text) => text.clone(),
            Token::Structured(value) => match value.get("t").and_then(|t| t.as_str()) {
                Some(text) => text.to_string(),
                None => value.to_string(),
            },
        }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::Text(text.to_string())
    }
}

/// One witness's slot at one alignment position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<Token>>", into = "Option<Vec<Token>>")]
pub enum Cell {
    /// The witness has no token at this position
    Gap,
    /// Tokens aligned to this position, in witness order
    Tokens(Vec<Token>),
}

impl Cell {
    /// Cell holding plain text tokens
    pub fn tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Cell::Tokens(tokens.into_iter().map(|t| t.as_ref().into()).collect())
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Cell::Gap)
    }
}

impl From<Option<Vec<Token>>> for Cell {
    fn from(value: Option<Vec<Token>>) -> Self {
        match value {
            Some(tokens) => Cell::Tokens(tokens),
            None => Cell::Gap,
        }
    }
}

impl From<Cell> for Option<Vec<Token>> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Gap => None,
            Cell::Tokens(tokens) => Some(tokens),
        }
    }
}

/// One alignment position: a cell per witness, in sigil order
pub type Row = Vec<Cell>;

/// Alignment table returned by the service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentResult {
    /// Witness sigils; defines column order
    pub sigils: Vec<String>,
    /// Alignment positions; defines row order
    pub table: Vec<Row>,
}

/// Wire shape before required fields are checked
#[derive(Deserialize)]
struct RawAlignmentResult {
    sigils: Option<Vec<String>>,
    table: Option<Vec<Row>>,
}

impl AlignmentResult {
    pub fn new(sigils: Vec<String>, table: Vec<Row>) -> Self {
        AlignmentResult { sigils, table }
    }

    /// Parse a JSON response body
    ///
    /// Absent or null `sigils`/`table` are reported as malformed results;
    /// row lengths are checked by `validate`.
    pub fn from_json(body: &str) -> Result<Self> {
        let raw: RawAlignmentResult = serde_json::from_str(body)?;

        let sigils = raw
            .sigils
            .ok_or_else(|| CollateXError::MalformedResult("missing 'sigils'".into()))?;
        let table = raw
            .table
            .ok_or_else(|| CollateXError::MalformedResult("missing 'table'".into()))?;

        Ok(AlignmentResult { sigils, table })
    }

    /// Check that every row has exactly one cell per sigil
    pub fn validate(&self) -> Result<()> {
        let expected = self.sigils.len();
        for (index, row) in self.table.iter().enumerate() {
            if row.len() != expected {
                return Err(CollateXError::MalformedResult(format!(
                    "row {} has {} cells, expected {} (one per sigil)",
                    index,
                    row.len(),
                    expected
                )));
            }
        }
        Ok(())
    }
}
