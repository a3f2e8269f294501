//! Shared collation pipeline
//!
//! The pipeline:
//! 1. Loads witnesses from text files
//! 2. Sends them to CollateX in the representation the output needs
//! 3. Renders alignment tables (HTML, CSV, TSV) or passes text formats through

use crate::collatex::{
    CollateXError, CollationClient, CollationOutput, Result, ResultFormat, Witness,
};
use crate::table::{render, to_delimited, to_html, Delimiter};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// What the pipeline produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    TableHtml,
    TableCsv,
    TableTsv,
    Json,
    Tei,
    Svg,
    GraphViz,
    GraphMl,
}

impl OutputKind {
    /// Response representation requested from the service
    pub fn result_format(&self) -> ResultFormat {
        match self {
            OutputKind::TableHtml | OutputKind::TableCsv | OutputKind::TableTsv => {
                ResultFormat::Json
            }
            OutputKind::Json => ResultFormat::Json,
            OutputKind::Tei => ResultFormat::Tei,
            OutputKind::Svg => ResultFormat::Svg,
            OutputKind::GraphViz => ResultFormat::GraphViz,
            OutputKind::GraphMl => ResultFormat::GraphMl,
        }
    }
}

/// How witness sigils are chosen when loading files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigilStyle {
    /// File stem (`a.txt` → `a`)
    #[default]
    FileStem,
    /// `A`, `B`, `C`, ... by argument position
    Letters,
}

/// Read one witness per file
///
/// Files that are empty or whitespace-only are skipped. Two files with the
/// same stem would produce the same sigil and are rejected.
pub fn load_witnesses<P: AsRef<Path>>(paths: &[P], style: SigilStyle) -> Result<Vec<Witness>> {
    let mut texts = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = content.len(), "Loaded witness");
        texts.push((path, content));
    }

    let witnesses = match style {
        SigilStyle::Letters => Witness::lettered(texts.into_iter().map(|(_, content)| content)),
        SigilStyle::FileStem => {
            let mut seen: HashMap<String, &Path> = HashMap::new();
            let mut witnesses = Vec::with_capacity(texts.len());

            for (path, content) in texts {
                if content.trim().is_empty() {
                    continue;
                }
                let sigil = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());

                if let Some(previous) = seen.insert(sigil.clone(), path) {
                    return Err(CollateXError::Config(format!(
                        "Witnesses '{}' and '{}' share the sigil '{}'; rename one or use letters",
                        previous.display(),
                        path.display(),
                        sigil
                    )));
                }
                witnesses.push(Witness::new(sigil, content));
            }
            witnesses
        }
    };

    Ok(witnesses)
}

/// Collate witnesses and produce the requested output text
pub async fn run(
    client: &CollationClient,
    witnesses: &[Witness],
    kind: OutputKind,
) -> Result<String> {
    info!(
        witnesses = witnesses.len(),
        output = ?kind,
        "Collating witnesses"
    );

    let output = client.fetch(kind.result_format(), witnesses).await?;

    match output {
        CollationOutput::Alignment(result) => {
            if kind == OutputKind::Json {
                return Ok(serde_json::to_string_pretty(&result)?);
            }

            let columns = render(&result)?;
            info!(
                columns = columns.len(),
                positions = result.table.len(),
                "Rendered alignment table"
            );

            match kind {
                OutputKind::TableCsv => to_delimited(&columns, Delimiter::Comma),
                OutputKind::TableTsv => to_delimited(&columns, Delimiter::Tab),
                _ => Ok(to_html(&columns)),
            }
        }
        CollationOutput::Markup(text) | CollationOutput::GraphDescription(text) => Ok(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collatex::{CollationRequest, RawResponse, Transport};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StaticTransport(&'static str);

    #[async_trait]
    impl Transport for StaticTransport {
        async fn post(&self, _url: &str, _accept: &str, _body: Vec<u8>) -> Result<RawResponse> {
            Ok(RawResponse {
                status: 200,
                status_text: "OK".into(),
                content_type: None,
                body: self.0.to_string(),
            })
        }
    }

    const TABLE_JSON: &str = r#"{
        "sigils": ["A", "B"],
        "table": [[["the"], ["the"]], [["cat"], null]]
    }"#;

    fn client(body: &'static str) -> CollationClient {
        CollationClient::new(Arc::new(StaticTransport(body)), CollationRequest::new())
    }

    #[test]
    fn test_load_witnesses_file_stems() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("vienna.txt");
        let b = dir.path().join("empty.txt");
        let c = dir.path().join("paris.txt");
        fs::write(&a, "the black cat").unwrap();
        fs::write(&b, "\n").unwrap();
        fs::write(&c, "the white cat").unwrap();

        let witnesses = load_witnesses(&[a, b, c], SigilStyle::FileStem).unwrap();
        assert_eq!(
            witnesses,
            vec![
                Witness::new("vienna", "the black cat"),
                Witness::new("paris", "the white cat")
            ]
        );
    }

    #[test]
    fn test_load_witnesses_rejects_duplicate_stems() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("one")).unwrap();
        fs::create_dir_all(dir.path().join("two")).unwrap();
        let a = dir.path().join("one").join("w.txt");
        let b = dir.path().join("two").join("w.txt");
        fs::write(&a, "the cat").unwrap();
        fs::write(&b, "a cat").unwrap();

        let err = load_witnesses(&[&a, &b], SigilStyle::FileStem).unwrap_err();
        match err {
            CollateXError::Config(message) => {
                assert!(message.contains(&a.display().to_string()));
                assert!(message.contains(&b.display().to_string()));
                assert!(message.contains("'w'"));
            }
            other => panic!("expected config error, got {:?}", other),
        }

        // Lettered sigils are unique regardless of file names
        let witnesses = load_witnesses(&[&a, &b], SigilStyle::Letters).unwrap();
        assert_eq!(witnesses[0].id, "A");
        assert_eq!(witnesses[1].id, "B");
    }

    #[test]
    fn test_load_witnesses_letters() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("one.txt");
        let b = dir.path().join("two.txt");
        fs::write(&a, "the cat").unwrap();
        fs::write(&b, "a cat").unwrap();

        let witnesses = load_witnesses(&[a, b], SigilStyle::Letters).unwrap();
        assert_eq!(witnesses[0].id, "A");
        assert_eq!(witnesses[1].id, "B");
    }

    #[test]
    fn test_load_witnesses_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(load_witnesses(&[missing], SigilStyle::FileStem).is_err());
    }

    #[tokio::test]
    async fn test_run_html_table() {
        let html = run(&client(TABLE_JSON), &[], OutputKind::TableHtml)
            .await
            .unwrap();
        assert!(html.starts_with("<table class=\"alignment\">"));
        // A single reading next to a gap still counts as agreement
        assert!(html.contains(
            "<tr><th>B</th><td class=\"invariant\">the</td><td class=\"invariant gap\"></td></tr>"
        ));
    }

    #[tokio::test]
    async fn test_run_tsv_table() {
        let tsv = run(&client(TABLE_JSON), &[], OutputKind::TableTsv)
            .await
            .unwrap();
        assert!(tsv.starts_with("A\tthe\tcat\n"));
    }

    #[tokio::test]
    async fn test_run_json_round_trips_result() {
        let json = run(&client(TABLE_JSON), &[], OutputKind::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sigils"], serde_json::json!(["A", "B"]));
        assert_eq!(value["table"][1][1], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_run_passes_text_through() {
        let dot = run(&client("digraph G {}"), &[], OutputKind::GraphViz)
            .await
            .unwrap();
        assert_eq!(dot, "digraph G {}");
    }

    #[tokio::test]
    async fn test_run_rejects_malformed_table() {
        let ragged = r#"{"sigils": ["A", "B"], "table": [[["a"], ["a"], ["b"]]]}"#;
        let err = run(&client(ragged), &[], OutputKind::TableHtml)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::collatex::CollateXError::MalformedResult(_)
        ));
    }
}
