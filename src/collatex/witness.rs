//! Witness payload submitted for collation

use serde::{Deserialize, Serialize};

/// One source document submitted to CollateX
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    /// Sigil identifying the witness in the alignment result
    pub id: String,
    /// Plain text content, tokenized by the service
    pub content: String,
}

impl Witness {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Witness {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Build witnesses from plain texts, labelled `A`, `B`, `C`, ...
    ///
    /// Empty texts are dropped but still consume a letter, so the sigil of
    /// each witness stays tied to its input position.
    pub fn lettered<I, S>(texts: I) -> Vec<Witness>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .filter_map(|(i, text)| {
                let content = text.into();
                if content.trim().is_empty() {
                    None
                } else {
                    Some(Witness::new(letter_sigil(i), content))
                }
            })
            .collect()
    }
}

/// Sigil for the witness at `index`: A..Z, then AA, AB, ...
pub fn letter_sigil(index: usize) -> String {
    let mut n = index;
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
