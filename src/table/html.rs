//! HTML emission for rendered alignment tables
//!
//! Produces `<table class="alignment">` with one row per witness. Each cell is
//! classed `invariant` or `variant`, plus `gap` when the witness has no reading.

use super::renderer::DisplayColumn;

/// Escape text for HTML element content and attribute values
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render display columns as an HTML table
pub fn to_html(columns: &[DisplayColumn]) -> String {
    let mut out = String::from("<table class=\"alignment\">\n");

    for column in columns {
        out.push_str("<tr>");
        out.push_str(&format!("<th>{}</th>", escape_html(&column.header)));

        for cell in &column.cells {
            let class = if cell.variant { "variant" } else { "invariant" };
            let gap = if cell.gap { " gap" } else { "" };
            out.push_str(&format!(
                "<td class=\"{}{}\">{}</td>",
                class,
                gap,
                escape_html(cell.text_or_empty())
            ));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</table>\n");
    out
}
