use crate::scraper::ScraperError;
use ::scraper::{Html, Selector};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Global the search page assigns its listing payload to.
pub const DEFAULT_MARKER_GLOBAL: &str = "window.jsonModel";

const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error, PartialEq)]
pub enum SpanError {
    #[error("no JSON literal after marker")]
    Empty,
    #[error("unterminated JSON literal")]
    Unterminated,
    #[error("mismatched closing '{found}' at byte {at}")]
    Mismatched { found: char, at: usize },
}

#[derive(Debug, Error)]
enum PayloadError {
    #[error(transparent)]
    Span(#[from] SpanError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Finds `<global> = <json>` inside a page's script blocks.
///
/// The marker is matched as plain text, so a string value containing the
/// marker text is also treated as a candidate.
#[derive(Debug, Clone)]
pub struct EmbeddedDataExtractor {
    marker: String,
}

impl Default for EmbeddedDataExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_GLOBAL)
    }
}

impl EmbeddedDataExtractor {
    pub fn new(global_name: &str) -> Self {
        Self {
            marker: format!("{global_name} = "),
        }
    }

    /// Returns the first candidate payload that parses, or `None` when no
    /// script block yields one.
    pub fn extract(&self, html: &str) -> Result<Option<Value>, ScraperError> {
        let document = Html::parse_document(html);
        let selector =
            Selector::parse("script").map_err(|e| ScraperError::HtmlParse(e.to_string()))?;

        for (idx, script) in document.select(&selector).enumerate() {
            let text: String = script.text().collect();
            let Some(pos) = text.find(&self.marker) else {
                continue;
            };

            debug!(script = idx, marker = %self.marker, "Found script with embedded data");
            let rest = &text[pos + self.marker.len()..];

            match parse_embedded(rest) {
                Ok(value) => {
                    debug!(script = idx, "Parsed embedded data");
                    return Ok(Some(value));
                }
                Err(e) => {
                    let prefix: String = rest.chars().take(PREVIEW_CHARS).collect();
                    warn!(script = idx, error = %e, prefix = %prefix, "Error decoding embedded data");
                }
            }
        }

        Ok(None)
    }
}

fn parse_embedded(rest: &str) -> Result<Value, PayloadError> {
    let literal = json_span(rest)?;
    Ok(serde_json::from_str(literal)?)
}

/// Returns the leading JSON literal of `text`, ignoring whatever follows it.
///
/// Objects and arrays are delimited by a bracket scanner that skips string
/// contents. Any other literal runs to the first `;` or line break.
pub fn json_span(text: &str) -> Result<&str, SpanError> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    match bytes.first() {
        None => return Err(SpanError::Empty),
        Some(b'{') | Some(b'[') => {}
        Some(_) => {
            let end = text.find([';', '\n', '\r']).unwrap_or(text.len());
            let scalar = text[..end].trim_end();
            return if scalar.is_empty() {
                Err(SpanError::Empty)
            } else {
                Ok(scalar)
            };
        }
    }

    let mut open: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => open.push(b),
            b'}' | b']' => {
                let expected = if b == b'}' { b'{' } else { b'[' };
                if open.pop() != Some(expected) {
                    return Err(SpanError::Mismatched {
                        found: b as char,
                        at: i,
                    });
                }
                if open.is_empty() {
                    return Ok(&text[..=i]);
                }
            }
            _ => {}
        }
    }

    Err(SpanError::Unterminated)
}
