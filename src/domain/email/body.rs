//! Message body module.
//!
//! This module contains the extraction of the ticket body out of the
//! message structure.

use regex::Regex;

use crate::email::{html_to_text, BodyStructure, Part};

/// Extracts the ticket body of a message.
///
/// The fetcher is called with 1-based part numbers and returns raw,
/// still transfer-encoded section bytes. Single part messages use
/// part 1; multipart messages walk their top level parts and keep the
/// last PLAIN part, falling back to converting the last HTML part.
pub fn extract_body<F, E>(structure: &BodyStructure, mut fetch_part: F) -> Result<String, E>
where
    F: FnMut(usize) -> Result<Vec<u8>, E>,
{
    let body = match structure {
        BodyStructure::Single(part) => {
            let body = to_text(part, &fetch_part(1)?);
            if part.subtype == "HTML" {
                html_to_text(&body)
            } else {
                body
            }
        }
        BodyStructure::Multipart(parts) => {
            let mut text_body = String::new();
            let mut html_body = String::new();

            for (index, part) in parts.iter().enumerate() {
                let part_body = to_text(part, &fetch_part(index + 1)?);
                if part.subtype == "HTML" {
                    html_body = part_body;
                } else if part.subtype == "PLAIN" {
                    text_body = part_body;
                }
            }

            if !text_body.is_empty() {
                text_body
            } else if !html_body.is_empty() {
                html_to_text(&html_body)
            } else {
                String::new()
            }
        }
        BodyStructure::Other => String::new(),
    };

    Ok(clean_body(&body))
}

fn to_text(part: &Part, raw: &[u8]) -> String {
    String::from_utf8_lossy(&part.encoding.decode(raw)).into_owned()
}

/// Normalizes an extracted body: unified line endings, collapsed
/// blank runs, collapsed horizontal whitespace and blanked signature
/// delimiter lines.
pub fn clean_body(body: &str) -> String {
    let body = body.replace("\r\n", "\n").replace('\r', "\n");
    let body = Regex::new(r"\n{3,}").unwrap().replace_all(&body, "\n\n");
    let body = Regex::new(r"[ \t]+").unwrap().replace_all(&body, " ");
    let body = Regex::new(r"(?m)^--\s*$").unwrap().replace_all(&body, "");
    body.trim().to_string()
}
