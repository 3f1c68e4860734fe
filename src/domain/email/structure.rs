//! Message structure module.
//!
//! This module contains the representation of the MIME skeleton of a
//! message, as advertised by the BODYSTRUCTURE item of the mailbox.

/// Represents the content transfer encoding of a part.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Encoding {
    SevenBit,
    EightBit,
    Binary,
    Base64,
    QuotedPrintable,
    Other,
}

impl Default for Encoding {
    fn default() -> Self {
        Self::SevenBit
    }
}

impl Encoding {
    /// Decodes raw section bytes according to the transfer encoding.
    /// A section that cannot be decoded is passed through as-is.
    pub fn decode(&self, raw: &[u8]) -> Vec<u8> {
        match self {
            Self::Base64 => {
                // Base64 sections arrive with their line wrapping
                // still in place, which the decoder rejects.
                let cleaned: Vec<u8> = raw
                    .iter()
                    .copied()
                    .filter(|byte| !byte.is_ascii_whitespace())
                    .collect();
                base64::decode(&cleaned).unwrap_or_else(|_| raw.to_vec())
            }
            Self::QuotedPrintable => {
                quoted_printable::decode(raw, quoted_printable::ParseMode::Robust)
                    .unwrap_or_else(|_| raw.to_vec())
            }
            _ => raw.to_vec(),
        }
    }
}

/// Represents a part of the structure.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Part {
    /// Represents the MIME subtype, uppercased (PLAIN, HTML, ...).
    pub subtype: String,
    /// Represents the content transfer encoding.
    pub encoding: Encoding,
}

impl Part {
    pub fn new<S: ToString>(subtype: S, encoding: Encoding) -> Self {
        Self {
            subtype: subtype.to_string().to_uppercase(),
            encoding,
        }
    }
}

/// Represents the MIME skeleton of a message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BodyStructure {
    /// Represents a message made of a single text part.
    Single(Part),
    /// Represents a multipart message. Only top level parts are
    /// listed, in part number order.
    Multipart(Vec<Part>),
    /// Represents any other kind of message (delivery reports,
    /// standalone attachments, ...), which carries no usable text.
    Other,
}
