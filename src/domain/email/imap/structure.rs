//! IMAP message structure module.
//!
//! This module provides conversion utilities from the raw
//! BODYSTRUCTURE returned by the `imap` crate to the domain
//! structure.

use imap_proto::{
    BodyContentCommon, BodyContentSinglePart, BodyStructure as ImapBodyStructure, ContentEncoding,
};

use crate::email::{BodyStructure, Encoding, Part};

pub fn from_raw(raw: &ImapBodyStructure) -> BodyStructure {
    match raw {
        ImapBodyStructure::Text { common, other, .. } => {
            BodyStructure::Single(to_part(common, other))
        }
        ImapBodyStructure::Multipart { bodies, .. } => {
            BodyStructure::Multipart(bodies.iter().map(to_child_part).collect())
        }
        _ => BodyStructure::Other,
    }
}

fn to_child_part(raw: &ImapBodyStructure) -> Part {
    match raw {
        ImapBodyStructure::Basic { common, other, .. }
        | ImapBodyStructure::Text { common, other, .. }
        | ImapBodyStructure::Message { common, other, .. } => to_part(common, other),
        // Nested multiparts keep their multipart subtype, which never
        // matches a text slot during extraction.
        ImapBodyStructure::Multipart { common, .. } => {
            Part::new(common.ty.subtype.as_ref(), Encoding::default())
        }
    }
}

fn to_part(common: &BodyContentCommon, other: &BodyContentSinglePart) -> Part {
    Part::new(common.ty.subtype.as_ref(), to_encoding(&other.transfer_encoding))
}

fn to_encoding(raw: &ContentEncoding) -> Encoding {
    match raw {
        ContentEncoding::SevenBit => Encoding::SevenBit,
        ContentEncoding::EightBit => Encoding::EightBit,
        ContentEncoding::Binary => Encoding::Binary,
        ContentEncoding::Base64 => Encoding::Base64,
        ContentEncoding::QuotedPrintable => Encoding::QuotedPrintable,
        ContentEncoding::Other(_) => Encoding::Other,
    }
}
