//! IMAP envelope module.
//!
//! This module provides conversion utilities from the raw fetch
//! returned by the `imap` crate to the envelope.

use std::borrow::Cow;

use imap::types::Fetch;
use rfc2047_decoder;

use crate::{
    backend::imap::{Error, Result},
    envelope::Mailbox,
    Envelope,
};

pub fn from_raw(fetch: &Fetch) -> Result<Envelope> {
    let decode = |input: &Cow<[u8]>| {
        rfc2047_decoder::Decoder::new()
            .skip_encoded_word_length(true)
            .decode(input)
    };

    let envelope = fetch
        .envelope()
        .ok_or_else(|| Error::GetEnvelopeError(fetch.message))?;

    let subject = envelope
        .subject
        .as_ref()
        .map(|subject| decode(subject).map_err(|err| Error::DecodeSubjectError(err, fetch.message)))
        .unwrap_or_else(|| Ok(String::default()))?;

    let from = envelope
        .from
        .as_ref()
        .and_then(|addrs| addrs.get(0))
        .map(|addr| {
            match (
                addr.name.as_ref(),
                addr.mailbox.as_ref(),
                addr.host.as_ref(),
            ) {
                (name, Some(mbox), Some(host)) => {
                    let mbox =
                        decode(mbox).map_err(|err| Error::DecodeSenderMboxError(err, fetch.message))?;
                    let host =
                        decode(host).map_err(|err| Error::DecodeSenderHostError(err, fetch.message))?;

                    match name {
                        None => Ok(Mailbox::new_nameless([mbox, host].join("@"))),
                        Some(name) => {
                            let name = decode(name)
                                .map_err(|err| Error::DecodeSenderNameError(err, fetch.message))?;
                            Ok(Mailbox::new(Some(name), [mbox, host].join("@")))
                        }
                    }
                }
                _ => Err(Error::ParseSenderError(fetch.message)),
            }
        })
        .ok_or_else(|| Error::GetSenderError(fetch.message))??;

    Ok(Envelope {
        seq: fetch.message,
        from,
        subject,
    })
}
