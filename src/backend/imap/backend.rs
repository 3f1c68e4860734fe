//! IMAP backend module.
//!
//! This module contains the definition of the IMAP backend.

use imap;
use log::{debug, log_enabled, trace, Level};
use native_tls::{TlsConnector, TlsStream};
use std::{net::TcpStream, result, time::Duration};
use thiserror::Error;

use imap_proto::SectionPath;

use crate::{
    backend, email, envelope, BodyStructure, Envelope, ImapConfig, MailboxBackend,
    MailboxConnector, MailboxStatus,
};

const INBOX: &str = "INBOX";

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot create tls connector")]
    CreateTlsConnectorError(#[source] native_tls::Error),
    #[error("cannot connect to imap server")]
    ConnectImapServerError(#[source] imap::Error),
    #[error("cannot login to imap server")]
    LoginImapServerError(#[source] imap::Error),
    #[error("cannot select mailbox {1}")]
    SelectFolderError(#[source] imap::Error, String),
    #[error("cannot close imap session")]
    CloseImapSessionError(#[source] imap::Error),

    #[error("cannot search unseen messages")]
    SearchUnseenMsgsError(#[source] imap::Error),
    #[error("cannot fetch envelope of message {1}")]
    FetchEnvelopeError(#[source] imap::Error, u32),
    #[error("cannot fetch structure of message {1}")]
    FetchStructureError(#[source] imap::Error, u32),
    #[error("cannot fetch section {1} of message {2}")]
    FetchPartError(#[source] imap::Error, usize, u32),
    #[error("cannot find message {0}")]
    FindMsgError(u32),
    #[error("cannot get structure of message {0}")]
    GetStructureError(u32),
    #[error("cannot add seen flag to message {1}")]
    AddSeenFlagError(#[source] imap::Error, u32),

    #[error("cannot get envelope of message {0}")]
    GetEnvelopeError(u32),
    #[error("cannot get sender of message {0}")]
    GetSenderError(u32),
    #[error("cannot parse sender of message {0}")]
    ParseSenderError(u32),
    #[error("cannot decode subject of message {1}")]
    DecodeSubjectError(#[source] rfc2047_decoder::Error, u32),
    #[error("cannot decode sender name of message {1}")]
    DecodeSenderNameError(#[source] rfc2047_decoder::Error, u32),
    #[error("cannot decode sender mailbox of message {1}")]
    DecodeSenderMboxError(#[source] rfc2047_decoder::Error, u32),
    #[error("cannot decode sender host of message {1}")]
    DecodeSenderHostError(#[source] rfc2047_decoder::Error, u32),
}

pub type Result<T> = result::Result<T, Error>;

pub type ImapSession = imap::Session<TlsStream<TcpStream>>;

/// Represents the IMAP backend.
pub struct ImapBackend {
    session: ImapSession,
}

impl ImapBackend {
    fn create_session(config: &ImapConfig) -> Result<ImapSession> {
        let builder = TlsConnector::builder()
            .danger_accept_invalid_certs(config.insecure())
            .danger_accept_invalid_hostnames(config.insecure())
            .build()
            .map_err(Error::CreateTlsConnectorError)?;

        let timeout = Duration::from_secs(config.timeout());
        let client = imap::ClientBuilder::new(&config.host, config.port)
            .connect(|domain, tcp| {
                tcp.set_read_timeout(Some(timeout))?;
                let connector = TlsConnector::connect(&builder, domain, tcp)?;
                Ok(connector)
            })
            .map_err(Error::ConnectImapServerError)?;

        let mut session = client
            .login(&config.login, &config.passwd)
            .map_err(|res| Error::LoginImapServerError(res.0))?;
        session.debug = log_enabled!(Level::Trace);

        Result::Ok(session)
    }

    /// Opens a session on the mailbox and selects the inbox. A
    /// session whose select fails is logged out before the error
    /// surfaces.
    pub fn connect(config: &ImapConfig) -> Result<Self> {
        let mut session = Self::create_session(config)?;

        if let Err(err) = session.select(INBOX) {
            if let Err(err) = session.logout() {
                debug!("cannot logout after select error: {}", err);
            }
            return Err(Error::SelectFolderError(err, INBOX.to_owned()));
        }

        Ok(Self { session })
    }
}

impl MailboxBackend for ImapBackend {
    fn search_unseen(&mut self) -> backend::Result<Vec<u32>> {
        let mut seqs: Vec<u32> = self
            .session
            .search("UNSEEN")
            .map_err(Error::SearchUnseenMsgsError)?
            .into_iter()
            .collect();
        seqs.sort_unstable();

        debug!("found {} unseen message(s)", seqs.len());
        trace!("seqs: {:?}", seqs);

        Ok(seqs)
    }

    fn fetch_envelope(&mut self, seq: u32) -> backend::Result<Envelope> {
        debug!("fetching envelope of message {}", seq);

        let fetches = self
            .session
            .fetch(seq.to_string(), "(ENVELOPE)")
            .map_err(|err| Error::FetchEnvelopeError(err, seq))?;
        let fetch = fetches.get(0).ok_or(Error::FindMsgError(seq))?;
        let envelope = envelope::imap::from_raw(fetch)?;

        Ok(envelope)
    }

    fn fetch_structure(&mut self, seq: u32) -> backend::Result<BodyStructure> {
        debug!("fetching structure of message {}", seq);

        let fetches = self
            .session
            .fetch(seq.to_string(), "(BODYSTRUCTURE)")
            .map_err(|err| Error::FetchStructureError(err, seq))?;
        let fetch = fetches.get(0).ok_or(Error::FindMsgError(seq))?;
        let structure = fetch
            .bodystructure()
            .ok_or(Error::GetStructureError(seq))?;

        Ok(email::imap::from_raw(structure))
    }

    fn fetch_part(&mut self, seq: u32, part_number: usize) -> backend::Result<Vec<u8>> {
        debug!("fetching section {} of message {}", part_number, seq);

        let query = format!("BODY.PEEK[{}]", part_number);
        let fetches = self
            .session
            .fetch(seq.to_string(), &query)
            .map_err(|err| Error::FetchPartError(err, part_number, seq))?;
        let fetch = fetches.get(0).ok_or(Error::FindMsgError(seq))?;
        let part = fetch
            .section(&SectionPath::Part(vec![part_number as u32], None))
            .map(|part| part.to_vec())
            .unwrap_or_default();

        Ok(part)
    }

    fn add_seen_flag(&mut self, seq: u32) -> backend::Result<()> {
        debug!("adding seen flag to message {}", seq);

        self.session
            .store(seq.to_string(), "+FLAGS (\\Seen)")
            .map_err(|err| Error::AddSeenFlagError(err, seq))?;

        Ok(())
    }

    fn status(&mut self) -> backend::Result<MailboxStatus> {
        let mailbox = self
            .session
            .select(INBOX)
            .map_err(|err| Error::SelectFolderError(err, INBOX.to_owned()))?;
        let unseen = self
            .session
            .search("UNSEEN")
            .map_err(Error::SearchUnseenMsgsError)?
            .len();

        Ok(MailboxStatus {
            messages: mailbox.exists,
            unseen,
        })
    }

    fn close(&mut self) -> backend::Result<()> {
        debug!("closing imap session");

        self.session
            .close()
            .map_err(Error::CloseImapSessionError)?;

        Ok(())
    }
}

/// Opens IMAP sessions out of an IMAP config.
pub struct ImapConnector {
    pub config: ImapConfig,
}

impl ImapConnector {
    pub fn new(config: ImapConfig) -> Self {
        Self { config }
    }
}

impl MailboxConnector for ImapConnector {
    fn connect(&self) -> backend::Result<Box<dyn MailboxBackend>> {
        Ok(Box::new(ImapBackend::connect(&self.config)?))
    }
}
