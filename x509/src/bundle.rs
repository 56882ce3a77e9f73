//! Certificates read from one source, in the order they were found.
//!
//! A bundle keeps going past bad blocks: every PEM block becomes an entry,
//! and entries that fail to decode carry their error instead of a
//! certificate.

use std::cmp::Ordering;
use std::collections::HashSet;

use certinfo::decoder::Decoder;
use chrono::{DateTime, Utc};
use pem::{Label, Pem};

use crate::error::{Error, Result};
use crate::{Certificate, CertificateKind};

const DER_SEQUENCE: u8 = 0x30;

/// One slot of a bundle. Position is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateEntry {
    position: usize,
    der: Vec<u8>,
    parsed: std::result::Result<Certificate, Error>,
}

impl CertificateEntry {
    pub fn new(position: usize, der: Vec<u8>) -> Self {
        let parsed = Certificate::from_der(&der);
        CertificateEntry {
            position,
            der,
            parsed,
        }
    }

    pub fn with_error(position: usize, error: Error) -> Self {
        CertificateEntry {
            position,
            der: Vec::new(),
            parsed: Err(error),
        }
    }

    fn from_pem(position: usize, block: std::result::Result<Pem, pem::Error>) -> Self {
        let block = match block {
            Ok(block) => block,
            Err(err) => return Self::with_error(position, err.into()),
        };
        if *block.label() != Label::Certificate {
            return Self::with_error(position, Error::UnexpectedBlock(block.label().to_string()));
        }
        let der: std::result::Result<Vec<u8>, pem::Error> = block.decode();
        match der {
            Ok(der) => Self::new(position, der),
            Err(err) => Self::with_error(position, err.into()),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// DER bytes of the block, empty when the block itself was unreadable.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    pub fn certificate(&self) -> Option<&Certificate> {
        self.parsed.as_ref().ok()
    }

    pub fn error(&self) -> Option<&Error> {
        self.parsed.as_ref().err()
    }

    /// `ERROR: block at position P: ERR` for errored entries.
    pub fn error_line(&self) -> Option<String> {
        self.error()
            .map(|err| format!("ERROR: block at position {}: {}", self.position, err))
    }

    /// Rendered subject, or the error line.
    pub fn subject_string(&self) -> String {
        match &self.parsed {
            Ok(certificate) => certificate.subject().to_string(),
            Err(_) => self.error_line().unwrap_or_default(),
        }
    }

    /// Rendered issuer, or the error line.
    pub fn issuer_string(&self) -> String {
        match &self.parsed {
            Ok(certificate) => certificate.issuer().to_string(),
            Err(_) => self.error_line().unwrap_or_default(),
        }
    }

    pub fn not_after(&self) -> Option<DateTime<Utc>> {
        self.certificate().map(Certificate::not_after)
    }

    /// Errored entries never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.certificate()
            .is_some_and(|certificate| certificate.is_expired(now))
    }

    /// PEM text, `None` for errored entries.
    pub fn to_pem(&self) -> Option<String> {
        self.certificate()
            .and_then(|certificate| certificate.to_pem().ok())
    }

    pub fn kind(&self) -> Option<CertificateKind> {
        self.certificate().map(Certificate::kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certificates(Vec<CertificateEntry>);

impl Certificates {
    /// Reads every PEM block of `data`.
    ///
    /// Input without any PEM block is read as a single DER certificate when
    /// it starts like a DER SEQUENCE.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(data);
        let blocks = pem::parse_many(&text);
        if blocks.is_empty() {
            if data.first() == Some(&DER_SEQUENCE) {
                tracing::debug!("no PEM block found, reading input as DER");
                return Ok(Certificates(vec![CertificateEntry::new(1, data.to_vec())]));
            }
            return Err(Error::NoPemBlock);
        }
        tracing::debug!("found {} PEM blocks", blocks.len());
        let entries = blocks
            .into_iter()
            .enumerate()
            .map(|(i, block)| CertificateEntry::from_pem(i + 1, block))
            .collect();
        Ok(Certificates(entries))
    }

    /// Wraps DER certificates received from a peer, first one is position 1.
    pub fn from_der_chain<I>(ders: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let entries = ders
            .into_iter()
            .enumerate()
            .map(|(i, der)| CertificateEntry::new(i + 1, der))
            .collect();
        Certificates(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&CertificateEntry> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CertificateEntry> {
        self.0.iter()
    }

    pub fn remove_expired(self, now: DateTime<Utc>) -> Self {
        self.retain(|entry| !entry.is_expired(now))
    }

    /// Keeps the first of every identical certificate. Errored entries have
    /// no PEM and share the empty key, so only the first of them is kept.
    pub fn remove_duplicates(self) -> Self {
        let mut seen = HashSet::new();
        self.retain(|entry| seen.insert(entry.to_pem().unwrap_or_default()))
    }

    /// Case-sensitive substring match on the rendered subject.
    pub fn subject_like(self, subject: &str) -> Self {
        self.retain(|entry| entry.subject_string().contains(subject))
    }

    /// Case-sensitive substring match on the rendered issuer.
    pub fn issuer_like(self, issuer: &str) -> Self {
        self.retain(|entry| entry.issuer_string().contains(issuer))
    }

    /// Stable sort, soonest expiry first, errored entries last.
    pub fn sort_by_expiry(mut self) -> Self {
        self.0.sort_by(|a, b| compare_expiry(a.not_after(), b.not_after()));
        self
    }

    fn retain(mut self, f: impl FnMut(&CertificateEntry) -> bool) -> Self {
        self.0.retain(f);
        self
    }
}

pub(crate) fn compare_expiry(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl IntoIterator for Certificates {
    type Item = CertificateEntry;
    type IntoIter = std::vec::IntoIter<CertificateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Certificates {
    type Item = &'a CertificateEntry;
    type IntoIter = std::slice::Iter<'a, CertificateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<CertificateEntry> for Certificates {
    fn from_iter<T: IntoIterator<Item = CertificateEntry>>(iter: T) -> Self {
        Certificates(iter.into_iter().collect())
    }
}
