use chrono::{DateTime, Utc};

use crate::bundle::{Certificates, compare_expiry};

/// Certificates loaded from one file, stdin or TLS endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateLocation {
    path: String,
    /// Negotiated protocol version, network locations only.
    tls_version: Option<u16>,
    outcome: Result<Certificates, String>,
}

impl CertificateLocation {
    pub fn new(path: impl Into<String>, certificates: Certificates) -> Self {
        CertificateLocation {
            path: path.into(),
            tls_version: None,
            outcome: Ok(certificates),
        }
    }

    pub fn failed(path: impl Into<String>, error: impl ToString) -> Self {
        CertificateLocation {
            path: path.into(),
            tls_version: None,
            outcome: Err(error.to_string()),
        }
    }

    pub fn with_tls_version(mut self, version: u16) -> Self {
        self.tls_version = Some(version);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tls_version(&self) -> Option<u16> {
        self.tls_version
    }

    pub fn certificates(&self) -> Option<&Certificates> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }

    /// Path followed by the TLS version label when one was negotiated.
    pub fn name(&self) -> String {
        match self.tls_version {
            None | Some(0) => self.path.clone(),
            Some(version) => format!("{} {}", self.path, tls_format(version)),
        }
    }

    pub fn remove_expired(self, now: DateTime<Utc>) -> Self {
        self.map(|certificates| certificates.remove_expired(now))
    }

    pub fn remove_duplicates(self) -> Self {
        self.map(Certificates::remove_duplicates)
    }

    pub fn subject_like(self, subject: &str) -> Self {
        self.map(|certificates| certificates.subject_like(subject))
    }

    pub fn issuer_like(self, issuer: &str) -> Self {
        self.map(|certificates| certificates.issuer_like(issuer))
    }

    pub fn sort_by_expiry(self) -> Self {
        self.map(Certificates::sort_by_expiry)
    }

    fn map(mut self, f: impl FnOnce(Certificates) -> Certificates) -> Self {
        self.outcome = self.outcome.map(f);
        self
    }

    fn first_expiry(&self) -> Option<DateTime<Utc>> {
        self.certificates()
            .and_then(Certificates::first)
            .and_then(|entry| entry.not_after())
    }
}

/// Label of a TLS protocol version number as sent on the wire.
pub fn tls_format(version: u16) -> String {
    let label = match version {
        0x0300 => "SSLv3 - Deprecated!",
        0x0301 => "TLS 1.0 - Deprecated!",
        0x0302 => "TLS 1.1 - Deprecated!",
        0x0303 => "TLS 1.2",
        0x0304 => "TLS 1.3",
        _ => return format!("TLS Version {} (unknown)", version),
    };
    label.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateLocations(Vec<CertificateLocation>);

impl CertificateLocations {
    pub fn iter(&self) -> std::slice::Iter<'_, CertificateLocation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn remove_expired(self, now: DateTime<Utc>) -> Self {
        self.map(|location| location.remove_expired(now))
    }

    pub fn remove_duplicates(self) -> Self {
        self.map(CertificateLocation::remove_duplicates)
    }

    pub fn subject_like(self, subject: &str) -> Self {
        self.map(|location| location.subject_like(subject))
    }

    pub fn issuer_like(self, issuer: &str) -> Self {
        self.map(|location| location.issuer_like(issuer))
    }

    /// Sorts every location, then orders locations by the expiry of their
    /// first certificate. Locations without certificates go last.
    pub fn sort_by_expiry(self) -> Self {
        let mut sorted = self.map(CertificateLocation::sort_by_expiry);
        sorted
            .0
            .sort_by(|a, b| compare_expiry(a.first_expiry(), b.first_expiry()));
        sorted
    }

    fn map(self, f: impl FnMut(CertificateLocation) -> CertificateLocation) -> Self {
        CertificateLocations(self.0.into_iter().map(f).collect())
    }
}

impl FromIterator<CertificateLocation> for CertificateLocations {
    fn from_iter<T: IntoIterator<Item = CertificateLocation>>(iter: T) -> Self {
        CertificateLocations(iter.into_iter().collect())
    }
}

impl IntoIterator for CertificateLocations {
    type Item = CertificateLocation;
    type IntoIter = std::vec::IntoIter<CertificateLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CertificateLocations {
    type Item = &'a CertificateLocation;
    type IntoIter = std::slice::Iter<'a, CertificateLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
