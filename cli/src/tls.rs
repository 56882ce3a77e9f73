//! Peer certificate retrieval from TLS endpoints.

use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, ring};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, ClientConnection, DigitallySignedStruct, RootCertStore, SignatureScheme, StreamOwned};

use crate::error::{Error, Result};

pub(crate) const TIMEOUT: Duration = Duration::from_secs(5);

/// What the server presented during the handshake.
pub(crate) struct PeerCertificates {
    pub(crate) certificates: Vec<Vec<u8>>,
    pub(crate) tls_version: Option<u16>,
}

/// Accepts any server certificate, used with `--insecure`.
#[derive(Debug)]
struct NoVerifier(Arc<CryptoProvider>);

impl ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

fn native_roots() -> RootCertStore {
    let loaded = rustls_native_certs::load_native_certs();
    for err in &loaded.errors {
        tracing::warn!("load native certificates: {}", err);
    }
    let mut roots = RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(loaded.certs);
    tracing::debug!("loaded {} native roots, ignored {}", added, ignored);
    roots
}

fn build_config(insecure: bool) -> Result<ClientConfig> {
    let provider = Arc::new(ring::default_provider());
    let builder = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()?;
    let config = if insecure {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier(provider)))
            .with_no_client_auth()
    } else {
        builder
            .with_root_certificates(native_roots())
            .with_no_client_auth()
    };
    Ok(config)
}

fn connect(addr: &str) -> Result<TcpStream> {
    let mut last_error = None;
    for socket in addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&socket, TIMEOUT) {
            Ok(stream) => {
                stream.set_read_timeout(Some(TIMEOUT))?;
                stream.set_write_timeout(Some(TIMEOUT))?;
                return Ok(stream);
            }
            Err(err) => last_error = Some(err),
        }
    }
    Err(last_error
        .unwrap_or_else(|| std::io::Error::other(format!("{} did not resolve", addr)))
        .into())
}

/// Completes a handshake with `addr` (`host:port`) and returns the peer's
/// certificates in the order they were sent.
///
/// `server_name` overrides the host part for SNI and verification.
pub(crate) fn fetch_peer_certificates(
    addr: &str,
    server_name: Option<&str>,
    insecure: bool,
) -> Result<PeerCertificates> {
    let host = server_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| addr.rsplit_once(':').map_or(addr, |(host, _)| host));
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let name = ServerName::try_from(host.to_string())
        .map_err(|_| Error::InvalidServerName(host.to_string()))?;

    let config = build_config(insecure)?;
    let tcp = connect(addr)?;
    let conn = ClientConnection::new(Arc::new(config), name)?;
    let mut stream = StreamOwned::new(conn, tcp);
    tracing::debug!("tls handshake with {} as {}", addr, host);
    stream.flush()?;

    let certificates: Vec<Vec<u8>> = stream
        .conn
        .peer_certificates()
        .ok_or_else(|| Error::NoCertificatesReceived(addr.to_string()))?
        .iter()
        .map(|certificate| certificate.as_ref().to_vec())
        .collect();
    let tls_version = stream.conn.protocol_version().map(u16::from);
    tracing::debug!(
        "received {} certificates from {} ({:?})",
        certificates.len(),
        addr,
        tls_version
    );

    stream.conn.send_close_notify();
    if let Err(err) = stream.flush() {
        tracing::debug!("close {}: {}", addr, err);
    }

    Ok(PeerCertificates {
        certificates,
        tls_version,
    })
}
