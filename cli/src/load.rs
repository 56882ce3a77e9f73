use std::fs;
use std::io::{self, IsTerminal, Read};
use std::thread;

use x509::{CertificateLocation, CertificateLocations, Certificates};

use crate::tls;

/// Where certificates are fetched from and how.
pub(crate) struct LoadOptions<'a> {
    pub(crate) server_name: Option<&'a str>,
    pub(crate) insecure: bool,
}

/// `host:port` with a numeric port is fetched over TLS, anything else is a
/// file path.
pub(crate) fn is_network_address(arg: &str) -> bool {
    let parts: Vec<&str> = arg.split(':').collect();
    parts.len() == 2 && parts[1].parse::<u16>().is_ok()
}

/// Loads every argument concurrently, keeping argument order, then appends
/// stdin when it is piped and not empty.
pub(crate) fn load_locations(args: &[String], options: &LoadOptions<'_>) -> CertificateLocations {
    let mut locations = load_args(args, options);
    if !io::stdin().is_terminal() {
        if let Some(location) = load_stdin() {
            locations.push(location);
        }
    }
    locations.into_iter().collect()
}

fn load_args(args: &[String], options: &LoadOptions<'_>) -> Vec<CertificateLocation> {
    thread::scope(|scope| {
        let handles: Vec<_> = args
            .iter()
            .map(|arg| (arg, scope.spawn(move || load(arg, options))))
            .collect();
        handles
            .into_iter()
            .map(|(arg, handle)| {
                handle
                    .join()
                    .unwrap_or_else(|_| CertificateLocation::failed(arg.as_str(), "loader panicked"))
            })
            .collect()
    })
}

fn load(arg: &str, options: &LoadOptions<'_>) -> CertificateLocation {
    if is_network_address(arg) {
        load_network(arg, options)
    } else {
        load_file(arg)
    }
}

fn load_file(path: &str) -> CertificateLocation {
    match fs::read(path) {
        Ok(data) => parse(path, &data),
        Err(err) => {
            tracing::error!("load certificate from file {}: {}", path, err);
            CertificateLocation::failed(path, err)
        }
    }
}

fn load_stdin() -> Option<CertificateLocation> {
    let mut data = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut data) {
        tracing::error!("load certificate from stdin: {}", err);
        return Some(CertificateLocation::failed("stdin", err));
    }
    if data.trim_ascii().is_empty() {
        tracing::debug!("stdin is empty");
        return None;
    }
    Some(parse("stdin", &data))
}

fn load_network(addr: &str, options: &LoadOptions<'_>) -> CertificateLocation {
    match tls::fetch_peer_certificates(addr, options.server_name, options.insecure) {
        Ok(peer) => {
            let location =
                CertificateLocation::new(addr, Certificates::from_der_chain(peer.certificates));
            match peer.tls_version {
                Some(version) => location.with_tls_version(version),
                None => location,
            }
        }
        Err(err) => {
            tracing::error!("load certificate from network {}: {}", addr, err);
            CertificateLocation::failed(addr, err)
        }
    }
}

fn parse(name: &str, data: &[u8]) -> CertificateLocation {
    match Certificates::from_bytes(data.trim_ascii()) {
        Ok(certificates) => CertificateLocation::new(name, certificates),
        Err(err) => {
            tracing::error!("parse certificate {} bytes: {}", name, err);
            CertificateLocation::failed(name, err)
        }
    }
}
