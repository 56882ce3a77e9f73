use std::io::{self, Write};

use x509::format::{hex_array, split_string, validity_time};
use x509::{Certificate, CertificateEntry, CertificateLocations};

/// Optional sections of the text layout.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PrintOptions {
    pub(crate) pem: bool,
    pub(crate) extensions: bool,
    pub(crate) public_key: bool,
    pub(crate) signature: bool,
}

pub(crate) fn locations(
    out: &mut impl Write,
    locations: &CertificateLocations,
    options: PrintOptions,
) -> io::Result<()> {
    for location in locations {
        let Some(certificates) = location.certificates() else {
            let error = location.error().unwrap_or_default();
            tracing::error!("{}: {}", location.name(), error);
            writeln!(out, "--- [{}: {}] ---", location.name(), error)?;
            writeln!(out)?;
            continue;
        };

        writeln!(out, "--- [{}] ---", location.name())?;
        for entry in certificates {
            entry_text(out, entry, options)?;
            writeln!(out)?;
            if options.pem {
                writeln!(out, "{}", entry.to_pem().unwrap_or_default())?;
            }
        }
    }
    Ok(())
}

/// Prints the PEM of every certificate and nothing else.
pub(crate) fn pem_only(out: &mut impl Write, locations: &CertificateLocations) -> io::Result<()> {
    let entries = locations
        .iter()
        .filter_map(|location| location.certificates())
        .flat_map(|certificates| certificates.iter());
    for entry in entries {
        if let Some(pem) = entry.to_pem() {
            write!(out, "{}", pem)?;
        }
    }
    Ok(())
}

fn entry_text(out: &mut impl Write, entry: &CertificateEntry, options: PrintOptions) -> io::Result<()> {
    match entry.certificate() {
        Some(certificate) => certificate_text(out, certificate, entry.position(), options),
        None => {
            let line = entry.error_line().unwrap_or_default();
            tracing::error!("{}", line);
            writeln!(out, "{}", line)
        }
    }
}

fn certificate_text(
    out: &mut impl Write,
    certificate: &Certificate,
    position: usize,
    options: PrintOptions,
) -> io::Result<()> {
    let ip_addresses: Vec<String> = certificate
        .ip_addresses()
        .iter()
        .map(ToString::to_string)
        .collect();

    writeln!(out, "Version: {}", certificate.version())?;
    writeln!(out, "Serial Number: {}", certificate.serial_number_hex())?;
    writeln!(out, "Signature Algorithm: {}", certificate.signature_algorithm().signature_name())?;
    writeln!(out, "Type: {}", certificate.kind())?;
    writeln!(out, "Issuer: {}", certificate.issuer())?;
    writeln!(out, "Validity")?;
    writeln!(out, "    Not Before: {}", validity_time(&certificate.not_before()))?;
    writeln!(out, "    Not After : {}", validity_time(&certificate.not_after()))?;
    writeln!(out, "Subject: {}", certificate.subject())?;
    writeln!(out, "DNS Names: {}", certificate.dns_names().join(", "))?;
    writeln!(out, "IP Addresses: {}", ip_addresses.join(", "))?;
    writeln!(
        out,
        "Authority Key Id: {}",
        hex_array(&certificate.authority_key_id().unwrap_or_default())
    )?;
    writeln!(out, "Subject Key")?;
    writeln!(
        out,
        "    Id       : {}",
        hex_array(&certificate.subject_key_id().unwrap_or_default())
    )?;
    writeln!(out, "    Algorithm: {}", certificate.public_key_algorithm())?;
    writeln!(out, "Key Usage: {}", certificate.key_usage_names().join(", "))?;
    writeln!(out, "Ext Key Usage: {}", certificate.ext_key_usage_names().join(", "))?;
    writeln!(out, "CA: {}", certificate.is_ca())?;

    if options.extensions {
        writeln!(out, "Extensions:")?;
        for extension in certificate.extensions(position) {
            writeln!(out, "    {}", extension.title())?;
            for value in &extension.values {
                writeln!(out, "        {}", value)?;
            }
        }
    }

    if options.public_key {
        writeln!(out, "{}", certificate.subject_public_key_info().describe())?;
    }

    if options.signature {
        writeln!(out, "Signature Algorithm: {}", certificate.signature_algorithm().signature_name())?;
        writeln!(out, "Signature Value")?;
        for line in split_string(&certificate.signature_hex(), "    ", 54) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}
