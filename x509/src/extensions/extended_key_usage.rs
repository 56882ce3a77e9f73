use asn1::ObjectIdentifier;
use certinfo::decoder::Decoder;
use der::Tag;

use super::error::{Kind, Result};
use super::registry::key_purpose_name;
use super::{StandardExtension, labelled, read_value};

/*
RFC 5280 Section 4.2.1.12
ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
KeyPurposeId ::= OBJECT IDENTIFIER
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedKeyUsage {
    pub purposes: Vec<ObjectIdentifier>,
}

impl ExtendedKeyUsage {
    /// Names used in the certificate summary. Purposes without a name are
    /// left out.
    pub fn usage_names(&self) -> Vec<&'static str> {
        self.purposes
            .iter()
            .filter_map(|oid| summary_name(&oid.to_string()))
            .collect()
    }
}

fn summary_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "2.5.29.37.0" => "Any",
        "1.3.6.1.5.5.7.3.1" => "Server Auth",
        "1.3.6.1.5.5.7.3.2" => "Client Auth",
        "1.3.6.1.5.5.7.3.3" => "Code Signing",
        "1.3.6.1.5.5.7.3.4" => "Email Protection",
        "1.3.6.1.5.5.7.3.5" => "IPSEC End System",
        "1.3.6.1.5.5.7.3.6" => "IPSEC Tunnel",
        "1.3.6.1.5.5.7.3.7" => "IPSEC User",
        "1.3.6.1.5.5.7.3.8" => "Time Stamping",
        "1.3.6.1.5.5.7.3.9" => "OCSP Signing",
        "1.3.6.1.4.1.311.10.3.3" => "Microsoft Server Gated Crypto",
        "2.16.840.1.113730.4.1" => "Netscape Server Gated Crypto",
        "1.3.6.1.4.1.311.2.1.22" => "Microsoft Commercial Code Signing",
        "1.3.6.1.4.1.311.61.1.1" => "Microsoft Kernel Code Signing",
        _ => return None,
    };
    Some(name)
}

impl StandardExtension for ExtendedKeyUsage {
    const OID: &'static str = "2.5.29.37";
    const NAME: &'static str = "Extended Key Usage";

    fn parse(value: &[u8]) -> Result<Self> {
        let sequence = read_value(Kind::ExtendedKeyUsage, value, Tag::SEQUENCE)?;
        let purposes = sequence
            .children()
            .map(|purpose| -> Result<ObjectIdentifier> { Ok(purpose?.decode()?) })
            .collect::<Result<Vec<_>>>()?;
        Ok(ExtendedKeyUsage { purposes })
    }

    fn lines(&self) -> Vec<String> {
        self.purposes
            .iter()
            .map(|oid| labelled(oid, key_purpose_name(&oid.to_string())))
            .collect()
    }
}
