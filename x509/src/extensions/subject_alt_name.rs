use std::net::IpAddr;

use super::StandardExtension;
use super::error::Result;
use super::general_name::{GeneralName, decode_general_names, group_general_names};

/*
RFC 5280 Section 4.2.1.6
SubjectAltName ::= GeneralNames
GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAltName {
    pub names: Vec<GeneralName>,
}

impl SubjectAltName {
    pub fn dns_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter_map(|name| match name {
                GeneralName::DnsName(dns) => Some(dns.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn ip_addresses(&self) -> Vec<IpAddr> {
        self.names.iter().filter_map(GeneralName::ip_addr).collect()
    }
}

impl StandardExtension for SubjectAltName {
    const OID: &'static str = "2.5.29.17";
    const NAME: &'static str = "Subject Alt. Name";

    fn parse(value: &[u8]) -> Result<Self> {
        Ok(SubjectAltName {
            names: decode_general_names(value)?,
        })
    }

    fn lines(&self) -> Vec<String> {
        group_general_names(&self.names)
    }
}

#[cfg(test)]
mod tests {
    use der::Tag;

    use super::*;

    #[test]
    fn test_subject_alt_name() {
        let content = [
            der::encode(Tag::context(2, false), b"example.com"),
            der::encode(Tag::context(7, false), &[127, 0, 0, 1]),
            der::encode(Tag::context(2, false), b"www.example.com"),
        ]
        .concat();
        let san = SubjectAltName::parse(&der::encode(Tag::SEQUENCE, &content)).unwrap();
        assert_eq!(vec!["example.com", "www.example.com"], san.dns_names());
        assert_eq!(vec!["127.0.0.1".parse::<IpAddr>().unwrap()], san.ip_addresses());
        assert_eq!(
            vec![
                "DNS Name: example.com, www.example.com",
                "IP Address: \u{7f}\0\0\u{1}",
            ],
            san.lines()
        );
    }

    #[test]
    fn test_subject_alt_name_empty() {
        let san = SubjectAltName::parse(&[0x30, 0x00]).unwrap();
        assert!(san.lines().is_empty());
        assert!(san.dns_names().is_empty());
    }
}
