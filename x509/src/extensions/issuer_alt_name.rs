use super::StandardExtension;
use super::error::Result;
use super::general_name::{GeneralName, decode_general_names, group_general_names};

/*
RFC 5280 Section 4.2.1.7
IssuerAltName ::= GeneralNames
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerAltName {
    pub names: Vec<GeneralName>,
}

impl StandardExtension for IssuerAltName {
    const OID: &'static str = "2.5.29.18";
    const NAME: &'static str = "Issuer Alt. Name";

    fn parse(value: &[u8]) -> Result<Self> {
        Ok(IssuerAltName {
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
    fn test_issuer_alt_name() {
        let content = [
            der::encode(Tag::context(1, false), b"ca@example.com"),
            der::encode(Tag::context(6, false), b"http://example.com/ca"),
        ]
        .concat();
        let ian = IssuerAltName::parse(&der::encode(Tag::SEQUENCE, &content)).unwrap();
        assert_eq!(
            vec!["Rfc822 Name: ca@example.com", "URI: http://example.com/ca"],
            ian.lines()
        );
    }
}
