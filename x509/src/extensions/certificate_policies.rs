use asn1::ObjectIdentifier;
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Tag, Tlv};

use super::error::{Error, Kind, Result};
use super::registry::policy_name;
use super::{StandardExtension, expect_tag, labelled, read_value};

/*
RFC 5280 Section 4.2.1.4

CertificatePolicies ::= SEQUENCE SIZE (1..MAX) OF PolicyInformation

PolicyInformation ::= SEQUENCE {
    policyIdentifier   CertPolicyId,
    policyQualifiers   SEQUENCE SIZE (1..MAX) OF PolicyQualifierInfo OPTIONAL }

CertPolicyId ::= OBJECT IDENTIFIER

PolicyQualifierInfo ::= SEQUENCE {
    policyQualifierId  PolicyQualifierId,
    qualifier          ANY DEFINED BY policyQualifierId }
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificatePolicies {
    pub policies: Vec<PolicyInformation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyInformation {
    pub policy_identifier: ObjectIdentifier,
    pub policy_qualifiers: Vec<PolicyQualifierInfo>,
}

/// Qualifier with its value kept as raw DER; qualifiers are not displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyQualifierInfo {
    pub policy_qualifier_id: ObjectIdentifier,
    pub qualifier: Vec<u8>,
}

impl StandardExtension for CertificatePolicies {
    const OID: &'static str = "2.5.29.32";
    const NAME: &'static str = "Certificate Policies";

    fn parse(value: &[u8]) -> Result<Self> {
        let sequence = read_value(Kind::CertificatePolicies, value, Tag::SEQUENCE)?;
        let policies = sequence
            .children()
            .map(|policy| -> Result<PolicyInformation> { policy?.decode() })
            .collect::<Result<Vec<_>>>()?;
        Ok(CertificatePolicies { policies })
    }

    fn lines(&self) -> Vec<String> {
        self.policies
            .iter()
            .map(|policy| {
                let oid = &policy.policy_identifier;
                labelled(oid, policy_name(&oid.to_string()))
            })
            .collect()
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for PolicyInformation {}

impl<'a> Decoder<Tlv<'a>, PolicyInformation> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<PolicyInformation> {
        let sequence = expect_tag(Kind::CertificatePolicies, *self, Tag::SEQUENCE)?;
        let mut fields = sequence.children();
        let policy_identifier: ObjectIdentifier = fields
            .next()
            .ok_or(Error::MissingField(Kind::CertificatePolicies, "policyIdentifier"))??
            .decode()?;

        let mut policy_qualifiers = Vec::new();
        if let Some(qualifiers) = fields.next() {
            let qualifiers = expect_tag(Kind::CertificatePolicies, qualifiers?, Tag::SEQUENCE)?;
            for qualifier in qualifiers.children() {
                let qualifier: PolicyQualifierInfo = qualifier?.decode()?;
                policy_qualifiers.push(qualifier);
            }
        }
        Ok(PolicyInformation {
            policy_identifier,
            policy_qualifiers,
        })
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for PolicyQualifierInfo {}

impl<'a> Decoder<Tlv<'a>, PolicyQualifierInfo> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<PolicyQualifierInfo> {
        let sequence = expect_tag(Kind::CertificatePolicies, *self, Tag::SEQUENCE)?;
        let mut fields = sequence.children();
        let policy_qualifier_id: ObjectIdentifier = fields
            .next()
            .ok_or(Error::MissingField(Kind::CertificatePolicies, "policyQualifierId"))??
            .decode()?;
        let qualifier = match fields.next() {
            Some(qualifier) => qualifier?.to_der(),
            None => Vec::new(),
        };
        Ok(PolicyQualifierInfo {
            policy_qualifier_id,
            qualifier,
        })
    }
}
