//! OID to label tables used by the extension renderers.

/// Certificate policy labels.
pub fn policy_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "2.5.29.32.0" => "any policy",
        "2.5.29.32.2" => "ldap",
        "2.23.140.1.1" => "ev guidelines",
        // CA/Browser Forum baseline requirements
        "2.23.140.1.2.1" => "domain validated",
        "2.23.140.1.2.2" => "organization validated",
        "2.23.140.1.2.3" => "individual validated",
        "2.23.140.1.3" => "extended-validation codesigning",
        "2.23.140.1.4.1" => "code signing",
        "2.23.140.1.4.2" => "timestamping",
        // S/MIME
        "2.23.140.1.5.1" => "mailbox validated",
        "2.23.140.1.5.2" => "organization validated",
        "2.23.140.1.5.3" => "sponsor validated",
        "2.23.140.1.5.4" => "individual validated",
        "2.23.140.31" => "onion-ev",
        // Google Trust Services
        "1.3.6.1.4.1.11129.2.5.3.1" => "signed http exchanges",
        "1.3.6.1.4.1.11129.2.5.3.2" => "client authentication",
        "1.3.6.1.4.1.11129.2.5.3.3" => "document signing",
        _ => return None,
    };
    Some(name)
}

/// Extended key usage labels (id-kp arc).
pub fn key_purpose_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "1.3.6.1.5.5.7.3.1" => "server auth",
        "1.3.6.1.5.5.7.3.2" => "client auth",
        "1.3.6.1.5.5.7.3.3" => "code signing",
        "1.3.6.1.5.5.7.3.4" => "email protection",
        "1.3.6.1.5.5.7.3.5" => "ipsec end system",
        "1.3.6.1.5.5.7.3.6" => "ipsec tunnel",
        "1.3.6.1.5.5.7.3.7" => "ipsec user",
        "1.3.6.1.5.5.7.3.8" => "time stamping",
        "1.3.6.1.5.5.7.3.9" => "OCSP signing",
        _ => return None,
    };
    Some(name)
}

/// Access method labels (id-ad arc).
pub fn access_method_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "1.3.6.1.5.5.7.48.1" => "ocsp",
        "1.3.6.1.5.5.7.48.2" => "ca issuers",
        "1.3.6.1.5.5.7.48.3" => "time stamping",
        "1.3.6.1.5.5.7.48.4" => "dvcs",
        "1.3.6.1.5.5.7.48.5" => "ca repository",
        "1.3.6.1.5.5.7.48.6" => "http certs",
        "1.3.6.1.5.5.7.48.7" => "http crls",
        "1.3.6.1.5.5.7.48.8" => "xkms",
        "1.3.6.1.5.5.7.48.9" => "signed object repository",
        "1.3.6.1.5.5.7.48.10" => "rpki manifest",
        "1.3.6.1.5.5.7.48.11" => "signed object",
        "1.3.6.1.5.5.7.48.12" => "cmc",
        "1.3.6.1.5.5.7.48.13" => "rpki notify",
        "1.3.6.1.5.5.7.48.14" => "stir tn list",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2.23.140.1.2.1", Some("domain validated"))]
    #[case("2.23.140.1.5.2", Some("organization validated"))]
    #[case("1.3.6.1.4.1.11129.2.5.3.3", Some("document signing"))]
    #[case("2.23.140.1.2", None)]
    fn test_policy_name(#[case] oid: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected, policy_name(oid));
    }

    #[rstest]
    #[case("1.3.6.1.5.5.7.3.1", Some("server auth"))]
    #[case("1.3.6.1.5.5.7.3.9", Some("OCSP signing"))]
    #[case("1.3.6.1.5.5.7.3.17", None)]
    fn test_key_purpose_name(#[case] oid: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected, key_purpose_name(oid));
    }

    #[rstest]
    #[case("1.3.6.1.5.5.7.48.1", Some("ocsp"))]
    #[case("1.3.6.1.5.5.7.48.14", Some("stir tn list"))]
    #[case("1.3.6.1.5.5.7.48.15", None)]
    fn test_access_method_name(#[case] oid: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected, access_method_name(oid));
    }
}
