use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn certinfo() -> Command {
    let mut cmd = Command::cargo_bin("certinfo").unwrap();
    cmd.current_dir(data_dir()).write_stdin("");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_leaf_text() {
    certinfo()
        .arg("leaf.pem")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--- [leaf.pem] ---\nVersion: 3\n"))
        .stdout(predicate::str::contains("Serial Number: 10:01\n"))
        .stdout(predicate::str::contains("Type: end-entity\n"))
        .stdout(predicate::str::contains(
            "DNS Names: leaf.example.com, www.example.com\n",
        ))
        .stdout(predicate::str::contains("CA: false\n"))
        .stdout(predicate::str::contains("Extensions:").not());
}

#[test]
fn test_der_file() {
    certinfo()
        .arg("leaf.der")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Subject: CN=leaf.example.com,O=Certinfo,C=GB\n",
        ));
}

#[test]
fn test_extensions() {
    certinfo()
        .args(["leaf.pem", "--extensions"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Extensions:\n    Basic Constraints (2.5.29.19) [critical]\n        CA: false\n",
        ))
        .stdout(predicate::str::contains(
            "    Authority Information Access (1.3.6.1.5.5.7.1.1)\n        ocsp (1.3.6.1.5.5.7.48.1) - URI: http://ocsp.example.com\n",
        ))
        .stdout(predicate::str::contains(
            "        Distribution Point: URI: http://crl.example.com/root.crl\n",
        ));
}

#[test]
fn test_flags_from_env() {
    certinfo()
        .arg("root.pem")
        .env("CERTINFO_EXTENSIONS", "1")
        .env("CERTINFO_SIGNATURE", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extensions:\n"))
        .stdout(predicate::str::contains("Signature Value\n"));
}

#[test]
fn test_public_key() {
    certinfo()
        .args(["root.pem", "--public-key"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Public Key Algorithm: RSA\n    Public Key: (2048 bit)\n    Modulus\n",
        ))
        .stdout(predicate::str::contains("    Exponent: 65537\n"));
}

#[test]
fn test_expiry() {
    certinfo()
        .args(["expired.pem", "--expiry"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "--- [expired.pem] ---\nSubject: CN=expired.example.com\nExpiry: EXPIRED ",
        ))
        .stdout(predicate::str::contains(" ago\n\n"))
        .stdout(predicate::str::contains("Version:").not());
}

#[test]
fn test_no_expired() {
    certinfo()
        .args(["expired.pem", "--expiry", "--no-expired"])
        .assert()
        .success()
        .stdout("--- [expired.pem] ---\n");
}

#[test]
fn test_no_duplicate() {
    let all = stdout_of(certinfo().args(["bundle.pem", "--expiry"]));
    assert_eq!(2, all.matches("Subject: CN=leaf.example.com").count());

    let unique = stdout_of(certinfo().args(["bundle.pem", "--expiry", "--no-duplicate"]));
    assert_eq!(1, unique.matches("Subject: CN=leaf.example.com").count());
    assert_eq!(3, unique.matches("Subject: ").count());
}

#[test]
fn test_sort_expiry() {
    let text = stdout_of(certinfo().args(["bundle.pem", "--expiry", "--sort-expiry"]));
    let subjects: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("Subject: "))
        .collect();
    assert_eq!(
        vec![
            "CN=expired.example.com",
            "CN=leaf.example.com,O=Certinfo,C=GB",
            "CN=leaf.example.com,O=Certinfo,C=GB",
            "CN=Certinfo Test Root,O=Certinfo,C=GB",
        ],
        subjects
    );
}

#[test]
fn test_subject_and_issuer_like() {
    let text = stdout_of(certinfo().args(["bundle.pem", "--expiry", "--subject-like", "Root"]));
    assert_eq!(1, text.matches("Subject: ").count());
    assert!(text.contains("Subject: CN=Certinfo Test Root,O=Certinfo,C=GB\n"));

    let text = stdout_of(
        certinfo()
            .args(["bundle.pem", "--expiry"])
            .env("CERTINFO_ISSUER_LIKE", "Certinfo Test Root"),
    );
    assert_eq!(4, text.matches("Subject: ").count());

    let text = stdout_of(certinfo().args(["bundle.pem", "--expiry", "--issuer-like", "nobody"]));
    assert_eq!("--- [bundle.pem] ---\n", text);
}

#[test]
fn test_corrupted_block() {
    certinfo()
        .arg("corrupted.pem")
        .assert()
        .success()
        .stdout(predicate::str::contains("Subject: CN=Certinfo Test Root,O=Certinfo,C=GB\n"))
        .stdout(predicate::str::contains(
            "\nERROR: block at position 2: base64 decode: ",
        ))
        .stderr(predicate::str::contains("ERROR: block at position 2"));
}

#[test]
fn test_non_certificate_block() {
    certinfo()
        .arg("mixed.pem")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ERROR: block at position 1: cannot parse PRIVATE KEY block\n",
        ))
        .stdout(predicate::str::contains("Subject: CN=leaf.example.com,O=Certinfo,C=GB\n"));
}

#[rstest::rstest]
#[case("garbage.txt", "--- [garbage.txt: cannot find any PEM block] ---\n\n")]
#[case("missing.pem", "--- [missing.pem: ")]
fn test_failed_location(#[case] path: &str, #[case] expected: &str) {
    certinfo()
        .arg(path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(expected));
}

#[test]
fn test_locations_keep_argument_order() {
    let text = stdout_of(certinfo().args(["root.pem", "missing.pem", "leaf.pem", "--expiry"]));
    let headers: Vec<&str> = text.lines().filter(|line| line.starts_with("--- [")).collect();
    assert_eq!(3, headers.len());
    assert_eq!("--- [root.pem] ---", headers[0]);
    assert!(headers[1].starts_with("--- [missing.pem: "));
    assert_eq!("--- [leaf.pem] ---", headers[2]);
}

#[test]
fn test_pem() {
    certinfo()
        .args(["leaf.pem", "--pem"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CA: false\n\n-----BEGIN CERTIFICATE-----\n"))
        .stdout(predicate::str::ends_with("-----END CERTIFICATE-----\n\n"));
}

#[test]
fn test_pem_only() {
    let expected = std::fs::read_to_string(data_dir().join("leaf.pem")).unwrap();
    certinfo()
        .args(["leaf.der", "--pem-only"])
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn test_stdin() {
    let pem = std::fs::read_to_string(data_dir().join("root.pem")).unwrap();
    certinfo()
        .write_stdin(pem)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--- [stdin] ---\n"))
        .stdout(predicate::str::contains("Type: root\n"))
        .stdout(predicate::str::contains("CA: true\n"));
}

#[test]
fn test_stdin_after_arguments() {
    let pem = std::fs::read_to_string(data_dir().join("root.pem")).unwrap();
    let text = stdout_of(certinfo().arg("leaf.pem").arg("--expiry").write_stdin(pem));
    let headers: Vec<&str> = text.lines().filter(|line| line.starts_with("--- [")).collect();
    assert_eq!(vec!["--- [leaf.pem] ---", "--- [stdin] ---"], headers);
}

#[test]
fn test_json_output() {
    let text = stdout_of(certinfo().args(["bundle.pem", "missing.pem", "--output", "json"]));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let certificates = value[0]["certificates"].as_array().unwrap();
    assert_eq!(4, certificates.len());
    assert_eq!("root", certificates[2]["type"]);
    assert_eq!("2.5.29.19", certificates[0]["extensions"][0]["oid"]);
    assert_eq!("missing.pem", value[1]["name"]);
    assert!(value[1]["error"].is_string());
}

#[test]
fn test_yaml_output() {
    certinfo()
        .args(["leaf.pem", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: leaf.pem"))
        .stdout(predicate::str::contains("type: end-entity"));
}

#[test]
fn test_no_locations_prints_usage() {
    certinfo()
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Usage: certinfo [flags] [<file>|<host:port> ...]",
        ));
}

#[test]
fn test_version() {
    certinfo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("certinfo "));
}

#[test]
fn test_invalid_flag() {
    certinfo().arg("--no-such-flag").assert().failure().code(2);
}
