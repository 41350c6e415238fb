use crate::model::{Severity, Vulnerability};
use serde_json::json;

/// Structural inspection of a bearer credential that is expected to be
/// a JWT.
///
/// This never validates the signature or any payload claim; it only
/// checks the token shape and the declared algorithm. Findings come
/// back in check order and the caller appends them to the scan as-is.
pub fn inspect_bearer_token(token: &str) -> Vec<Vulnerability> {
    let mut findings = Vec::new();

    let segments: Vec<&str> = token.split('.').filter(|s| !s.is_empty()).collect();
    if segments.len() < 3 {
        findings.push(
            Vulnerability::new(
                "JWT-001",
                "Invalid JWT Format",
                format!(
                    "Bearer token has {} segment(s), a JWT requires header, payload and signature",
                    segments.len()
                ),
                Severity::High,
                "Issue well-formed JWTs; malformed tokens suggest a broken or homemade auth layer",
            )
            .with_cwe("CWE-345"),
        );
        return findings;
    }

    match decode_base64url(segments[0]).and_then(|h| serde_json::from_str::<serde_json::Value>(&h).ok()) {
        Some(header) => {
            if header["alg"] == json!("none") {
                findings.push(
                    Vulnerability::new(
                        "JWT-002",
                        "Insecure JWT Algorithm",
                        "JWT header declares the 'none' algorithm, so the signature is never verified",
                        Severity::Critical,
                        "Reject unsigned tokens and pin the accepted algorithm list server-side",
                    )
                    .with_cwe("CWE-327")
                    .with_details(json!({ "header": header })),
                );
            }
        }
        None => {
            findings.push(
                Vulnerability::new(
                    "JWT-003",
                    "JWT Parsing Error",
                    "JWT header segment is not base64-encoded JSON",
                    Severity::Medium,
                    "Verify the token is a standards-compliant JWT with a JSON header",
                )
                .with_cwe("CWE-345"),
            );
        }
    }

    findings
}

/// Decode a base64url segment, tolerating missing padding.
fn decode_base64url(input: &str) -> Option<String> {
    use base64::{engine::general_purpose, Engine as _};

    // Base64url to standard base64
    let base64 = input.replace('-', "+").replace('_', "/");

    // Add padding
    let padding = (4 - base64.len() % 4) % 4;
    let padded = format!("{}{}", base64, "=".repeat(padding));

    general_purpose::STANDARD
        .decode(&padded)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose, Engine as _};

    fn b64(s: &str) -> String {
        general_purpose::URL_SAFE_NO_PAD.encode(s)
    }

    #[test]
    fn two_segments_is_invalid_format() {
        let findings = inspect_bearer_token("abc.def");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "JWT-001");
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn empty_segment_counts_as_missing() {
        let findings = inspect_bearer_token("abc..ghi");
        assert_eq!(findings[0].id, "JWT-001");
    }

    #[test]
    fn none_algorithm_is_critical() {
        let token = format!("{}.{}.sig", b64(r#"{"alg":"none"}"#), b64(r#"{"sub":"1"}"#));
        let findings = inspect_bearer_token(&token);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "JWT-002");
        assert_eq!(findings[0].severity, Severity::Critical);
    }

    #[test]
    fn signed_algorithm_is_clean() {
        let token = format!("{}.{}.sig", b64(r#"{"alg":"RS256"}"#), b64(r#"{"sub":"1"}"#));
        assert!(inspect_bearer_token(&token).is_empty());
    }

    #[test]
    fn garbage_header_is_parsing_error() {
        let findings = inspect_bearer_token("!!notbase64!!.def.ghi");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "JWT-003");
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[test]
    fn padded_segments_still_decode() {
        // 25-byte header JSON encodes with trailing '=' that base64url
        // tokens strip; the decoder must re-pad.
        let json = r#"{"alg":"HS384","kid":"k"}"#;
        let header = general_purpose::STANDARD.encode(json);
        assert!(header.ends_with('='));
        let token = format!("{}.{}.sig", header.trim_end_matches('='), b64("{}"));
        assert!(inspect_bearer_token(&token).is_empty());
    }
}
