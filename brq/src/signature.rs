//! Message signing for the Buckaroo NVP protocol.
//!
//! A signature is the lower-case hex SHA-1 digest of
//!
//! ```text
//! canonical(fields) || secret
//! ```
//!
//! where `canonical` drops the `brq_signature` field, orders the rest by
//! case-insensitive name and concatenates `name=value` with no separator.
//! The gateway computes the same string on its side. SHA-1 is fixed by the
//! protocol.

use sha1::{Digest, Sha1};

use crate::error::SignatureError;
use crate::fields::{FieldMap, normalize};
use crate::wire;

/// Returns `true` if `name` is the signature field in any casing.
#[must_use]
pub fn is_signature_field(name: &str) -> bool {
    normalize(name) == wire::SIGNATURE
}

/// Produces the signing input for `fields`, without the secret.
#[must_use]
pub fn canonicalize(fields: &FieldMap) -> String {
    let mut canonical = String::new();
    for (key, name, value) in fields.entries() {
        if key == wire::SIGNATURE {
            continue;
        }
        canonical.push_str(name);
        canonical.push('=');
        canonical.push_str(value);
    }
    canonical
}

/// Computes the signature of `fields` under `secret`.
///
/// Any signature field already present is ignored.
///
/// # Errors
///
/// Returns [`SignatureError::EmptySecret`] if `secret` is empty.
pub fn sign(fields: &FieldMap, secret: &str) -> Result<String, SignatureError> {
    if secret.is_empty() {
        return Err(SignatureError::EmptySecret);
    }
    let mut hasher = Sha1::new();
    hasher.update(canonicalize(fields).as_bytes());
    hasher.update(secret.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Returns a copy of `fields` carrying a fresh `brq_signature`.
///
/// # Errors
///
/// Returns [`SignatureError::EmptySecret`] if `secret` is empty.
pub fn signed(fields: &FieldMap, secret: &str) -> Result<FieldMap, SignatureError> {
    let signature = sign(fields, secret)?;
    let mut signed = fields.without(wire::SIGNATURE);
    signed.insert(wire::SIGNATURE, signature);
    Ok(signed)
}

/// Checks the signature carried by `fields` against `secret`.
///
/// Comparison is exact, so an upper-cased digest does not verify. A field set
/// without a signature is reported as invalid rather than as an error.
///
/// # Errors
///
/// Returns [`SignatureError::EmptySecret`] if `secret` is empty.
pub fn verify(fields: &FieldMap, secret: &str) -> Result<bool, SignatureError> {
    let computed = sign(fields, secret)?;
    Ok(fields
        .get(wire::SIGNATURE)
        .is_some_and(|signature| signature == computed))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "ABC123";

    fn sha1_hex(input: &str) -> String {
        hex::encode(Sha1::digest(input.as_bytes()))
    }

    fn sample() -> FieldMap {
        FieldMap::new()
            .with("brq_websitekey", "KEY")
            .with("brq_amount", "10.00")
            .with("brq_currency", "EUR")
            .with("brq_invoicenumber", "INV-1")
    }

    #[test]
    fn test_canonicalize_sorts_case_insensitively() {
        let fields = FieldMap::new()
            .with("brq_websitekey", "KEY")
            .with("BRQ_AMOUNT", "10.00")
            .with("brq_Currency", "EUR");
        assert_eq!(
            canonicalize(&fields),
            "BRQ_AMOUNT=10.00brq_Currency=EURbrq_websitekey=KEY"
        );
    }

    #[test]
    fn test_canonicalize_ignores_insertion_order() {
        let forward = FieldMap::from_pairs([("a", "1"), ("B", "2"), ("c", "3")]).unwrap();
        let backward = FieldMap::from_pairs([("c", "3"), ("B", "2"), ("a", "1")]).unwrap();
        assert_eq!(canonicalize(&forward), canonicalize(&backward));
        assert_eq!(canonicalize(&forward), "a=1B=2c=3");
    }

    #[test]
    fn test_canonicalize_excludes_signature_in_any_casing() {
        let expected = canonicalize(&sample());
        for name in ["brq_signature", "BRQ_SIGNATURE", "Brq_Signature"] {
            let fields = sample().with(name, "deadbeef");
            assert_eq!(canonicalize(&fields), expected, "{name}");
        }
        assert!(is_signature_field("BRQ_Signature"));
        assert!(!is_signature_field("brq_signature2"));
    }

    #[test]
    fn test_sign_known_vector() {
        // canonical form of an empty set is empty, so this is SHA-1("abc")
        assert_eq!(
            sign(&FieldMap::new(), "abc").unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        let only_signature = FieldMap::new().with("BRQ_SIGNATURE", "ignored");
        assert_eq!(
            sign(&only_signature, "abc").unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_sign_appends_secret_to_canonical_form() {
        let fields = sample();
        let expected = sha1_hex(&format!("{}{SECRET}", canonicalize(&fields)));
        assert_eq!(sign(&fields, SECRET).unwrap(), expected);
    }

    #[test]
    fn test_sign_is_deterministic_and_sensitive() {
        let base = sign(&sample(), SECRET).unwrap();
        assert_eq!(base, sign(&sample(), SECRET).unwrap());
        assert_ne!(base, sign(&sample().with("brq_amount", "10.01"), SECRET).unwrap());
        assert_ne!(base, sign(&sample(), "ABC124").unwrap());
        assert_eq!(base.len(), 40);
        assert!(base.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert_eq!(sign(&sample(), ""), Err(SignatureError::EmptySecret));
        assert_eq!(verify(&sample(), ""), Err(SignatureError::EmptySecret));
        assert_eq!(signed(&sample(), ""), Err(SignatureError::EmptySecret));
    }

    #[test]
    fn test_signed_then_verify() {
        let fields = signed(&sample(), SECRET).unwrap();
        assert!(verify(&fields, SECRET).unwrap());
        assert!(!verify(&fields, "other").unwrap());
    }

    #[test]
    fn test_signed_replaces_existing_signature() {
        let fields = signed(&sample().with("BRQ_SIGNATURE", "stale"), SECRET).unwrap();
        assert_eq!(fields.len(), sample().len() + 1);
        assert_eq!(fields.original_name("brq_signature"), Some("brq_signature"));
        assert!(verify(&fields, SECRET).unwrap());
    }

    #[test]
    fn test_verify_with_uppercase_signature_name() {
        let signature = sign(&sample(), SECRET).unwrap();
        let fields = sample().with("BRQ_SIGNATURE", signature);
        assert!(verify(&fields, SECRET).unwrap());
    }

    #[test]
    fn test_verify_detects_tampering() {
        let fields = signed(&sample(), SECRET).unwrap();

        let tampered_value = fields.clone().with("brq_amount", "99.00");
        assert!(!verify(&tampered_value, SECRET).unwrap());

        let signature = fields.get("brq_signature").unwrap();
        let flipped: String = signature
            .char_indices()
            .map(|(i, c)| if i == 0 { if c == '0' { '1' } else { '0' } } else { c })
            .collect();
        let tampered_signature = fields.clone().with("brq_signature", flipped);
        assert!(!verify(&tampered_signature, SECRET).unwrap());

        let uppercased = fields.clone().with("brq_signature", signature.to_uppercase());
        assert!(!verify(&uppercased, SECRET).unwrap());
    }

    #[test]
    fn test_verify_without_signature_is_false() {
        assert!(!verify(&sample(), SECRET).unwrap());
    }

    #[test]
    fn test_verify_does_not_mutate_input() {
        let fields = signed(&sample(), SECRET).unwrap();
        let before = fields.clone();
        let _ = verify(&fields, SECRET).unwrap();
        assert_eq!(fields, before);
        assert!(fields.contains("brq_signature"));
    }
}
