//! AlgorithmIdentifier and key structure encoders
//!
//! These are worked consumers of the counter + backward-cursor convention.
//! Reminder of the structures:
//!
//! ```text
//! AlgorithmIdentifier ::= SEQUENCE {
//!     algorithm   OBJECT IDENTIFIER,
//!     parameters  ANY DEFINED BY algorithm OPTIONAL
//! }
//!
//! RSASSA-PSS-params ::= SEQUENCE {
//!     hashAlgorithm      [0] HashAlgorithm      DEFAULT sha1,
//!     maskGenAlgorithm   [1] MaskGenAlgorithm   DEFAULT mgf1SHA1,
//!     saltLength         [2] INTEGER            DEFAULT 20,
//!     trailerField       [3] TrailerField       DEFAULT trailerFieldBC
//! }
//!
//! RSAPublicKey ::= SEQUENCE {
//!     modulus           INTEGER,  -- n
//!     publicExponent    INTEGER   -- e
//! }
//! ```
//!
//! Fields are written last to first.

use crate::oid;
use derw_core::{DerError, DerResult};
use derw_writer::constructed::{nest_context, nest_sequence, write_sequence_n};
use derw_writer::primitive::{write_integer, write_null, write_precompiled, write_unsigned};
use derw_writer::{BigNumber, DerSink, two_pass};

/// Digest algorithms with a registered AlgorithmIdentifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Look up a digest by name
    ///
    /// Accepts the usual spellings, case-insensitively: `SHA1`, `SHA-1`,
    /// `SHA256`, `SHA-256`, `SHA2-256`, and so on.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "SHA1" | "SHA-1" => Some(DigestAlgorithm::Sha1),
            "SHA256" | "SHA-256" | "SHA2-256" => Some(DigestAlgorithm::Sha256),
            "SHA384" | "SHA-384" | "SHA2-384" => Some(DigestAlgorithm::Sha384),
            "SHA512" | "SHA-512" | "SHA2-512" => Some(DigestAlgorithm::Sha512),
            _ => {
                log::debug!("Unknown digest name {:?}", name);
                None
            }
        }
    }

    /// Precompiled digest OID TLV
    pub fn oid(self) -> &'static [u8] {
        match self {
            DigestAlgorithm::Sha1 => oid::SHA1,
            DigestAlgorithm::Sha256 => oid::SHA256,
            DigestAlgorithm::Sha384 => oid::SHA384,
            DigestAlgorithm::Sha512 => oid::SHA512,
        }
    }

    /// Precompiled OID TLV of HMAC over this digest
    pub fn hmac_oid(self) -> &'static [u8] {
        match self {
            DigestAlgorithm::Sha1 => oid::HMAC_WITH_SHA1,
            DigestAlgorithm::Sha256 => oid::HMAC_WITH_SHA256,
            DigestAlgorithm::Sha384 => oid::HMAC_WITH_SHA384,
            DigestAlgorithm::Sha512 => oid::HMAC_WITH_SHA512,
        }
    }
}

/// RSASSA-PSS parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PssParams {
    /// Message digest
    pub hash: DigestAlgorithm,
    /// Digest used by MGF1
    pub mgf1_hash: DigestAlgorithm,
    /// Salt length in bytes
    pub salt_len: u64,
}

impl PssParams {
    /// Parameters with the same digest for message and MGF1, and a salt as
    /// long as the digest output
    pub fn for_digest(hash: DigestAlgorithm) -> Self {
        let salt_len = match hash {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        };
        Self {
            hash,
            mgf1_hash: hash,
            salt_len,
        }
    }
}

fn write_oid_with_null(sink: &mut DerSink<'_>, cnt: &mut usize, oid: &[u8]) -> DerResult<usize> {
    nest_sequence(sink, cnt, |sink, level| {
        write_null(sink, level)?;
        write_precompiled(sink, level, oid)
    })
}

/// Write `SEQUENCE { digest OID, NULL }`
pub fn write_digest_algorithm_identifier(
    sink: &mut DerSink<'_>,
    cnt: &mut usize,
    digest: DigestAlgorithm,
) -> DerResult<usize> {
    write_oid_with_null(sink, cnt, digest.oid())
}

/// Write `SEQUENCE { hmacWith<digest> OID, NULL }`
pub fn write_mac_algorithm_identifier(
    sink: &mut DerSink<'_>,
    cnt: &mut usize,
    digest: DigestAlgorithm,
) -> DerResult<usize> {
    write_oid_with_null(sink, cnt, digest.hmac_oid())
}

/// Write the rsaEncryption AlgorithmIdentifier, `SEQUENCE { rsaEncryption, NULL }`
///
/// This is the `algorithm` field of a SubjectPublicKeyInfo whose key is a
/// PKCS#1 `RSAPublicKey` (see [`write_rsa_public_key`]).
pub fn write_rsa_encryption_algorithm_identifier(
    sink: &mut DerSink<'_>,
    cnt: &mut usize,
) -> DerResult<usize> {
    write_oid_with_null(sink, cnt, oid::RSA_ENCRYPTION)
}

/// Write `SEQUENCE { mgf1 OID, AlgorithmIdentifier(digest) }`
pub fn write_mgf1_algorithm_identifier(
    sink: &mut DerSink<'_>,
    cnt: &mut usize,
    digest: DigestAlgorithm,
) -> DerResult<usize> {
    nest_sequence(sink, cnt, |sink, level| {
        write_digest_algorithm_identifier(sink, level, digest)?;
        write_precompiled(sink, level, oid::MGF1)
    })
}

/// Write RSASSA-PSS-params with explicit `[0]`, `[1]` and `[2]` fields
pub fn write_rsassa_pss_params(
    sink: &mut DerSink<'_>,
    cnt: &mut usize,
    params: &PssParams,
) -> DerResult<usize> {
    nest_sequence(sink, cnt, |sink, level| {
        nest_context(sink, level, 2, |sink, c| write_unsigned(sink, c, params.salt_len))?;
        nest_context(sink, level, 1, |sink, c| {
            write_mgf1_algorithm_identifier(sink, c, params.mgf1_hash)
        })?;
        nest_context(sink, level, 0, |sink, c| {
            write_digest_algorithm_identifier(sink, c, params.hash)
        })
    })
}

/// Write `SEQUENCE { id-RSASSA-PSS, RSASSA-PSS-params }`
///
/// The parameter block is measured on its own counter and merged into the
/// outer SEQUENCE with `write_sequence_n`.
pub fn write_rsassa_pss_algorithm_identifier(
    sink: &mut DerSink<'_>,
    cnt: &mut usize,
    params: &PssParams,
) -> DerResult<usize> {
    let mut params_len = 0;
    write_rsassa_pss_params(sink, &mut params_len, params)?;

    let mut level = 0;
    write_precompiled(sink, &mut level, oid::RSASSA_PSS)?;
    write_sequence_n(sink, &mut level, params_len)?;
    *cnt = cnt.checked_add(level).ok_or(DerError::UnsupportedLength(level))?;
    Ok(*cnt)
}

/// Write a PKCS#1 `RSAPublicKey`
pub fn write_rsa_public_key<N>(
    sink: &mut DerSink<'_>,
    cnt: &mut usize,
    modulus: &N,
    public_exponent: &N,
) -> DerResult<usize>
where
    N: BigNumber + ?Sized,
{
    nest_sequence(sink, cnt, |sink, level| {
        write_integer(sink, level, public_exponent)?;
        write_integer(sink, level, modulus)
    })
}

/// DER of `SEQUENCE { digest OID, NULL }`
pub fn digest_algorithm_identifier_to_vec(digest: DigestAlgorithm) -> DerResult<Vec<u8>> {
    two_pass(|sink, cnt| write_digest_algorithm_identifier(sink, cnt, digest))
}

/// DER of `SEQUENCE { hmacWith<digest> OID, NULL }`
pub fn mac_algorithm_identifier_to_vec(digest: DigestAlgorithm) -> DerResult<Vec<u8>> {
    two_pass(|sink, cnt| write_mac_algorithm_identifier(sink, cnt, digest))
}

/// DER of the rsaEncryption AlgorithmIdentifier
pub fn rsa_encryption_algorithm_identifier_to_vec() -> DerResult<Vec<u8>> {
    two_pass(write_rsa_encryption_algorithm_identifier)
}

/// DER of the RSASSA-PSS AlgorithmIdentifier
pub fn rsassa_pss_algorithm_identifier_to_vec(params: &PssParams) -> DerResult<Vec<u8>> {
    two_pass(|sink, cnt| write_rsassa_pss_algorithm_identifier(sink, cnt, params))
}

/// DER of a PKCS#1 `RSAPublicKey`
pub fn rsa_public_key_to_vec<N>(modulus: &N, public_exponent: &N) -> DerResult<Vec<u8>>
where
    N: BigNumber + ?Sized,
{
    two_pass(|sink, cnt| write_rsa_public_key(sink, cnt, modulus, public_exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use derw_writer::LimbInteger;

    const SHA256_ALGORITHM_IDENTIFIER: &[u8] = &[
        0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01, 0x05, 0x00,
    ];

    #[test]
    fn test_from_name() {
        assert_eq!(DigestAlgorithm::from_name("SHA2-256"), Some(DigestAlgorithm::Sha256));
        assert_eq!(DigestAlgorithm::from_name("sha-1"), Some(DigestAlgorithm::Sha1));
        assert_eq!(DigestAlgorithm::from_name("sha512"), Some(DigestAlgorithm::Sha512));
        assert_eq!(DigestAlgorithm::from_name("MD5"), None);
    }

    #[test]
    fn test_digest_algorithm_identifier() {
        assert_eq!(
            digest_algorithm_identifier_to_vec(DigestAlgorithm::Sha256).unwrap(),
            SHA256_ALGORITHM_IDENTIFIER
        );
    }

    #[test]
    fn test_mac_algorithm_identifier() {
        assert_eq!(
            mac_algorithm_identifier_to_vec(DigestAlgorithm::Sha256).unwrap(),
            [0x30, 0x0C, 0x06, 0x08, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x09, 0x05, 0x00]
        );
    }

    #[test]
    fn test_rsa_encryption_algorithm_identifier() {
        assert_eq!(
            rsa_encryption_algorithm_identifier_to_vec().unwrap(),
            [
                0x30, 0x0D, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01, 0x05,
                0x00
            ]
        );
    }

    #[test]
    fn test_rsa_key_with_algorithm_identifier() {
        // SEQUENCE { rsaEncryption AlgorithmIdentifier, [0] RSAPublicKey }
        let modulus = LimbInteger::from(0xC5u64);
        let exponent = LimbInteger::from(3u64);
        let der = two_pass(|sink, cnt| {
            nest_sequence(sink, cnt, |sink, level| {
                nest_context(sink, level, 0, |sink, c| {
                    write_rsa_public_key(sink, c, &modulus, &exponent)
                })?;
                write_rsa_encryption_algorithm_identifier(sink, level)
            })
        })
        .unwrap();

        let mut expected = vec![0x30, 0x1A];
        expected.extend_from_slice(&rsa_encryption_algorithm_identifier_to_vec().unwrap());
        expected.extend_from_slice(&[
            0xA0, 0x09, 0x30, 0x07, 0x02, 0x02, 0x00, 0xC5, 0x02, 0x01, 0x03,
        ]);
        assert_eq!(der, expected);
    }

    #[test]
    fn test_rsassa_pss_sha256() {
        let der =
            rsassa_pss_algorithm_identifier_to_vec(&PssParams::for_digest(DigestAlgorithm::Sha256))
                .unwrap();
        let expected: &[u8] = &[
            0x30, 0x41, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0A, 0x30,
            0x34, 0xA0, 0x0F, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
            0x02, 0x01, 0x05, 0x00, 0xA1, 0x1C, 0x30, 0x1A, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86,
            0xF7, 0x0D, 0x01, 0x01, 0x08, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65,
            0x03, 0x04, 0x02, 0x01, 0x05, 0x00, 0xA2, 0x03, 0x02, 0x01, 0x20,
        ];
        assert_eq!(der, expected);
    }

    #[test]
    fn test_rsassa_pss_into_exact_window() {
        let params = PssParams::for_digest(DigestAlgorithm::Sha384);
        let len = rsassa_pss_algorithm_identifier_to_vec(&params).unwrap().len();

        let mut short = vec![0u8; len - 1];
        let mut cnt = 0;
        assert!(matches!(
            write_rsassa_pss_algorithm_identifier(&mut DerSink::writing(&mut short), &mut cnt, &params),
            Err(DerError::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn test_rsa_public_key() {
        let modulus = LimbInteger::from(0xC5u64);
        let exponent = LimbInteger::from(0x01_0001u64);
        assert_eq!(
            rsa_public_key_to_vec(&modulus, &exponent).unwrap(),
            [0x30, 0x09, 0x02, 0x02, 0x00, 0xC5, 0x02, 0x03, 0x01, 0x00, 0x01]
        );
    }

    #[test]
    fn test_rsa_public_key_rejects_negative() {
        let modulus = LimbInteger::from(-7i64);
        let exponent = LimbInteger::from(3u64);
        assert_eq!(
            rsa_public_key_to_vec(&modulus, &exponent),
            Err(DerError::NegativeValueUnsupported)
        );
    }
}
