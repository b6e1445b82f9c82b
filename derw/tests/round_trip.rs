//! Round-trip validation through an independent DER decoder

use derw::algorithm::{DigestAlgorithm, oid, rsa_public_key_to_vec};
use derw::{Element, LimbInteger, RegionBuilder, to_vec};
use proptest::prelude::*;
use rasn::types::{Integer, IntegerType, ObjectIdentifier};
use rasn::{AsnType, Decode, Decoder};

#[derive(AsnType, Decode, Debug, PartialEq)]
struct RsaPublicKey {
    modulus: u64,
    public_exponent: u64,
}

#[derive(AsnType, Decode, Debug, PartialEq)]
struct TaggedSalt {
    #[rasn(tag(explicit(context, 2)))]
    salt_length: u64,
}

#[test]
fn test_boolean_true_round_trip() {
    let der = to_vec(&Element::Boolean(true)).unwrap();
    assert!(rasn::der::decode::<bool>(&der).unwrap());
}

#[test]
fn test_null_round_trip() {
    let der = to_vec(&Element::Null).unwrap();
    rasn::der::decode::<()>(&der).unwrap();
}

#[test]
fn test_precompiled_oids_decode() {
    let cases: [(&[u8], &[u32]); 4] = [
        (oid::SHA1, &[1, 3, 14, 3, 2, 26]),
        (oid::SHA256, &[2, 16, 840, 1, 101, 3, 4, 2, 1]),
        (oid::RSASSA_PSS, &[1, 2, 840, 113549, 1, 1, 10]),
        (oid::HMAC_WITH_SHA512, &[1, 2, 840, 113549, 2, 11]),
    ];
    for (der, arcs) in cases {
        let decoded: ObjectIdentifier = rasn::der::decode(der).unwrap();
        assert_eq!(decoded.to_vec(), arcs.to_vec());
    }
    assert_eq!(DigestAlgorithm::Sha256.oid(), oid::SHA256);
}

#[test]
fn test_rsa_public_key_round_trip() {
    let der = rsa_public_key_to_vec(&LimbInteger::from(0xC5u64), &LimbInteger::from(65537u64))
        .unwrap();
    let key: RsaPublicKey = rasn::der::decode(&der).unwrap();
    assert_eq!(
        key,
        RsaPublicKey {
            modulus: 0xC5,
            public_exponent: 65537
        }
    );
}

#[test]
fn test_explicit_context_round_trip() {
    let mut builder = RegionBuilder::new();
    builder.start_sequence().unwrap();
    builder.unsigned_in_context(2, 20).unwrap();
    builder.end_sequence().unwrap();
    let der = builder.finish().unwrap();

    let decoded: TaggedSalt = rasn::der::decode(&der).unwrap();
    assert_eq!(decoded, TaggedSalt { salt_length: 20 });
}

proptest! {
    /// Every u64 decodes back to itself
    #[test]
    fn prop_unsigned_round_trip(value in any::<u64>()) {
        let der = to_vec(&Element::Unsigned(value)).unwrap();
        prop_assert_eq!(rasn::der::decode::<u64>(&der).unwrap(), value);
    }

    /// Every u128 decodes back to itself through the arbitrary-precision path
    #[test]
    fn prop_integer_round_trip(value in any::<u128>()) {
        let big = LimbInteger::from(value);
        let der = to_vec(&Element::Integer(&big)).unwrap();
        prop_assert_eq!(rasn::der::decode::<Integer>(&der).unwrap(), Integer::from(value));
    }

    /// Multi-limb magnitudes, with and without a pad byte, decode back intact
    #[test]
    fn prop_multi_limb_round_trip(
        lead in 1u8..=0xFF,
        rest in proptest::collection::vec(any::<u8>(), 16..64),
    ) {
        let mut magnitude = vec![lead];
        magnitude.extend_from_slice(&rest);
        let big = LimbInteger::from_be_bytes(&magnitude);
        let der = to_vec(&Element::Integer(&big)).unwrap();

        let expected = Integer::try_from_unsigned_bytes(&magnitude, rasn::Codec::Der).unwrap();
        prop_assert_eq!(rasn::der::decode::<Integer>(&der).unwrap(), expected);
    }

    /// Negative integers are always rejected
    #[test]
    fn prop_negative_integer_rejected(value in i64::MIN..0) {
        let big = LimbInteger::from(value);
        prop_assert_eq!(
            to_vec(&Element::Integer(&big)),
            Err(derw::DerError::NegativeValueUnsupported)
        );
    }
}
