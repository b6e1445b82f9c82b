//! Precompiled OBJECT IDENTIFIER TLVs
//!
//! Each constant is a complete DER TLV (`06 len value`), ready to be passed
//! to `write_precompiled`.

/// id-sha1
///
/// OID: {1, 3, 14, 3, 2, 26}
pub const SHA1: &[u8] = &[0x06, 0x05, 0x2B, 0x0E, 0x03, 0x02, 0x1A];

/// id-sha256
///
/// OID: {2, 16, 840, 1, 101, 3, 4, 2, 1}
pub const SHA256: &[u8] = &[
    0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
];

/// id-sha384
///
/// OID: {2, 16, 840, 1, 101, 3, 4, 2, 2}
pub const SHA384: &[u8] = &[
    0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02,
];

/// id-sha512
///
/// OID: {2, 16, 840, 1, 101, 3, 4, 2, 3}
pub const SHA512: &[u8] = &[
    0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03,
];

/// id-mgf1
///
/// OID: {1, 2, 840, 113549, 1, 1, 8}
pub const MGF1: &[u8] = &[
    0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x08,
];

/// rsaEncryption
///
/// OID: {1, 2, 840, 113549, 1, 1, 1}
pub const RSA_ENCRYPTION: &[u8] = &[
    0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01,
];

/// id-RSASSA-PSS
///
/// OID: {1, 2, 840, 113549, 1, 1, 10}
pub const RSASSA_PSS: &[u8] = &[
    0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0A,
];

/// id-hmacWithSHA1
///
/// OID: {1, 2, 840, 113549, 2, 7}
pub const HMAC_WITH_SHA1: &[u8] = &[0x06, 0x08, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x07];

/// id-hmacWithSHA256
///
/// OID: {1, 2, 840, 113549, 2, 9}
pub const HMAC_WITH_SHA256: &[u8] = &[0x06, 0x08, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x09];

/// id-hmacWithSHA384
///
/// OID: {1, 2, 840, 113549, 2, 10}
pub const HMAC_WITH_SHA384: &[u8] = &[0x06, 0x08, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x0A];

/// id-hmacWithSHA512
///
/// OID: {1, 2, 840, 113549, 2, 11}
pub const HMAC_WITH_SHA512: &[u8] = &[0x06, 0x08, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x0B];
