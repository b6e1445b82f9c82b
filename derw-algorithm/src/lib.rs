//! AlgorithmIdentifier and key structure encoders
//!
//! This crate assembles common cryptographic DER structures on top of
//! `derw-writer`: digest and HMAC AlgorithmIdentifiers, the RSASSA-PSS
//! AlgorithmIdentifier with its parameters, and PKCS#1 RSA public keys.

pub mod identifier;
pub mod oid;

pub use identifier::{
    DigestAlgorithm, PssParams, digest_algorithm_identifier_to_vec,
    mac_algorithm_identifier_to_vec, rsa_encryption_algorithm_identifier_to_vec,
    rsa_public_key_to_vec,
    rsassa_pss_algorithm_identifier_to_vec, write_digest_algorithm_identifier,
    write_mac_algorithm_identifier, write_mgf1_algorithm_identifier, write_rsa_encryption_algorithm_identifier,
    write_rsa_public_key,
    write_rsassa_pss_algorithm_identifier, write_rsassa_pss_params,
};
