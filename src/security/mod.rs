pub mod access_verifier;
pub mod arg_escape;
pub mod secret_masker;

pub use access_verifier::AccessVerifier;
pub use secret_masker::SecretMasker;
