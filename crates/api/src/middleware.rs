/// Password hashing, session tokens and the request extractors built on them
pub mod auth;
/// Mapping of domain errors onto HTTP responses
pub mod error_handling;
/// Body, path and query extractors that reject with domain errors
pub mod extract;
