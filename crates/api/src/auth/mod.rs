//! Authentication primitives.
//!
//! Tokens are issued by the portal's session service; this server only
//! verifies them (see [`jwt::JwtVerifier`]).

pub mod jwt;
