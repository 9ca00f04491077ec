/// API middleware
///
/// - `security`: OWASP-recommended security headers on every response

pub mod security;
