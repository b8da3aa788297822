//! Session identity middleware and extractors.
//!
//! - [`session::session_middleware`] -- Resolves or mints the session cookie.
//! - [`session::Session`] -- Yields a token for every request (issuing one if needed).
//! - [`session::RequiredSession`] -- Requires a token that arrived with the request.

pub mod session;
