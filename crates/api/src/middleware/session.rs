//! Cookie-based session identity for Axum handlers.
//!
//! There is no login and no server-side session store: the opaque value in
//! the `session_id` cookie IS the identity. [`session_middleware`] resolves
//! the inbound cookie (minting a fresh token when it is absent or malformed)
//! and stashes a [`SessionToken`] in the request extensions; handlers pick
//! it up through the [`Session`] and [`RequiredSession`] extractors.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gltr_core::error::CoreError;
use gltr_core::session::{self, SESSION_COOKIE_NAME, SESSION_MAX_AGE_SECS};

use crate::error::AppError;
use crate::state::AppState;

/// Session identity resolved for the current request.
///
/// `issued` is `true` when the token was minted for this request rather than
/// read from the cookie.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub issued: bool,
}

/// Resolve the session cookie on every request.
///
/// Runs innermost in the middleware stack so the extractors below always
/// find a [`SessionToken`] in the request extensions. A cookie value that is
/// not 32 lowercase hex characters is treated as absent.
///
/// When a token was minted here, the response gets a `Set-Cookie` header --
/// except on 401 responses: an endpoint that demands a pre-existing identity
/// must not hand one out.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let (token, issued) = match jar.get(SESSION_COOKIE_NAME) {
        Some(cookie) if session::is_valid_token(cookie.value()) => {
            (cookie.value().to_string(), false)
        }
        _ => (session::generate_session_token(), true),
    };

    request.extensions_mut().insert(SessionToken {
        token: token.clone(),
        issued,
    });

    let mut response = next.run(request).await;

    if issued && response.status() != StatusCode::UNAUTHORIZED {
        let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(state.config.session_cookie_secure)
            .max_age(time::Duration::seconds(SESSION_MAX_AGE_SECS))
            .build();
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Session token for the current request, minted on the spot if the request
/// carried none.
///
/// Use this on public endpoints where any visitor may act and first contact
/// establishes their identity (listing, creating, liking, commenting):
///
/// ```ignore
/// async fn create(Session(token): Session, ...) -> AppResult<Json<Webtoon>> {
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session(pub String);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<SessionToken>().ok_or_else(|| {
            AppError::InternalError("Session middleware not installed".into())
        })?;
        Ok(Session(session.token.clone()))
    }
}

/// Session token that must have arrived with the request.
///
/// Use this on endpoints that act on resources the caller already owns
/// (updates, deletes, "my ..." listings). A request without a valid session
/// cookie is rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct RequiredSession(pub String);

impl<S> FromRequestParts<S> for RequiredSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<SessionToken>().ok_or_else(|| {
            AppError::InternalError("Session middleware not installed".into())
        })?;
        if session.issued {
            return Err(AppError::Core(CoreError::Unauthenticated(
                "No session cookie".into(),
            )));
        }
        Ok(RequiredSession(session.token.clone()))
    }
}
