//! Session cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name carrying the session token.
pub const PANTRY_TOKEN: &str = "pantry_token";

/// Set the session-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use pantry_auth_types::cookie::{set_token_cookie, PANTRY_TOKEN};
///
/// let jar = set_token_cookie(CookieJar::new(), "token_value".to_string(), Some("example.com".to_string()), 3600);
/// let cookie = jar.get(PANTRY_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_token_cookie(
    jar: CookieJar,
    value: String,
    domain: Option<String>,
    max_age_secs: u64,
) -> CookieJar {
    jar.add(build(value, domain, Duration::seconds(max_age_secs as i64)))
}

/// Clear the session-token cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use pantry_auth_types::cookie::{clear_token_cookie, set_token_cookie, PANTRY_TOKEN};
///
/// let jar = set_token_cookie(CookieJar::new(), "t".to_string(), None, 3600);
/// let jar = clear_token_cookie(jar, None);
/// assert_eq!(jar.get(PANTRY_TOKEN).unwrap().max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_token_cookie(jar: CookieJar, domain: Option<String>) -> CookieJar {
    jar.add(build(String::new(), domain, Duration::ZERO))
}

fn build(value: String, domain: Option<String>, max_age: Duration) -> Cookie<'static> {
    let mut cookie = Cookie::build((PANTRY_TOKEN, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    if let Some(domain) = domain {
        cookie.set_domain(domain);
    }
    cookie
}
