use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use registrar_config::SessionConfig;

pub const DARK_MODE_COOKIE: &str = "darkMode";

/// Session cookie holding the identity token.
pub fn session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(config.ttl_secs))
        .build()
}

pub fn session_token<'a>(jar: &'a CookieJar, config: &SessionConfig) -> Option<&'a str> {
    jar.get(&config.cookie_name)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
}

pub fn clear_session(jar: CookieJar, config: &SessionConfig) -> CookieJar {
    jar.remove(Cookie::build(config.cookie_name.clone()).path("/"))
}

/// Dark mode preference; anything but `"true"` means light.
pub fn dark_mode(jar: &CookieJar) -> bool {
    jar.get(DARK_MODE_COOKIE)
        .is_some_and(|cookie| cookie.value() == "true")
}

pub fn dark_mode_cookie(enabled: bool) -> Cookie<'static> {
    Cookie::build((DARK_MODE_COOKIE, enabled.to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(365))
        .build()
}
