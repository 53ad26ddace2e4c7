//! One-shot notifications carried across a redirect in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        urlencoding::encode(&format!("{}:{}", self.kind.as_str(), self.message)).into_owned()
    }

    fn decode(value: &str) -> Option<Self> {
        let decoded = urlencoding::decode(value).ok()?;
        let (kind, message) = decoded.split_once(':')?;
        let kind = match kind {
            "success" => FlashKind::Success,
            "error" => FlashKind::Error,
            _ => return None,
        };
        Some(Self {
            kind,
            message: message.to_string(),
        })
    }
}

pub fn set_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

pub fn read_flash(jar: &CookieJar) -> Option<Flash> {
    jar.get(FLASH_COOKIE).and_then(|c| Flash::decode(c.value()))
}

/// Removes the flash cookie, if the request carried one.
pub fn clear_flash(jar: CookieJar) -> CookieJar {
    if jar.get(FLASH_COOKIE).is_some() {
        jar.remove(Cookie::build(FLASH_COOKIE).path("/"))
    } else {
        jar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_value_survives_cookie_parsing() {
        let flash = Flash::error("Logout failed: provider said: no");
        let jar = set_flash(CookieJar::new(), &flash);
        assert_eq!(read_flash(&jar), Some(flash));
    }

    #[test]
    fn test_unknown_kind_is_ignored() {
        let jar = CookieJar::new().add(Cookie::new(FLASH_COOKIE, "info%3Ahello"));
        assert_eq!(read_flash(&jar), None);
    }

    #[test]
    fn test_clear_without_flash_is_noop() {
        let jar = clear_flash(CookieJar::new());
        assert!(jar.get(FLASH_COOKIE).is_none());
    }
}
