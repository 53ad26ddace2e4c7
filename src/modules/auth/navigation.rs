//! Where to send the browser after the authentication state is known.

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";

/// `/login?redirect=<path_and_query>`, with the target left unencoded.
pub fn login_redirect(path_and_query: &str) -> String {
    format!("{LOGIN_PATH}?redirect={path_and_query}")
}

/// Value of the `redirect` parameter of `path_and_query`.
///
/// [`login_redirect`] leaves its target unencoded, so everything after
/// `redirect=` is taken, including any `&` of the target's own query.
pub fn redirect_param(path_and_query: &str) -> Option<String> {
    let (_, query) = path_and_query.split_once('?')?;
    let start = if query.starts_with("redirect=") {
        0
    } else {
        query.find("&redirect=")? + 1
    };
    let raw = &query[start + "redirect=".len()..];
    let value = urlencoding::decode(raw)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    (!value.is_empty()).then_some(value)
}

/// `destination` if it is a path on this site, `/` otherwise.
pub fn local_destination(destination: &str) -> &str {
    let is_local = destination.starts_with('/')
        && !destination.starts_with("//")
        && !destination.starts_with("/\\");
    if is_local { destination } else { "/" }
}

/// Destination after the identity provider has reported whether the user
/// is signed in.
///
/// `current` is the full path and query of the page being shown and
/// `redirect` the value of its `redirect` query parameter, if any.
///
/// | signed in | on `/login` or `/signup` | `redirect` | result                          |
/// |-----------|--------------------------|------------|---------------------------------|
/// | yes       | any                      | set        | `redirect`                      |
/// | yes       | no, and no auth path in `current` | unset | `current`                 |
/// | yes       | otherwise                | unset      | `/`                             |
/// | no        | no, `current` has `/signup` | any     | `/signup?redirect=<current>`    |
/// | no        | no, `current` has `/login`  | any     | `/login?redirect=<current>`     |
/// | no        | no                       | any        | `/login`                        |
/// | no        | yes                      | set        | `/login?redirect=<redirect>`    |
/// | no        | yes                      | unset      | `current`                       |
pub fn post_auth_destination(
    is_authenticated: bool,
    current: &str,
    redirect: Option<&str>,
) -> String {
    let redirect = redirect.filter(|r| !r.is_empty());
    let is_auth_page = current == LOGIN_PATH || current == SIGNUP_PATH;
    let mentions_auth = current.contains(LOGIN_PATH) || current.contains(SIGNUP_PATH);

    if is_authenticated {
        return match redirect {
            Some(target) => target.to_string(),
            None if !is_auth_page && !mentions_auth => current.to_string(),
            None => "/".to_string(),
        };
    }

    if !is_auth_page {
        return if current.contains(SIGNUP_PATH) {
            format!("{SIGNUP_PATH}?redirect={current}")
        } else if current.contains(LOGIN_PATH) {
            format!("{LOGIN_PATH}?redirect={current}")
        } else {
            LOGIN_PATH.to_string()
        };
    }

    match redirect {
        Some(target) => login_redirect(target),
        None => current.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_keeps_query_raw() {
        assert_eq!(
            login_redirect("/students?search=davis&page=2"),
            "/login?redirect=/students?search=davis&page=2"
        );
    }

    #[test]
    fn test_redirect_param() {
        assert_eq!(
            redirect_param("/login?redirect=/students?search=davis&page=2").as_deref(),
            Some("/students?search=davis&page=2")
        );
        assert_eq!(
            redirect_param("/login?x=1&redirect=%2Fstudents%2F4").as_deref(),
            Some("/students/4")
        );
        assert_eq!(redirect_param("/login"), None);
        assert_eq!(redirect_param("/login?redirect="), None);
        assert_eq!(redirect_param("/login?noredirect=/x"), None);
    }

    #[test]
    fn test_local_destination() {
        assert_eq!(local_destination("/students/4"), "/students/4");
        assert_eq!(local_destination("https://evil.example"), "/");
        assert_eq!(local_destination("//evil.example"), "/");
        assert_eq!(local_destination(""), "/");
    }

    #[test]
    fn test_authenticated_with_redirect() {
        assert_eq!(
            post_auth_destination(true, "/login", Some("/students")),
            "/students"
        );
        assert_eq!(
            post_auth_destination(true, "/students", Some("/students/3")),
            "/students/3"
        );
    }

    #[test]
    fn test_authenticated_stays_on_regular_page() {
        assert_eq!(
            post_auth_destination(true, "/students?page=2", None),
            "/students?page=2"
        );
    }

    #[test]
    fn test_authenticated_leaves_auth_pages() {
        assert_eq!(post_auth_destination(true, "/login", None), "/");
        assert_eq!(post_auth_destination(true, "/signup", None), "/");
        assert_eq!(post_auth_destination(true, "/login?x=1", None), "/");
    }

    #[test]
    fn test_unauthenticated_off_auth_page() {
        assert_eq!(post_auth_destination(false, "/students", None), "/login");
        assert_eq!(
            post_auth_destination(false, "/signup?ref=mail", None),
            "/signup?redirect=/signup?ref=mail"
        );
        assert_eq!(
            post_auth_destination(false, "/login?redirect=/students", Some("/students")),
            "/login?redirect=/login?redirect=/students"
        );
    }

    #[test]
    fn test_unauthenticated_on_auth_page() {
        assert_eq!(
            post_auth_destination(false, "/login", Some("/students")),
            "/login?redirect=/students"
        );
        assert_eq!(post_auth_destination(false, "/login", None), "/login");
        assert_eq!(post_auth_destination(false, "/signup", None), "/signup");
        assert_eq!(post_auth_destination(false, "/signup", Some("")), "/signup");
    }
}
