//! Small helpers shared by the handlers and upstream clients

use url::Url;

/// Turn a raw `Authorization` header value into the bare token
///
/// A leading `Bearer` scheme is dropped so the token is not sent upstream
/// as `Bearer Bearer ...`. Returns `None` for blank values, including a bare
/// scheme with no token after it.
pub(crate) fn normalize_token(header: &str) -> Option<&str> {
    let value = header.trim();
    let token = match (value.get(..6), value.get(6..)) {
        (Some(scheme), Some(rest))
            if scheme.eq_ignore_ascii_case("bearer")
                && rest.chars().next().map_or(true, char::is_whitespace) =>
        {
            rest.trim_start()
        }
        _ => value,
    };

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Build the site-restricted query sent to the web search engine
pub(crate) fn site_query(domain: &str, query: Option<&str>) -> String {
    format!("site:{} {} lyrics", domain, query.unwrap_or_default())
}

/// Resolve a search-result anchor to the page it points at
///
/// Handles both direct links and the engine's `/url?q=<target>` redirect form.
/// Links that stay on the engine itself are not results and yield `None`.
pub(crate) fn resolve_result_link(engine: &Url, href: &str) -> Option<String> {
    let resolved = engine.join(href).ok()?;

    let target = if resolved.host_str() == engine.host_str() && resolved.path() == "/url" {
        resolved
            .query_pairs()
            .find(|(key, _)| key == "q" || key == "url")
            .and_then(|(_, value)| Url::parse(&value).ok())?
    } else {
        resolved
    };

    let external = matches!(target.scheme(), "http" | "https")
        && target.host_str().is_some()
        && target.host_str() != engine.host_str();

    external.then(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("abc123"), Some("abc123"));
        assert_eq!(normalize_token("Bearer abc123"), Some("abc123"));
        assert_eq!(normalize_token("bearer   abc123 "), Some("abc123"));
        assert_eq!(normalize_token("   "), None);
        assert_eq!(normalize_token("Bearer "), None);
        assert_eq!(normalize_token("Bearer"), None);
        assert_eq!(normalize_token("BEARER\t"), None);
        assert_eq!(normalize_token("Bearerabc"), Some("Bearerabc"));
        assert_eq!(normalize_token("Bearer\tabc"), Some("abc"));
    }

    #[test]
    fn test_site_query() {
        assert_eq!(
            site_query("www.azlyrics.com", Some("hello adele")),
            "site:www.azlyrics.com hello adele lyrics"
        );
        assert_eq!(site_query("www.azlyrics.com", None), "site:www.azlyrics.com  lyrics");
    }

    #[test]
    fn test_resolve_result_link() {
        let engine = Url::parse("https://www.google.com").unwrap();

        assert_eq!(
            resolve_result_link(
                &engine,
                "/url?q=https://www.azlyrics.com/lyrics/adele/hello.html&sa=U&ved=abc"
            ),
            Some("https://www.azlyrics.com/lyrics/adele/hello.html".to_string())
        );
        assert_eq!(
            resolve_result_link(&engine, "https://www.azlyrics.com/a.html"),
            Some("https://www.azlyrics.com/a.html".to_string())
        );
        assert_eq!(resolve_result_link(&engine, "/search?q=next+page"), None);
        assert_eq!(resolve_result_link(&engine, "javascript:void(0)"), None);
    }
}
