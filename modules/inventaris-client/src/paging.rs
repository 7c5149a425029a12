//! Paging headers of the inventory listing.
//!
//! The total result count comes in `Content-Range: items 0-9/123`; further
//! pages are announced in an RFC 8288 `Link` header with `rel="next"`.

use reqwest::header::{HeaderMap, CONTENT_RANGE, LINK};

/// Total from `Content-Range`. Missing or unparseable headers count as zero results.
pub fn content_range_total(headers: &HeaderMap) -> u64 {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit('/').next())
        .and_then(|total| total.trim().parse().ok())
        .unwrap_or(0)
}

/// URL of the `rel="next"` entry in any `Link` header.
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|value| find_rel(value, "next"))
}

fn find_rel(value: &str, rel: &str) -> Option<String> {
    value.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;
        let matches = parts.any(|param| {
            let Some((name, value)) = param.split_once('=') else {
                return false;
            };
            name.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|r| r.eq_ignore_ascii_case(rel))
        });
        matches.then(|| url.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(name: reqwest::header::HeaderName, value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn total_is_read_after_the_slash() {
        assert_eq!(content_range_total(&headers(CONTENT_RANGE, "items 0-9/123")), 123);
    }

    #[test]
    fn missing_or_unknown_total_is_zero() {
        assert_eq!(content_range_total(&HeaderMap::new()), 0);
        assert_eq!(content_range_total(&headers(CONTENT_RANGE, "items 0-9/*")), 0);
    }

    #[test]
    fn finds_next_among_several_links() {
        let map = headers(
            LINK,
            r#"<https://x.be/erfgoedobjecten?pagina=1>; rel="first", <https://x.be/erfgoedobjecten?pagina=3>; rel="next""#,
        );
        assert_eq!(
            next_link(&map).as_deref(),
            Some("https://x.be/erfgoedobjecten?pagina=3")
        );
    }

    #[test]
    fn unquoted_rel_is_accepted() {
        let map = headers(LINK, "<https://x.be/p2>; rel=next");
        assert_eq!(next_link(&map).as_deref(), Some("https://x.be/p2"));
    }

    #[test]
    fn last_page_has_no_next() {
        let map = headers(LINK, r#"<https://x.be/p1>; rel="prev""#);
        assert_eq!(next_link(&map), None);
        assert_eq!(next_link(&HeaderMap::new()), None);
    }
}
