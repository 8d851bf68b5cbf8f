//! UTM parameter forwarding for outbound links.
//!
//! A visitor landing on `/?utm_source=news&ref=1` should carry the campaign
//! parameters along when following a marked link:
//!
//! ```text
//! <a data-track-utm href="/shop">   ──►   /shop?utm_source=news
//! ```
//!
//! Only [`UTM_PARAMS`] are forwarded, in that order. The shipped `script.js`
//! applies the same rules in the browser at page load; this module exposes
//! them for the CLI and for decorating pages ahead of time.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Query parameters forwarded to marked links.
pub const UTM_PARAMS: [&str; 3] = ["utm_source", "utm_medium", "utm_campaign"];

/// Attribute marking a link for decoration.
pub const MARKER_ATTR: &str = "data-track-utm";

/// `<a>` start tags, with or without attributes.
static RE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[aA](?:[[:space:]][^>]*)?>").expect("valid anchor regex"));

/// One attribute: name, then an optional double-quoted, single-quoted or bare value.
static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"([^[:space:]=/>"']+)(?:[[:space:]]*=[[:space:]]*(?:"([^"]*)"|'([^']*)'|([^[:space:]>"']+)))?"#,
    )
    .expect("valid attribute regex")
});

/// Extract the forwarded parameters from a page query string.
///
/// Accepts the query with or without its leading `?`. The first value of
/// each parameter wins. Returns an empty string when none are present.
pub fn utm_query(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(String, String)> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect();

    UTM_PARAMS
        .iter()
        .filter_map(|name| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| format!("{name}={}", encode_component(value)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Append an encoded UTM query to `url`.
///
/// Uses `&` when the url already has a query. A `#fragment` stays last.
pub fn append_utm(url: &str, utm: &str) -> String {
    if utm.is_empty() {
        return url.to_owned();
    }

    let (base, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };
    let separator = if base.contains('?') { '&' } else { '?' };

    format!("{base}{separator}{utm}{fragment}")
}

/// Append `utm` to the `href` of every `<a>` carrying [`MARKER_ATTR`].
///
/// Not idempotent: decorating twice appends the parameters twice.
pub fn decorate_links(html: &str, utm: &str) -> String {
    if utm.is_empty() {
        return html.to_owned();
    }

    RE_ANCHOR
        .replace_all(html, |caps: &Captures<'_>| decorate_tag(&caps[0], utm))
        .into_owned()
}

/// Rewrite the href of a single `<a ...>` tag if it is marked.
fn decorate_tag(tag: &str, utm: &str) -> String {
    // Attributes sit between "<a" and ">"
    let attrs_start = 2;
    let attrs = &tag[attrs_start..tag.len() - 1];

    let mut marked = false;
    let mut href = None;

    for caps in RE_ATTR.captures_iter(attrs) {
        let name = &caps[1];
        if name.eq_ignore_ascii_case(MARKER_ATTR) {
            marked = true;
        } else if name.eq_ignore_ascii_case("href") && href.is_none() {
            href = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4));
        }
    }

    match href {
        Some(value) if marked => {
            let start = attrs_start + value.start();
            let end = attrs_start + value.end();
            format!(
                "{}{}{}",
                &tag[..start],
                append_utm(value.as_str(), utm),
                &tag[end..]
            )
        }
        _ => tag.to_owned(),
    }
}

/// Decode a form-urlencoded component (`+` is a space), replacing invalid UTF-8.
fn decode_component(s: &str) -> String {
    let s = s.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned()
}

/// Encode a component the way browsers serialize `URLSearchParams`.
///
/// The form serializer keeps `*-._` and alphanumerics, writes a space as `+`
/// and percent-encodes everything else, including `~`.
fn encode_component(s: &str) -> String {
    urlencoding::encode(s)
        .replace("%20", "+")
        .replace("%2A", "*")
        .replace('~', "%7E")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_single_param() {
        let utm = utm_query("?utm_source=x&other=1");
        assert_eq!(utm, "utm_source=x");
        assert_eq!(append_utm("/a", &utm), "/a?utm_source=x");
    }

    #[test]
    fn test_params_in_allow_list_order() {
        let utm = utm_query("utm_campaign=spring&utm_source=news&utm_medium=email");
        assert_eq!(utm, "utm_source=news&utm_medium=email&utm_campaign=spring");
    }

    #[test]
    fn test_no_params() {
        assert_eq!(utm_query(""), "");
        assert_eq!(utm_query("?"), "");
        assert_eq!(utm_query("?ref=home&utm_term=x"), "");
        assert_eq!(append_utm("/a", ""), "/a");
    }

    #[test]
    fn test_first_value_wins() {
        assert_eq!(utm_query("utm_source=a&utm_source=b"), "utm_source=a");
    }

    #[test]
    fn test_value_encoding_roundtrip() {
        assert_eq!(
            utm_query("?utm_source=summer+sale&utm_medium=a%26b"),
            "utm_source=summer+sale&utm_medium=a%26b"
        );
        assert_eq!(utm_query("utm_source"), "utm_source=");
    }

    #[test]
    fn test_value_encoding_matches_form_serializer() {
        assert_eq!(utm_query("utm_source=a~b*c"), "utm_source=a%7Eb*c");
        assert_eq!(
            utm_query("utm_source=%21%27%28%29-._"),
            "utm_source=%21%27%28%29-._"
        );
    }

    #[test]
    fn test_append_to_existing_query() {
        assert_eq!(append_utm("/a?x=1", "utm_source=x"), "/a?x=1&utm_source=x");
    }

    #[test]
    fn test_append_keeps_fragment_last() {
        assert_eq!(append_utm("/a#top", "utm_source=x"), "/a?utm_source=x#top");
        assert_eq!(
            append_utm("https://shop.example/p?id=2#buy", "utm_medium=m"),
            "https://shop.example/p?id=2&utm_medium=m#buy"
        );
    }

    #[test]
    fn test_decorate_marked_links_only() {
        let html = r#"<a data-track-utm href="/a">A</a> <a href="/b">B</a> <abbr data-track-utm>x</abbr>"#;
        assert_eq!(
            decorate_links(html, "utm_source=x"),
            r#"<a data-track-utm href="/a?utm_source=x">A</a> <a href="/b">B</a> <abbr data-track-utm>x</abbr>"#
        );
    }

    #[test]
    fn test_decorate_attribute_forms() {
        let html = "<A HREF='/s' class=btn DATA-TRACK-UTM>S</A><a data-track-utm href=/u>U</a>";
        assert_eq!(
            decorate_links(html, "utm_source=x"),
            "<A HREF='/s?utm_source=x' class=btn DATA-TRACK-UTM>S</A><a data-track-utm href=/u?utm_source=x>U</a>"
        );
    }

    #[test]
    fn test_decorate_marked_link_without_href() {
        let html = "<a data-track-utm>no target</a><a>plain</a>";
        assert_eq!(decorate_links(html, "utm_source=x"), html);
    }

    #[test]
    fn test_decorate_without_params_is_identity() {
        let html = r#"<a data-track-utm href="/a">A</a>"#;
        assert_eq!(decorate_links(html, ""), html);
    }

    #[test]
    fn test_decorate_twice_duplicates() {
        let html = r#"<a data-track-utm href="/a">A</a>"#;
        let once = decorate_links(html, "utm_source=x");
        let twice = decorate_links(&once, "utm_source=x");
        assert_eq!(
            twice,
            r#"<a data-track-utm href="/a?utm_source=x&utm_source=x">A</a>"#
        );
    }
}
