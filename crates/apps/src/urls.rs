//! URL helpers shared by the adapters.

use url::Url;

/// `base` with its path replaced and query/fragment cleared.
#[must_use]
pub fn with_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Resolve a vendor link against the page URL, keeping it as-is if it does
/// not resolve.
#[must_use]
pub fn absolute(base: &Url, reference: &str) -> String {
    base.join(reference)
        .map_or_else(|_| reference.to_string(), String::from)
}

/// Query pairs of a URL, in order.
#[must_use]
pub fn query_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Replace the query string with `pairs` (no `?` left behind when empty).
pub fn set_query_pairs(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

/// `pairs` with `key` set to `value`, like `URLSearchParams.set`: the first
/// occurrence is replaced, later ones dropped, and a missing key appended.
#[must_use]
pub fn with_param(pairs: &[(String, String)], key: &str, value: &str) -> Vec<(String, String)> {
    let mut out = Vec::with_capacity(pairs.len() + 1);
    let mut replaced = false;
    for (k, v) in pairs {
        if k != key {
            out.push((k.clone(), v.clone()));
        } else if !replaced {
            out.push((k.clone(), value.to_string()));
            replaced = true;
        }
    }
    if !replaced {
        out.push((key.to_string(), value.to_string()));
    }
    out
}

/// `?{query}` for the given pairs, as used by relative pagination links.
#[must_use]
pub fn search_string(pairs: &[(String, String)]) -> String {
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("?{encoded}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_with_path_drops_query() {
        let base = Url::parse("https://shop.example.com/busca?q=x#top").unwrap();
        assert_eq!(
            with_path(&base, "/produto/tenis-1").as_str(),
            "https://shop.example.com/produto/tenis-1"
        );
    }

    #[test]
    fn test_absolute() {
        let base = Url::parse("https://shop.example.com/a/b?q=1").unwrap();
        assert_eq!(absolute(&base, "/calcados"), "https://shop.example.com/calcados");
        assert_eq!(
            absolute(&base, "https://cdn.example.com/x"),
            "https://cdn.example.com/x"
        );
    }

    #[test]
    fn test_set_query_pairs() {
        let mut url = Url::parse("https://shop.example.com/s?a=1&b=2").unwrap();
        set_query_pairs(&mut url, &[("b".to_string(), "2".to_string())]);
        assert_eq!(url.as_str(), "https://shop.example.com/s?b=2");
        set_query_pairs(&mut url, &[]);
        assert_eq!(url.as_str(), "https://shop.example.com/s");
    }

    #[test]
    fn test_with_param() {
        let pairs = vec![
            ("page".to_string(), "1".to_string()),
            ("q".to_string(), "x".to_string()),
            ("page".to_string(), "9".to_string()),
        ];
        assert_eq!(
            with_param(&pairs, "page", "2"),
            vec![
                ("page".to_string(), "2".to_string()),
                ("q".to_string(), "x".to_string()),
            ]
        );
        assert_eq!(
            with_param(&[], "page", "2"),
            vec![("page".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_search_string() {
        let pairs = vec![
            ("busca".to_string(), "tênis azul".to_string()),
            ("page".to_string(), "2".to_string()),
        ];
        assert_eq!(search_string(&pairs), "?busca=t%C3%AAnis+azul&page=2");
    }
}
