//! Parsing for RFC 8288 `Link` response headers.
//!
//! The list endpoint signals more pages with a `rel="next"` entry, e.g.
//!
//! ```text
//! <https://qiita.com/api/v2/authenticated_user/items?page=1>; rel="first",
//! <https://qiita.com/api/v2/authenticated_user/items?page=2>; rel="next"
//! ```

/// One `<target>; param=value` entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkValue<'a> {
    pub target: &'a str,
    pub rels: Vec<&'a str>,
}

/// Splits a raw `Link` header into its entries.
///
/// Entries without a `<...>` target are skipped.
pub fn parse_links(header: &str) -> Vec<LinkValue<'_>> {
    let mut links = Vec::new();
    let mut rest = header;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };
        let target = after_open[..close].trim();
        let after_target = &after_open[close + 1..];

        // Params run until the next entry starts
        let params_end = after_target.find('<').unwrap_or(after_target.len());
        let params = &after_target[..params_end];

        links.push(LinkValue {
            target,
            rels: parse_rels(params),
        });

        rest = &after_target[params_end..];
    }

    links
}

fn parse_rels(params: &str) -> Vec<&str> {
    params
        .split(';')
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("rel") {
                Some(
                    value
                        .trim()
                        .trim_end_matches(',')
                        .trim()
                        .trim_matches('"'),
                )
            } else {
                None
            }
        })
        .flat_map(str::split_whitespace)
        .collect()
}

/// Target of the `rel="next"` entry, if any.
pub fn next_link(header: &str) -> Option<&str> {
    parse_links(header)
        .into_iter()
        .find(|link| link.rels.iter().any(|rel| rel.eq_ignore_ascii_case("next")))
        .map(|link| link.target)
}

/// Whether the header announces another page.
pub fn has_next_page(header: &str) -> bool {
    next_link(header).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const QIITA_LINK: &str = "<https://qiita.com/api/v2/authenticated_user/items?page=1&per_page=100>; rel=\"first\", \
        <https://qiita.com/api/v2/authenticated_user/items?page=1&per_page=100>; rel=\"prev\", \
        <https://qiita.com/api/v2/authenticated_user/items?page=3&per_page=100>; rel=\"next\", \
        <https://qiita.com/api/v2/authenticated_user/items?page=3&per_page=100>; rel=\"last\"";

    #[test]
    fn test_next_present() {
        assert!(has_next_page(QIITA_LINK));
        assert_eq!(
            next_link(QIITA_LINK),
            Some("https://qiita.com/api/v2/authenticated_user/items?page=3&per_page=100")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let header = "<https://qiita.com/api/v2/authenticated_user/items?page=1&per_page=100>; rel=\"first\", \
            <https://qiita.com/api/v2/authenticated_user/items?page=2&per_page=100>; rel=\"prev\", \
            <https://qiita.com/api/v2/authenticated_user/items?page=3&per_page=100>; rel=\"last\"";
        assert!(!has_next_page(header));
    }

    #[test]
    fn test_empty_header() {
        assert!(!has_next_page(""));
        assert!(parse_links("").is_empty());
    }

    #[test]
    fn test_unquoted_and_multi_valued_rel() {
        assert!(has_next_page("<https://example.com/?page=2>; rel=next"));
        assert!(has_next_page("<https://example.com/?page=2>; rel=\"last next\""));
        assert!(has_next_page("<https://example.com/?page=2>; REL=\"NEXT\""));
    }

    #[test]
    fn test_next_in_target_is_not_a_rel() {
        assert!(!has_next_page("<https://example.com/next?rel=next>; rel=\"last\""));
    }

    #[test]
    fn test_parse_links_collects_rels() {
        let links = parse_links(QIITA_LINK);
        assert_eq!(links.len(), 4);
        assert_eq!(links[0].rels, vec!["first"]);
        assert_eq!(links[3].rels, vec!["last"]);
    }
}
