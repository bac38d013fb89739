//! Relative IRI resolution (RFC 3986 section 5.2)
//!
//! Without a base, references are kept as written: N3 documents routinely
//! use `<#name>` and `<>` without declaring `@base`, and the compact form
//! carries those IRIs through untouched.

/// Resolve `reference` against `base`.
pub fn resolve(base: Option<&str>, reference: &str) -> String {
    let Some(base) = base else {
        return reference.to_string();
    };
    if reference.is_empty() {
        return base.to_string();
    }
    if has_scheme(reference) {
        return reference.to_string();
    }

    let (base_scheme, base_authority, base_path, base_query) = split_components(base);

    let (authority, path, query) = if let Some(rest) = reference.strip_prefix("//") {
        let (authority, path, query) = split_authority(rest);
        (Some(authority), remove_dot_segments(path), query)
    } else if reference.starts_with('/') {
        let (path, query) = split_query(reference);
        (base_authority, remove_dot_segments(path), query)
    } else if let Some(query) = reference.strip_prefix('?') {
        (base_authority, base_path.to_string(), Some(strip_fragment(query)))
    } else if reference.starts_with('#') {
        (base_authority, base_path.to_string(), base_query)
    } else {
        let (path, query) = split_query(reference);
        let merged = if base_authority.is_some() && base_path.is_empty() {
            format!("/{}", path)
        } else {
            let dir = base_path.rfind('/').map_or("", |pos| &base_path[..=pos]);
            format!("{}{}", dir, path)
        };
        (base_authority, remove_dot_segments(&merged), query)
    };

    let mut out = String::with_capacity(base.len() + reference.len());
    out.push_str(base_scheme);
    out.push(':');
    if let Some(authority) = authority {
        out.push_str("//");
        out.push_str(authority);
    }
    out.push_str(&path);
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    if let Some(pos) = reference.find('#') {
        out.push_str(&reference[pos..]);
    }
    out
}

fn has_scheme(reference: &str) -> bool {
    let Some(colon) = reference.find(':') else {
        return false;
    };
    let scheme = &reference[..colon];
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split an absolute IRI into (scheme, authority, path, query).
fn split_components(iri: &str) -> (&str, Option<&str>, &str, Option<&str>) {
    let (scheme, rest) = iri.split_once(':').unwrap_or(("", iri));
    match rest.strip_prefix("//") {
        Some(hier) => {
            let (authority, path, query) = split_authority(hier);
            (scheme, Some(authority), path, query)
        }
        None => {
            let (path, query) = split_query(rest);
            (scheme, None, path, query)
        }
    }
}

fn split_authority(s: &str) -> (&str, &str, Option<&str>) {
    let end = s.find(['/', '?', '#']).unwrap_or(s.len());
    let (path, query) = split_query(&s[end..]);
    (&s[..end], path, query)
}

fn strip_fragment(s: &str) -> &str {
    s.split_once('#').map_or(s, |(head, _)| head)
}

fn split_query(s: &str) -> (&str, Option<&str>) {
    let s = strip_fragment(s);
    match s.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (s, None),
    }
}

/// RFC 3986 section 5.2.4
fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len().saturating_sub(1);

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {
                if i == last {
                    output.push("");
                }
            }
            ".." => {
                if output.len() > 1 {
                    output.pop();
                }
                if i == last {
                    output.push("");
                }
            }
            s => output.push(s),
        }
    }

    let result = output.join("/");
    if path.starts_with('/') && !result.starts_with('/') {
        format!("/{}", result)
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://example.org/a/b/c?q";

    #[test]
    fn test_without_base_keeps_reference() {
        assert_eq!(resolve(None, "#me"), "#me");
        assert_eq!(resolve(None, ""), "");
    }

    #[test]
    fn test_absolute_reference() {
        assert_eq!(resolve(Some(BASE), "urn:x:y"), "urn:x:y");
    }

    #[test]
    fn test_relative_references() {
        assert_eq!(resolve(Some(BASE), "d"), "http://example.org/a/b/d");
        assert_eq!(resolve(Some(BASE), "../d"), "http://example.org/a/d");
        assert_eq!(resolve(Some(BASE), "/d"), "http://example.org/d");
        assert_eq!(resolve(Some(BASE), "//other.org/x"), "http://other.org/x");
        assert_eq!(resolve(Some(BASE), "?y"), "http://example.org/a/b/c?y");
        assert_eq!(resolve(Some(BASE), "#frag"), "http://example.org/a/b/c?q#frag");
        assert_eq!(resolve(Some(BASE), ""), BASE);
    }

    #[test]
    fn test_base_without_path() {
        assert_eq!(
            resolve(Some("http://example.org"), "x"),
            "http://example.org/x"
        );
    }
}
