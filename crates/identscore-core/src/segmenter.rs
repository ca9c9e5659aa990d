//! Identifier segmentation along naming-convention boundaries.

/// Split an identifier into sub-word tokens.
///
/// Boundaries are camelCase transitions, the end of an uppercase run followed
/// by a capitalized word (`HTTPServer` → `HTTP`, `Server`), letter/digit
/// transitions in both directions, and the `-`/`_` delimiters. Tokens that are
/// empty, a lone underscore, or purely numeric are dropped.
pub fn segment(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '_' {
            flush(&mut current, &mut tokens);
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            if is_boundary(prev, c, next) {
                flush(&mut current, &mut tokens);
            }
        }
        current.push(c);
    }
    flush(&mut current, &mut tokens);

    tokens
}

/// Split a dotted import path into segments, each segmented independently.
/// Segments left with no tokens are omitted.
pub fn segment_path(path: &str) -> Vec<Vec<String>> {
    path.split('.')
        .map(segment)
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

fn is_boundary(prev: char, cur: char, next: Option<char>) -> bool {
    let camel = prev.is_lowercase() && cur.is_uppercase();
    let acronym_end = prev.is_uppercase()
        && cur.is_uppercase()
        && next.is_some_and(|n| n.is_lowercase());
    let letter_to_digit = prev.is_alphabetic() && cur.is_ascii_digit();
    let digit_to_letter = prev.is_ascii_digit() && cur.is_alphabetic();

    camel || acronym_end || letter_to_digit || digit_to_letter
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if is_meaningful(current) {
        tokens.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

fn is_meaningful(token: &str) -> bool {
    !token.is_empty() && token != "_" && !token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(segment("userId"), vec!["user", "Id"]);
        assert_eq!(segment("getUserName"), vec!["get", "User", "Name"]);
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(segment("ComprehensibilityScore"), vec!["Comprehensibility", "Score"]);
    }

    #[test]
    fn test_acronym_followed_by_word() {
        assert_eq!(segment("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(segment("parseXMLDocument"), vec!["parse", "XML", "Document"]);
    }

    #[test]
    fn test_all_caps_constant() {
        assert_eq!(segment("MAX_VALUE"), vec!["MAX", "VALUE"]);
        assert_eq!(segment("PI"), vec!["PI"]);
    }

    #[test]
    fn test_snake_and_kebab_case() {
        assert_eq!(segment("square_root"), vec!["square", "root"]);
        assert_eq!(segment("gaussian-process"), vec!["gaussian", "process"]);
        assert_eq!(segment("__init__"), vec!["init"]);
    }

    #[test]
    fn test_digit_transitions() {
        assert_eq!(segment("getHTTP2Response"), vec!["get", "HTTP", "Response"]);
        assert_eq!(segment("utf8decode"), vec!["utf", "decode"]);
        assert_eq!(segment("base64Encoder"), vec!["base", "Encoder"]);
    }

    #[test]
    fn test_digit_only_tokens_are_dropped() {
        assert_eq!(segment("xk1"), vec!["xk"]);
        assert!(segment("_2024").is_empty());
        assert!(segment("___").is_empty());
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_segment_path() {
        let segments = segment_path("java.util.Scanner");
        assert_eq!(
            segments,
            vec![vec!["java".to_string()], vec!["util".to_string()], vec!["Scanner".to_string()]]
        );
    }

    #[test]
    fn test_segment_path_drops_empty_segments() {
        let segments = segment_path("com.example.");
        assert_eq!(segments.len(), 2);
        let segments = segment_path("org.v2.http_client");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], vec!["v"]);
        assert_eq!(segments[2], vec!["http", "client"]);
        let segments = segment_path("com.example.v2024");
        assert_eq!(segments.len(), 3);
        assert_eq!(segment_path("com.2024.users").len(), 2);
    }
}
