//! Path patterns
//!
//! A pattern is literal text interleaved with parameters written as
//! `<name>` or `<converter:name>`, e.g. `/game/<host_game>` or
//! `/turn/<int:round>/`. A pattern matches only when it consumes the whole
//! path.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::PatternError;

/// Character class a path parameter accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Converter {
    /// Any non-empty text without `/` (the default)
    Str,
    /// ASCII digits
    Int,
    /// ASCII letters, digits, hyphens and underscores
    Slug,
    /// Any non-empty text, `/` included
    Path,
}

impl Converter {
    /// Look up a converter by the name used inside `<...>`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "str" => Some(Converter::Str),
            "int" => Some(Converter::Int),
            "slug" => Some(Converter::Slug),
            "path" => Some(Converter::Path),
            _ => None,
        }
    }

    fn accepts_char(self, c: char) -> bool {
        match self {
            Converter::Str => c != '/',
            Converter::Int => c.is_ascii_digit(),
            Converter::Slug => c.is_ascii_alphanumeric() || c == '-' || c == '_',
            Converter::Path => true,
        }
    }

    /// Whether `value` is a complete, valid value for this converter
    pub fn accepts(self, value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| self.accepts_char(c))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Literal(String),
    Param { name: String, converter: Converter },
}

/// Parameters extracted from a matched path, in pattern order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = PathParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl Serialize for PathParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A parsed route pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    tokens: Vec<Token>,
}

impl PathPattern {
    /// Parse a pattern such as `/profile/<profile_user>`
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash {
                pattern: raw.to_string(),
            });
        }

        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;

        while let Some(idx) = rest.find(['<', '>']) {
            literal.push_str(&rest[..idx]);
            let tail = &rest[idx..];
            if tail.starts_with('>') {
                return Err(PatternError::UnexpectedClose {
                    pattern: raw.to_string(),
                });
            }
            let close = tail.find('>').ok_or_else(|| PatternError::Unterminated {
                pattern: raw.to_string(),
            })?;

            let (converter, name) = parse_param(raw, &tail[1..close])?;
            let seen = tokens
                .iter()
                .any(|t| matches!(t, Token::Param { name: n, .. } if n == name));
            if seen {
                return Err(PatternError::DuplicateParam {
                    pattern: raw.to_string(),
                    name: name.to_string(),
                });
            }

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Param {
                name: name.to_string(),
                converter,
            });
            rest = &tail[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names and converters in declaration order
    pub fn params(&self) -> impl Iterator<Item = (&str, Converter)> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Param { name, converter } => Some((name.as_str(), *converter)),
            Token::Literal(_) => None,
        })
    }

    /// Match an already-decoded path, returning the bound parameters
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut bound = Vec::new();
        if match_tokens(&self.tokens, path, &mut bound) {
            Some(PathParams(bound))
        } else {
            None
        }
    }

    /// Build a path from parameter values.
    ///
    /// The supplied names must be exactly this pattern's parameter names and
    /// every value must satisfy its converter. Values are percent-encoded;
    /// `/` is kept inside `path` values.
    pub fn reverse(&self, params: &PathParams) -> Option<String> {
        if params.len() != self.params().count() {
            return None;
        }

        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Param { name, converter } => {
                    let value = params.get(name)?;
                    if !converter.accepts(value) {
                        return None;
                    }
                    let encoded: Vec<_> = value.split('/').map(urlencoding::encode).collect();
                    out.push_str(&encoded.join("/"));
                }
            }
        }
        Some(out)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_param<'a>(raw: &str, inner: &'a str) -> Result<(Converter, &'a str), PatternError> {
    let (converter, name) = match inner.split_once(':') {
        Some((conv, name)) => {
            let converter =
                Converter::from_name(conv).ok_or_else(|| PatternError::UnknownConverter {
                    pattern: raw.to_string(),
                    converter: conv.to_string(),
                })?;
            (converter, name)
        }
        None => (Converter::Str, inner),
    };

    if !is_identifier(name) {
        return Err(PatternError::InvalidName {
            pattern: raw.to_string(),
            name: name.to_string(),
        });
    }
    Ok((converter, name))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Backtracking match: each parameter tries its longest run first
fn match_tokens(tokens: &[Token], path: &str, bound: &mut Vec<(String, String)>) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return path.is_empty();
    };

    match token {
        Token::Literal(text) => path
            .strip_prefix(text.as_str())
            .is_some_and(|tail| match_tokens(rest, tail, bound)),
        Token::Param { name, converter } => {
            let run = path
                .char_indices()
                .find(|&(_, c)| !converter.accepts_char(c))
                .map_or(path.len(), |(i, _)| i);
            let ends: Vec<usize> = path[..run]
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .collect();

            for end in ends.into_iter().rev() {
                bound.push((name.clone(), path[..end].to_string()));
                if match_tokens(rest, &path[end..], bound) {
                    return true;
                }
                bound.pop();
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> PathPattern {
        PathPattern::parse(raw).unwrap()
    }

    #[test]
    fn test_literal_pattern_matches_exactly() {
        let p = pattern("/login/");
        assert_eq!(p.matches("/login/"), Some(PathParams::new()));
        assert_eq!(p.matches("/login"), None);
        assert_eq!(p.matches("/login/extra"), None);
    }

    #[test]
    fn test_root_pattern() {
        let p = pattern("/");
        assert!(p.matches("/").is_some());
        assert!(p.matches("/login/").is_none());
    }

    #[test]
    fn test_str_param_stops_at_slash() {
        let p = pattern("/game/<host_game>");
        let params = p.matches("/game/alice").unwrap();
        assert_eq!(params.get("host_game"), Some("alice"));

        assert!(p.matches("/game/").is_none());
        assert!(p.matches("/game/alice/").is_none());
        assert!(p.matches("/game/a/b").is_none());
    }

    #[test]
    fn test_int_and_slug_converters() {
        let p = pattern("/round/<int:round>/<slug:tile>");
        let params = p.matches("/round/12/boardwalk-2").unwrap();
        assert_eq!(params.get("round"), Some("12"));
        assert_eq!(params.get("tile"), Some("boardwalk-2"));

        assert!(p.matches("/round/twelve/boardwalk").is_none());
        assert!(p.matches("/round/1/park place").is_none());
    }

    #[test]
    fn test_path_converter_spans_slashes() {
        let p = pattern("/static/<path:file>");
        let params = p.matches("/static/js/3d/board.js").unwrap();
        assert_eq!(params.get("file"), Some("js/3d/board.js"));
    }

    #[test]
    fn test_backtracking_between_params() {
        let p = pattern("/t/<a>-<b>");
        let params = p.matches("/t/x-y-z").unwrap();
        // Greedy first parameter, as an anchored regex would bind it
        assert_eq!(params.get("a"), Some("x-y"));
        assert_eq!(params.get("b"), Some("z"));
    }

    #[test]
    fn test_params_in_order() {
        let p = pattern("/<int:a>/<b>");
        let params = p.matches("/7/x").unwrap();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "7"), ("b", "x")]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PathPattern::parse("login/"),
            Err(PatternError::MissingLeadingSlash { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/game/<host"),
            Err(PatternError::Unterminated { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/game/host>"),
            Err(PatternError::UnexpectedClose { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/game/<>"),
            Err(PatternError::InvalidName { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/game/<1st>"),
            Err(PatternError::InvalidName { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/game/<uuid:id>"),
            Err(PatternError::UnknownConverter { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/<a>/<int:a>"),
            Err(PatternError::DuplicateParam { .. })
        ));
    }

    #[test]
    fn test_reverse_requires_exact_names() {
        let p = pattern("/game/<host_name>");
        let params: PathParams = [("host_name", "bob")].into_iter().collect();
        assert_eq!(p.reverse(&params).as_deref(), Some("/game/bob"));

        let wrong: PathParams = [("host_game", "bob")].into_iter().collect();
        assert_eq!(p.reverse(&wrong), None);

        let extra: PathParams = [("host_name", "bob"), ("x", "1")].into_iter().collect();
        assert_eq!(p.reverse(&extra), None);
    }

    #[test]
    fn test_reverse_checks_converters_and_encodes() {
        let p = pattern("/profile/<profile_user>");
        let spaced: PathParams = [("profile_user", "rich uncle")].into_iter().collect();
        assert_eq!(
            p.reverse(&spaced).as_deref(),
            Some("/profile/rich%20uncle")
        );

        let slashed: PathParams = [("profile_user", "a/b")].into_iter().collect();
        assert_eq!(p.reverse(&slashed), None);

        let file = pattern("/static/<path:file>");
        let params: PathParams = [("file", "js/board file.js")].into_iter().collect();
        assert_eq!(
            file.reverse(&params).as_deref(),
            Some("/static/js/board%20file.js")
        );
    }

    #[test]
    fn test_params_serialize_as_map() {
        let params: PathParams = [("user_name", "carol")].into_iter().collect();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({ "user_name": "carol" }));
    }
}
