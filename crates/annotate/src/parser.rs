use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ParseError;
use crate::schema::Annotation;

static INDEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"index: \[(.*?)\]").unwrap());
static SCORES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"scores: \[(.*?)\]").unwrap());

/// The two lists found in a reply. `None` means the list's pattern did not
/// match at all, which is different from a matched but empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReply {
    pub index: Option<Vec<i64>>,
    pub scores: Option<Vec<f64>>,
}

impl ParsedReply {
    pub fn matched_any(&self) -> bool {
        self.index.is_some() || self.scores.is_some()
    }

    pub fn into_annotation(self) -> Annotation {
        Annotation {
            index: self.index.unwrap_or_default(),
            scores: self.scores.unwrap_or_default(),
        }
    }
}

/// Pull `index: [...]` and `scores: [...]` out of free text. Each list is
/// looked up independently (first match, anywhere in the reply); a bad token
/// in either one fails the whole reply. Blank tokens (including the one in
/// `[]`) and non-finite scores count as bad tokens.
pub fn parse_reply(reply: &str) -> Result<ParsedReply, ParseError> {
    let index = capture(&INDEX_PATTERN, reply)
        .map(|list| parse_list::<i64, _>(list, |token| ParseError::InvalidIndex { token }))
        .transpose()?;

    let scores = capture(&SCORES_PATTERN, reply)
        .map(|list| parse_list::<f64, _>(list, |token| ParseError::InvalidScore { token }))
        .transpose()?;

    if let Some(token) = scores.iter().flatten().find(|s| !s.is_finite()) {
        return Err(ParseError::InvalidScore {
            token: token.to_string(),
        });
    }

    Ok(ParsedReply { index, scores })
}

fn capture<'a>(pattern: &Regex, reply: &'a str) -> Option<&'a str> {
    pattern
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_list<T, F>(list: &str, invalid: F) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    F: Fn(String) -> ParseError,
{
    list.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<T>().map_err(|_| invalid(token.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_reply() {
        let parsed = parse_reply("index: [0, 2]\nscores: [0.5, 1]").unwrap();
        assert_eq!(parsed.index, Some(vec![0, 2]));
        assert_eq!(parsed.scores, Some(vec![0.5, 1.0]));
        assert_eq!(parsed.into_annotation(), Annotation::new(vec![0, 2], vec![0.5, 1.0]));
    }

    #[test]
    fn test_reply_without_lists() {
        let parsed = parse_reply("I could not find any related words.").unwrap();
        assert!(!parsed.matched_any());
        assert!(parsed.into_annotation().is_empty());
    }

    #[test]
    fn test_lists_are_found_anywhere_in_the_reply() {
        let reply = "Sure! Here you go: index: [3] and then scores: [0.9] hope that helps";
        let parsed = parse_reply(reply).unwrap();
        assert_eq!(parsed.index, Some(vec![3]));
        assert_eq!(parsed.scores, Some(vec![0.9]));
    }

    #[test]
    fn test_only_first_match_counts() {
        let parsed = parse_reply("index: [1]\nscores: [0.1]\nindex: [2]\nscores: [0.2]").unwrap();
        assert_eq!(parsed.index, Some(vec![1]));
        assert_eq!(parsed.scores, Some(vec![0.1]));
    }

    #[test]
    fn test_lists_match_independently() {
        let parsed = parse_reply("index: [4, 5]").unwrap();
        assert_eq!(parsed.index, Some(vec![4, 5]));
        assert_eq!(parsed.scores, None);
        assert!(parsed.matched_any());

        let annotation = parsed.into_annotation();
        assert_eq!(annotation.index, vec![4, 5]);
        assert!(annotation.scores.is_empty());
        assert!(!annotation.is_aligned());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let parsed = parse_reply("Index: [1]\nSCORES: [0.3]").unwrap();
        assert!(!parsed.matched_any());
    }

    #[test]
    fn test_non_numeric_token_fails_the_reply() {
        let err = parse_reply("index: [0, x]\nscores: [0.5]").unwrap_err();
        assert_eq!(err, ParseError::InvalidIndex { token: "x".to_string() });

        let err = parse_reply("index: [0]\nscores: [high]").unwrap_err();
        assert_eq!(err, ParseError::InvalidScore { token: "high".to_string() });
    }

    #[test]
    fn test_negative_index_is_kept() {
        let parsed = parse_reply("index: [-1, 2]\nscores: [0.3, 0.9]").unwrap();
        assert_eq!(parsed.index, Some(vec![-1, 2]));
        assert_eq!(parsed.scores, Some(vec![0.3, 0.9]));
    }

    #[test]
    fn test_empty_brackets_are_malformed() {
        let err = parse_reply("index: []\nscores: [0.5]").unwrap_err();
        assert_eq!(err, ParseError::InvalidIndex { token: String::new() });

        let err = parse_reply("index: [ ]\nscores: [0.5]").unwrap_err();
        assert_eq!(err, ParseError::InvalidIndex { token: String::new() });

        let err = parse_reply("index: [1]\nscores: []").unwrap_err();
        assert_eq!(err, ParseError::InvalidScore { token: String::new() });
    }

    #[test]
    fn test_non_finite_scores_are_malformed() {
        let err = parse_reply("index: [0, 1]\nscores: [0.5, NaN]").unwrap_err();
        assert_eq!(err, ParseError::InvalidScore { token: "NaN".to_string() });

        assert!(parse_reply("index: [0]\nscores: [inf]").is_err());
    }

    #[test]
    fn test_trailing_comma_is_malformed() {
        assert!(parse_reply("index: [1, 2,]\nscores: [0.1, 0.2]").is_err());
    }
}
