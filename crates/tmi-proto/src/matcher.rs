//! Command token matching.
//!
//! A command is a prefix (usually `!`) glued to a keyword, e.g. `!hello`.
//! A token only counts when whitespace or the edge of the content sits on
//! both sides of it, so `!hello` never matches inside `!helloworld` or
//! `say!hello`.

/// Conversion into the keyword list of a [`CommandMatcher`].
///
/// Lets callers register a single keyword or several at once.
pub trait IntoKeywords {
    /// Consume `self` into an ordered keyword list.
    fn into_keywords(self) -> Vec<String>;
}

impl IntoKeywords for &str {
    fn into_keywords(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl IntoKeywords for String {
    fn into_keywords(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoKeywords for &[&str] {
    fn into_keywords(self) -> Vec<String> {
        self.iter().map(|k| (*k).to_owned()).collect()
    }
}

impl<const N: usize> IntoKeywords for [&str; N] {
    fn into_keywords(self) -> Vec<String> {
        self.iter().map(|k| (*k).to_owned()).collect()
    }
}

impl IntoKeywords for Vec<&str> {
    fn into_keywords(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl IntoKeywords for Vec<String> {
    fn into_keywords(self) -> Vec<String> {
        self
    }
}

impl IntoKeywords for &[String] {
    fn into_keywords(self) -> Vec<String> {
        self.to_vec()
    }
}

/// Recognizes `prefix + keyword` tokens in message content.
///
/// When anchored, the token must open the content and at most one match is
/// reported. Otherwise every non-overlapping token is reported left to right.
/// Keywords are tried in registration order at each position. Matching is
/// case-sensitive.
///
/// # Examples
///
/// ```
/// use tmi_proto::CommandMatcher;
///
/// let hello = CommandMatcher::new("!", "hello", true);
/// assert_eq!(hello.matches("!hello there"), vec!["!hello"]);
/// assert!(hello.matches("say !hello").is_empty());
/// assert!(hello.matches("!helloworld").is_empty());
///
/// let anywhere = CommandMatcher::new("!", ["hello", "bye"], false);
/// assert_eq!(anywhere.matches("!hello !bye"), vec!["!hello", "!bye"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandMatcher {
    prefix: String,
    keywords: Vec<String>,
    /// `prefix + keyword`, same order as `keywords`. Empty tokens are dropped.
    tokens: Vec<String>,
    anchored: bool,
}

impl CommandMatcher {
    /// Build a matcher for `prefix` followed by any of `keywords`.
    pub fn new(prefix: &str, keywords: impl IntoKeywords, anchored: bool) -> Self {
        let keywords = keywords.into_keywords();
        let tokens = keywords
            .iter()
            .map(|keyword| format!("{prefix}{keyword}"))
            .filter(|token| !token.is_empty())
            .collect();

        Self {
            prefix: prefix.to_owned(),
            keywords,
            tokens,
            anchored,
        }
    }

    /// Command prefix, e.g. `!`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registered keywords without the prefix.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether the token must open the content.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Every matched command token, in order of appearance.
    pub fn matches(&self, content: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut at = 0;

        while at <= content.len() {
            if Self::starts_token(content, at) {
                if let Some(token) = self.token_at(content, at) {
                    found.push(token.to_owned());
                    if self.anchored {
                        break;
                    }
                    at += token.len();
                    continue;
                }
            }

            if self.anchored {
                break;
            }

            match content[at..].chars().next() {
                Some(c) => at += c.len_utf8(),
                None => break,
            }
        }

        found
    }

    /// Whether the content holds at least one command token.
    pub fn is_match(&self, content: &str) -> bool {
        !self.matches(content).is_empty()
    }

    /// A token may start at the beginning or right after whitespace.
    fn starts_token(content: &str, at: usize) -> bool {
        at == 0 || content[..at].chars().next_back().is_some_and(char::is_whitespace)
    }

    /// First registered token found at `at` that ends on a boundary.
    fn token_at(&self, content: &str, at: usize) -> Option<&str> {
        let rest = &content[at..];
        self.tokens
            .iter()
            .find(|token| {
                rest.strip_prefix(token.as_str())
                    .is_some_and(|after| after.chars().next().map_or(true, char::is_whitespace))
            })
            .map(String::as_str)
    }
}
