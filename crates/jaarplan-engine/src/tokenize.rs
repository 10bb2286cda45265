//! Splitting of free-text, multi-valued fields into filter keys.
//!
//! `Docent; CC en Studenten` becomes the ids `docent`, `cc`, `studenten`. The
//! first casing seen for each id is kept as its display label.

const SEPARATORS: [char; 4] = [';', ',', '/', '|'];
const AND_WORD: &str = "en";

/// One normalized value of a multi-valued field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercase id used for comparisons
    pub id: String,
    /// Casing as first seen in the source
    pub label: String,
}

/// Deduplicated tokens in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<Token>,
}

impl TokenSet {
    pub fn contains(&self, id: &str) -> bool {
        self.tokens.iter().any(|token| token.id == id)
    }

    /// True when any id is in `ids`.
    pub fn intersects<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter().any(|id| self.contains(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn push(&mut self, label: String) {
        let id = label.to_lowercase();
        if !self.contains(&id) {
            self.tokens.push(Token { id, label });
        }
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Tokenizes a raw multi-valued field. Blank input yields an empty set.
///
/// Besides the separator characters, every whitespace-delimited word `en`
/// separates, in any casing and at any position. A leading or trailing `en`
/// therefore produces no token of its own (`Docent en` is just `docent`), and
/// words merely containing it (`Docenten`) are left alone.
pub fn tokenize(raw: &str) -> TokenSet {
    let mut set = TokenSet::default();
    let normalized = raw.replace('\u{a0}', " ");

    for piece in normalized.split(SEPARATORS) {
        let mut words: Vec<&str> = Vec::new();
        for word in piece.split_whitespace() {
            if word.eq_ignore_ascii_case(AND_WORD) {
                flush(&mut words, &mut set);
            } else {
                words.push(word);
            }
        }
        flush(&mut words, &mut set);
    }

    set
}

/// Tokenizes an optional field; `None` behaves like blank input.
pub fn tokenize_opt(raw: Option<&str>) -> TokenSet {
    raw.map(tokenize).unwrap_or_default()
}

fn flush(words: &mut Vec<&str>, set: &mut TokenSet) {
    if !words.is_empty() {
        set.push(words.join(" "));
        words.clear();
    }
}
