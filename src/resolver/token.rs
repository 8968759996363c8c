//! Bang token extraction.
//!
//! A bang token is one whitespace-delimited word that is a bare `!`, starts
//! with `!`, or ends with `!`. Only the first such word counts.

/// A bang token found in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BangToken<'a> {
    /// The word as typed, `!` included.
    pub text: &'a str,
    /// Byte offset of the word in the query.
    pub start: usize,
}

impl<'a> BangToken<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Table key: `!` stripped from both ends, lower-cased. Empty for a
    /// bare `!`.
    pub fn key(&self) -> String {
        self.text.trim_matches('!').to_lowercase()
    }

    /// `query` with this token removed, trimmed.
    pub fn remainder(&self, query: &str) -> String {
        let mut rest = String::with_capacity(query.len() - self.text.len());
        rest.push_str(&query[..self.start]);
        rest.push_str(&query[self.end()..]);
        rest.trim().to_string()
    }
}

/// First bang token in `query`, if any.
pub fn find_bang(query: &str) -> Option<BangToken<'_>> {
    Words::new(query)
        .find(|(_, word)| word.starts_with('!') || word.ends_with('!'))
        .map(|(start, text)| BangToken { text, start })
}

/// Whitespace-delimited words with their byte offsets.
struct Words<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Words<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.source[self.pos..];
        let skipped = rest.len() - rest.trim_start().len();
        let start = self.pos + skipped;
        if start >= self.source.len() {
            self.pos = self.source.len();
            return None;
        }

        let word_len = self.source[start..]
            .find(char::is_whitespace)
            .unwrap_or(self.source.len() - start);
        self.pos = start + word_len;
        Some((start, &self.source[start..self.pos]))
    }
}
