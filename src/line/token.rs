// Token data model - maximal word and whitespace runs

/// Classification of a token, derived from its text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Whitespace,
}

/// One contiguous span of the line, either a run of non-whitespace
/// characters or a run of whitespace characters. Text is only ever
/// changed by full replacement, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        debug_assert!(!text.is_empty(), "tokens must carry at least one character");
        let kind = kind_of(&text);
        Self { text, kind }
    }

    /// A single-space whitespace token, the seed shape of the sentinel
    /// and of padding tokens.
    pub fn space() -> Self {
        Self::new(" ")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// True when the text is exactly one space character. The insertion
    /// padding rule keys on this literal shape, not on `kind`.
    pub fn is_lone_space(&self) -> bool {
        self.text == " "
    }
}

fn kind_of(text: &str) -> TokenKind {
    // Runs are homogeneous, so the first character decides.
    match text.chars().next() {
        Some(c) if c.is_whitespace() => TokenKind::Whitespace,
        _ => TokenKind::Word,
    }
}

/// Split text into maximal runs alternating between non-whitespace and
/// whitespace. Concatenating the resulting token texts reproduces the
/// input exactly; whitespace is preserved, never collapsed.
pub fn split_runs(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        let in_whitespace = first.is_whitespace();
        let end = rest
            .find(|c: char| c.is_whitespace() != in_whitespace)
            .unwrap_or(rest.len());
        tokens.push(Token::new(&rest[..end]));
        rest = &rest[end..];
    }
    tokens
}
