use once_cell::sync::Lazy;
use regex::Regex;

/// A half-open byte range `[start, end)` into the source text.
///
/// Tokens carry position only; what the range means is decided by the
/// matching rule. Every AST node keeps the token it was parsed from, and
/// the next production resumes exactly at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(start: usize, end: usize) -> Self {
        Token { start, end }
    }
}

/// The lexical vocabulary of the configuration grammar.
///
/// Each kind owns a pattern and, for punctuation, the literal spelling the
/// renderer emits. There is no token stream and no whitespace skipping:
/// matching is anchored, one kind at one offset at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Optional sign, digits, optional fractional part
    Num,
    /// Letter followed by letters, digits, or underscores
    BareString,
    /// Like `BareString` but also permits internal `.` namespace separators
    Name,
    OpenContent,
    ClosedContent,
    Assign,
    ListSep,
    OpenList,
    ClosedList,
    Join,
}

const ALL_KINDS: [TokenKind; 10] = [
    TokenKind::Num,
    TokenKind::BareString,
    TokenKind::Name,
    TokenKind::OpenContent,
    TokenKind::ClosedContent,
    TokenKind::Assign,
    TokenKind::ListSep,
    TokenKind::OpenList,
    TokenKind::ClosedList,
    TokenKind::Join,
];

// Compiled once, shared by every parse; indexed by discriminant.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ALL_KINDS
        .iter()
        .map(|kind| Regex::new(kind.pattern()).expect("token patterns are valid"))
        .collect()
});

impl TokenKind {
    pub fn pattern(self) -> &'static str {
        match self {
            TokenKind::Num => r"-?[0-9]+(\.[0-9]+)?",
            TokenKind::BareString => r"[A-Za-z][A-Za-z0-9_]*",
            TokenKind::Name => r"[A-Za-z][.A-Za-z0-9_]*",
            TokenKind::OpenContent => r"\(",
            TokenKind::ClosedContent => r"\)",
            TokenKind::Assign => r"=",
            TokenKind::ListSep => r";",
            TokenKind::OpenList => r"\[",
            TokenKind::ClosedList => r"\]",
            TokenKind::Join => r"\*",
        }
    }

    /// Literal spelling used when rendering a map back to text.
    /// Empty for the content-carrying kinds.
    pub fn rendered(self) -> &'static str {
        match self {
            TokenKind::Num | TokenKind::BareString | TokenKind::Name => "",
            TokenKind::OpenContent => "(",
            TokenKind::ClosedContent => ")",
            TokenKind::Assign => "=",
            TokenKind::ListSep => ";",
            TokenKind::OpenList => "[",
            TokenKind::ClosedList => "]",
            TokenKind::Join => "*",
        }
    }

    fn regex(self) -> &'static Regex {
        &PATTERNS[self as usize]
    }

    /// Match this kind anchored at byte offset `i`.
    ///
    /// The pattern must match starting exactly at `i`; a match found further
    /// along the text is a miss, and whitespace is never skipped.
    pub fn next(self, s: &str, i: usize) -> Option<Token> {
        let m = self.regex().find_at(s, i)?;
        if m.start() != i {
            return None;
        }
        Some(Token::new(m.start(), m.end()))
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokenKind::Num => "number",
            TokenKind::BareString => "string",
            TokenKind::Name => "name",
            TokenKind::OpenContent => "'('",
            TokenKind::ClosedContent => "')'",
            TokenKind::Assign => "'='",
            TokenKind::ListSep => "';'",
            TokenKind::OpenList => "'['",
            TokenKind::ClosedList => "']'",
            TokenKind::Join => "'*'",
        })
    }
}

#[test]
fn test_anchored_matching() {
    assert_eq!(TokenKind::Num.next("x12", 1), Some(Token::new(1, 3)));
    assert_eq!(TokenKind::Num.next("x12", 0), None);
    assert_eq!(TokenKind::Num.next(" 12", 0), None);
}

#[test]
fn test_number_forms() {
    assert_eq!(TokenKind::Num.next("42", 0), Some(Token::new(0, 2)));
    assert_eq!(TokenKind::Num.next("-1.5)", 0), Some(Token::new(0, 4)));
    // A bare trailing dot is not part of the number
    assert_eq!(TokenKind::Num.next("1.", 0), Some(Token::new(0, 1)));
}

#[test]
fn test_name_allows_namespace_separator() {
    assert_eq!(TokenKind::Name.next("s.a.rw(", 0), Some(Token::new(0, 6)));
    assert_eq!(TokenKind::BareString.next("s.a.rw(", 0), Some(Token::new(0, 1)));
}

#[test]
fn test_punctuation() {
    let cases = [
        (TokenKind::OpenContent, "("),
        (TokenKind::ClosedContent, ")"),
        (TokenKind::Assign, "="),
        (TokenKind::ListSep, ";"),
        (TokenKind::OpenList, "["),
        (TokenKind::ClosedList, "]"),
        (TokenKind::Join, "*"),
    ];
    for (kind, literal) in cases {
        assert_eq!(kind.next(literal, 0), Some(Token::new(0, 1)));
        assert_eq!(kind.rendered(), literal);
    }
}
