//! Tokeniser for the reference language, generated with `logos`.
//!
//! Whitespace and comments are collected as leading trivia of the token that
//! follows them. Trailing trivia ends up on the end-of-file token.

use logos::{Lexer, Logos};

use crate::kind::SyntaxKind;

/// Lexemes recognised by the generated lexer. Keywords lex as [`Word`] and
/// punctuation as [`Punctuation`]; the kind tables in [`SyntaxKind`] refine
/// them.
///
/// [`Word`]: Lexeme::Word
/// [`Punctuation`]: Lexeme::Punctuation
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"\s+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    /// Runs to the closing `*/`, or to the end of input when unterminated.
    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Word,

    #[regex(r"[0-9]+(\.[0-9]+)?[\p{L}\p{N}_]*")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    #[regex(r"'([^'\\\n]|\\.)*")]
    UnterminatedChar,

    #[regex(r"==|!=|<=|>=|\+\+|\+=|--|-=|&&|\|\||[{}()\[\];,.:=!<>+\-*/%]")]
    Punctuation,
}

fn block_comment(lexer: &mut Lexer<'_, Lexeme>) {
    let rest = lexer.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + "*/".len());
    lexer.bump(len);
}

impl Lexeme {
    /// Returns the token kind for `text`, or `None` for trivia.
    fn token_kind(self, text: &str) -> Option<SyntaxKind> {
        match self {
            Self::Whitespace | Self::LineComment | Self::BlockComment => None,
            Self::Word => {
                Some(SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::IdentifierToken))
            }
            Self::Number => Some(SyntaxKind::NumericLiteralToken),
            Self::String => Some(SyntaxKind::StringLiteralToken),
            Self::Char => Some(SyntaxKind::CharacterLiteralToken),
            Self::UnterminatedString | Self::UnterminatedChar => Some(SyntaxKind::BadToken),
            Self::Punctuation => {
                Some(SyntaxKind::from_punctuation(text).unwrap_or(SyntaxKind::BadToken))
            }
        }
    }
}

/// A token borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawToken<'a> {
    pub(crate) kind: SyntaxKind,
    pub(crate) leading: &'a str,
    pub(crate) text: &'a str,
    /// `leading` followed by `text`.
    pub(crate) full: &'a str,
}

/// Splits `source` into tokens. The last token is always end-of-file.
pub(crate) fn tokenize(source: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(source);
    let mut trivia_start = 0;

    while let Some(lexeme) = lexer.next() {
        let kind = match lexeme {
            Ok(lexeme) => match lexeme.token_kind(lexer.slice()) {
                Some(kind) => kind,
                None => continue,
            },
            Err(()) => {
                align_to_char_boundary(&mut lexer, source);
                SyntaxKind::BadToken
            }
        };
        let span = lexer.span();
        tokens.push(RawToken {
            kind,
            leading: source.get(trivia_start..span.start).unwrap_or_default(),
            text: source.get(span.clone()).unwrap_or_default(),
            full: source.get(trivia_start..span.end).unwrap_or_default(),
        });
        trivia_start = span.end;
    }

    let trailing = source.get(trivia_start..).unwrap_or_default();
    tokens.push(RawToken {
        kind: SyntaxKind::EndOfFileToken,
        leading: trailing,
        text: "",
        full: trailing,
    });
    tokens
}

/// Extends an error lexeme so it never splits a multi-byte character.
fn align_to_char_boundary(lexer: &mut Lexer<'_, Lexeme>, source: &str) {
    let end = lexer.span().end;
    let aligned = (end..=source.len())
        .find(|index| source.is_char_boundary(*index))
        .unwrap_or(end);
    lexer.bump(aligned - end);
}

/// Returns the byte length of the whitespace and comments at the start of
/// `text`.
pub(crate) fn leading_trivia_len(text: &str) -> usize {
    let mut lexer = Lexeme::lexer(text);
    let mut len = 0;
    while let Some(Ok(lexeme)) = lexer.next() {
        if lexeme.token_kind(lexer.slice()).is_some() {
            break;
        }
        len = lexer.span().end;
    }
    len
}
