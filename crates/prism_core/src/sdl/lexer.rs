//! Tokenizer for scene-description text.
//!
//! Produces a flat token list with 1-based line/column positions. Comments
//! (`// ...` and `/* ... */`) and whitespace are dropped; `#` lines become a
//! single [`TokenKind::Directive`] token holding the trimmed line.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::parser::{ParseResult, SyntaxError};

/// Kinds of tokens in the scene language.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LAngle,
    RAngle,
    Comma,
    Number(f64),
    Ident(String),
    Directive(String),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::LAngle => write!(f, "`<`"),
            TokenKind::RAngle => write!(f, "`>`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Ident(name) => write!(f, "`{}`", name),
            TokenKind::Directive(text) => write!(f, "directive `{}`", text),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with the position of its first character.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Look one character past `peek`.
    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            line,
            column,
            message: message.into(),
        }
    }

    fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;

            let (line, column) = (self.line, self.column);
            let Some(c) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                    column,
                });
                return Ok(tokens);
            };

            let kind = match c {
                '{' | '}' | '<' | '>' | ',' => {
                    self.bump();
                    match c {
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        '<' => TokenKind::LAngle,
                        '>' => TokenKind::RAngle,
                        _ => TokenKind::Comma,
                    }
                }
                '#' => TokenKind::Directive(self.directive()),
                '+' | '-' | '0'..='9' => self.number(line, column)?,
                c if c.is_ascii_alphabetic() || c == '_' => TokenKind::Ident(self.ident()),
                other => {
                    return Err(self.error(line, column, format!("unexpected character `{}`", other)));
                }
            };

            tokens.push(Token { kind, line, column });
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.peek_second() == Some('*') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(self.error(line, column, "unterminated block comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn directive(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.bump();
        }
        text.trim().to_string()
    }

    fn ident(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        name
    }

    fn digits(&mut self, text: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
                count += 1;
            } else {
                break;
            }
        }
        count
    }

    /// `[+-]?digits(.digits)?([eE][+-]?digits)?`
    fn number(&mut self, line: usize, column: usize) -> ParseResult<TokenKind> {
        let mut text = String::new();

        if let Some(sign @ ('+' | '-')) = self.peek() {
            text.push(sign);
            self.bump();
        }

        if self.digits(&mut text) == 0 {
            return Err(self.error(line, column, format!("expected digits after `{}`", text)));
        }

        if self.peek() == Some('.') {
            text.push('.');
            self.bump();
            if self.digits(&mut text) == 0 {
                return Err(self.error(line, column, format!("expected digits after `{}`", text)));
            }
        }

        if let Some(e @ ('e' | 'E')) = self.peek() {
            let exponent_follows = match self.peek_second() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    ahead.next();
                    matches!(ahead.next(), Some(c) if c.is_ascii_digit())
                }
                _ => false,
            };
            if exponent_follows {
                text.push(e);
                self.bump();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    text.push(sign);
                    self.bump();
                }
                self.digits(&mut text);
            }
        }

        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| self.error(line, column, format!("invalid number `{}`", text)))
    }
}

/// Split scene text into tokens. The last token is always `Eof`.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("1 1.3 -1.3 +2 1e5 1e-5 1.33E5"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Number(1.3),
                TokenKind::Number(-1.3),
                TokenKind::Number(2.0),
                TokenKind::Number(1e5),
                TokenKind::Number(1e-5),
                TokenKind::Number(1.33e5),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_vector_tokens() {
        assert_eq!(
            kinds("<1.3, -5, +1.5>"),
            vec![
                TokenKind::LAngle,
                TokenKind::Number(1.3),
                TokenKind::Comma,
                TokenKind::Number(-5.0),
                TokenKind::Comma,
                TokenKind::Number(1.5),
                TokenKind::RAngle,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_and_braces() {
        assert_eq!(
            kinds("look_at{y}"),
            vec![
                TokenKind::Ident("look_at".into()),
                TokenKind::LBrace,
                TokenKind::Ident("y".into()),
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_directive_runs_to_end_of_line() {
        let tokens = tokenize("#include \"colors.inc\"  \nsphere").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Directive("#include \"colors.inc\"".into()));
        assert_eq!(tokens[1].kind, TokenKind::Ident("sphere".into()));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 1));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("// line comment\n/* block\n comment */ 4"),
            vec![TokenKind::Number(4.0), TokenKind::Eof]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("a\n  <1").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 4));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 5));
    }

    #[test]
    fn test_lexical_errors() {
        let err = tokenize("sphere { @ }").unwrap_err();
        assert_eq!((err.line, err.column), (1, 10));

        let err = tokenize("1.").unwrap_err();
        assert!(err.message.contains("expected digits"));

        let err = tokenize("- 4").unwrap_err();
        assert_eq!(err.column, 1);

        let err = tokenize("/* never closed").unwrap_err();
        assert!(err.message.contains("unterminated"));
    }
}
