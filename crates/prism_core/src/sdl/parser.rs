//! Recursive-descent parser for scene-description text.
//!
//! # Supported Syntax
//!
//! - `camera { location <v> angle n look_at <v> [orthographic] [up <v>] }`
//!   (items in any order, each at most once)
//! - `light_source { <v>, rgb <v> [parallel] }`
//! - `sphere { <v>, n modifiers }`
//! - `plane { <v>, n modifiers }`
//! - `triangle { <v>, <v>, <v> modifiers }`
//! - modifiers: `texture { (pigment | finish)+ }`, or a bare `pigment`/`finish`
//! - `pigment { rgb <v> }`, `finish { reflection n }`
//! - vectors: `<x, y, z>` or the axis literals `x`, `y`, `z`
//! - `#...` lines are kept as directive elements

use std::collections::VecDeque;

use prism_math::{Color, Vector3};
use thiserror::Error;

use super::lexer::{tokenize, Token, TokenKind};
use super::params::{Element, ParamList, ParamValue};

/// Malformed scene text.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("syntax error at line {line}, column {column}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Camera items in the order they are checked for presence.
const CAMERA_REQUIRED: [&str; 3] = ["location", "angle", "look_at"];

/// Scene-description parser.
pub struct SceneParser {
    tokens: VecDeque<Token>,
}

impl SceneParser {
    /// Tokenize `content` and prepare to parse it.
    pub fn new(content: &str) -> ParseResult<Self> {
        Ok(Self {
            tokens: tokenize(content)?.into(),
        })
    }

    /// Parse the whole script into top-level elements.
    pub fn parse(&mut self) -> ParseResult<Vec<Element>> {
        let mut elements = Vec::new();

        loop {
            let token = self.next();
            let element = match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Directive(text) => Element {
                    tag: text.clone(),
                    params: ParamList::new(),
                    line: token.line,
                    column: token.column,
                },
                TokenKind::Ident(name) => {
                    let params = match name.as_str() {
                        "camera" => self.parse_camera()?,
                        "light_source" => self.parse_light()?,
                        "sphere" => self.parse_sphere()?,
                        "plane" => self.parse_plane()?,
                        "triangle" => self.parse_triangle()?,
                        _ => return Err(unexpected(&token, "a scene element")),
                    };
                    Element {
                        tag: name.clone(),
                        params,
                        line: token.line,
                        column: token.column,
                    }
                }
                _ => return Err(unexpected(&token, "a scene element")),
            };
            elements.push(element);
        }

        if elements.is_empty() {
            return Err(SyntaxError {
                line: 1,
                column: 1,
                message: "expected at least one scene element".to_string(),
            });
        }

        log::debug!("Parsed {} scene elements", elements.len());
        Ok(elements)
    }

    fn next(&mut self) -> Token {
        // The lexer always terminates the stream with Eof; keep returning it.
        match self.tokens.pop_front() {
            Some(token) if token.kind == TokenKind::Eof => {
                self.tokens.push_front(token.clone());
                token
            }
            Some(token) => token,
            None => Token {
                kind: TokenKind::Eof,
                line: 1,
                column: 1,
            },
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.front().map(|t| &t.kind)
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek() {
            Some(TokenKind::Ident(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        let token = self.next();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(&token, &kind.to_string()))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<Token> {
        let token = self.next();
        match &token.kind {
            TokenKind::Ident(name) if name == keyword => Ok(token),
            _ => Err(unexpected(&token, &format!("`{}`", keyword))),
        }
    }

    fn parse_number(&mut self) -> ParseResult<f64> {
        let token = self.next();
        match token.kind {
            TokenKind::Number(n) => Ok(n),
            _ => Err(unexpected(&token, "a number")),
        }
    }

    /// `<x, y, z>` or an axis literal.
    fn parse_vector(&mut self) -> ParseResult<Vector3> {
        let token = self.next();
        match &token.kind {
            TokenKind::LAngle => {
                let [x, y, z] = self.parse_triple()?;
                Ok(Vector3::new(x, y, z))
            }
            TokenKind::Ident(name) => match name.as_str() {
                "x" => Ok(Vector3::X),
                "y" => Ok(Vector3::Y),
                "z" => Ok(Vector3::Z),
                _ => Err(unexpected(&token, "a vector")),
            },
            _ => Err(unexpected(&token, "a vector")),
        }
    }

    /// The `n, n, n>` tail of an angle-bracket vector.
    fn parse_triple(&mut self) -> ParseResult<[f64; 3]> {
        let x = self.parse_number()?;
        self.expect(TokenKind::Comma)?;
        let y = self.parse_number()?;
        self.expect(TokenKind::Comma)?;
        let z = self.parse_number()?;
        self.expect(TokenKind::RAngle)?;
        Ok([x, y, z])
    }

    /// `rgb <r, g, b>`
    fn parse_color(&mut self) -> ParseResult<Color> {
        self.expect_keyword("rgb")?;
        self.expect(TokenKind::LAngle)?;
        let [r, g, b] = self.parse_triple()?;
        Ok(Color::new(r, g, b))
    }

    /// `{ rgb <...>+ }` after the `pigment` keyword.
    fn parse_pigment(&mut self) -> ParseResult<ParamList> {
        self.expect(TokenKind::LBrace)?;
        let mut items = ParamList::new();
        loop {
            items.push("rgb", ParamValue::Color(self.parse_color()?));
            if self.peek_ident() != Some("rgb") {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(items)
    }

    /// `{ (reflection n)+ }` after the `finish` keyword.
    fn parse_finish(&mut self) -> ParseResult<ParamList> {
        self.expect(TokenKind::LBrace)?;
        let mut items = ParamList::new();
        loop {
            self.expect_keyword("reflection")?;
            items.push("reflection", ParamValue::Number(self.parse_number()?));
            if self.peek_ident() != Some("reflection") {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(items)
    }

    /// `{ (pigment | finish)+ }` after the `texture` keyword.
    fn parse_texture(&mut self) -> ParseResult<ParamList> {
        self.expect(TokenKind::LBrace)?;
        let mut items = ParamList::new();
        loop {
            let token = self.next();
            match &token.kind {
                TokenKind::Ident(name) if name == "pigment" => {
                    items.push("pigment", ParamValue::List(self.parse_pigment()?));
                }
                TokenKind::Ident(name) if name == "finish" => {
                    items.push("finish", ParamValue::List(self.parse_finish()?));
                }
                _ => return Err(unexpected(&token, "`pigment` or `finish`")),
            }
            if !matches!(self.peek_ident(), Some("pigment" | "finish")) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(items)
    }

    /// Zero or more `texture`, `pigment` or `finish` blocks.
    fn parse_object_modifiers(&mut self, params: &mut ParamList) -> ParseResult<()> {
        while let Some(keyword) = self.peek_ident().map(str::to_owned) {
            match keyword.as_str() {
                "texture" => {
                    self.next();
                    params.push("texture", ParamValue::List(self.parse_texture()?));
                }
                "pigment" => {
                    self.next();
                    params.push("pigment", ParamValue::List(self.parse_pigment()?));
                }
                "finish" => {
                    self.next();
                    params.push("finish", ParamValue::List(self.parse_finish()?));
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn parse_camera(&mut self) -> ParseResult<ParamList> {
        self.expect(TokenKind::LBrace)?;
        let mut params = ParamList::new();

        let close = loop {
            let token = self.next();
            if token.kind == TokenKind::RBrace {
                break token;
            }
            let key = match &token.kind {
                TokenKind::Ident(key) => key.clone(),
                _ => return Err(unexpected(&token, "a camera item or `}`")),
            };

            let value = match key.as_str() {
                "location" | "look_at" | "up" => ParamValue::Vector(self.parse_vector()?),
                "angle" => ParamValue::Number(self.parse_number()?),
                "orthographic" => ParamValue::Marker,
                _ => return Err(unexpected(&token, "a camera item or `}`")),
            };

            if params.contains(&[key.as_str()]) {
                return Err(SyntaxError {
                    line: token.line,
                    column: token.column,
                    message: format!("duplicate `{}` in camera", key),
                });
            }
            params.push(key, value);
        };

        if let Some(missing) = CAMERA_REQUIRED.iter().find(|key| !params.contains(&[**key])) {
            return Err(SyntaxError {
                line: close.line,
                column: close.column,
                message: format!("camera is missing `{}`", missing),
            });
        }

        Ok(params)
    }

    fn parse_light(&mut self) -> ParseResult<ParamList> {
        self.expect(TokenKind::LBrace)?;
        let mut params = ParamList::new();
        params.push("location", ParamValue::Vector(self.parse_vector()?));
        self.expect(TokenKind::Comma)?;
        params.push("rgb", ParamValue::Color(self.parse_color()?));
        if self.peek_ident() == Some("parallel") {
            self.next();
            params.push("parallel", ParamValue::Marker);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(params)
    }

    fn parse_sphere(&mut self) -> ParseResult<ParamList> {
        self.expect(TokenKind::LBrace)?;
        let mut params = ParamList::new();
        params.push("location", ParamValue::Vector(self.parse_vector()?));
        self.expect(TokenKind::Comma)?;
        params.push("radius", ParamValue::Number(self.parse_number()?));
        self.parse_object_modifiers(&mut params)?;
        self.expect(TokenKind::RBrace)?;
        Ok(params)
    }

    fn parse_plane(&mut self) -> ParseResult<ParamList> {
        self.expect(TokenKind::LBrace)?;
        let mut params = ParamList::new();
        params.push("normal", ParamValue::Vector(self.parse_vector()?));
        self.expect(TokenKind::Comma)?;
        params.push("distance", ParamValue::Number(self.parse_number()?));
        self.parse_object_modifiers(&mut params)?;
        self.expect(TokenKind::RBrace)?;
        Ok(params)
    }

    fn parse_triangle(&mut self) -> ParseResult<ParamList> {
        self.expect(TokenKind::LBrace)?;
        let mut params = ParamList::new();
        params.push("v0", ParamValue::Vector(self.parse_vector()?));
        self.expect(TokenKind::Comma)?;
        params.push("v1", ParamValue::Vector(self.parse_vector()?));
        self.expect(TokenKind::Comma)?;
        params.push("v2", ParamValue::Vector(self.parse_vector()?));
        self.parse_object_modifiers(&mut params)?;
        self.expect(TokenKind::RBrace)?;
        Ok(params)
    }
}

fn unexpected(token: &Token, expected: &str) -> SyntaxError {
    SyntaxError {
        line: token.line,
        column: token.column,
        message: format!("expected {}, found {}", expected, token.kind),
    }
}

/// Parse scene-description text into top-level elements.
pub fn parse_scene(content: &str) -> ParseResult<Vec<Element>> {
    let mut parser = SceneParser::new(content)?;
    parser.parse()
}
