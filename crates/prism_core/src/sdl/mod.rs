//! Scene-description language (SDL) support.
//!
//! Parses the small POV-Ray flavoured language into generic [`Element`]s
//! (a tag plus a parameter tree). Typed entities are built from those
//! elements by the classifier in [`crate::scene`].
//!
//! # Example
//!
//! ```
//! use prism_core::sdl::parse_scene;
//!
//! let elements = parse_scene("sphere { <0, 0, 0>, 1 }").unwrap();
//! assert_eq!(elements[0].tag, "sphere");
//! assert_eq!(elements[0].params.number(&["radius"]), Some(1.0));
//! ```

mod lexer;
mod params;
mod parser;

pub use lexer::{tokenize, Token, TokenKind};
pub use params::{Element, ParamList, ParamValue};
pub use parser::{parse_scene, ParseResult, SceneParser, SyntaxError};
