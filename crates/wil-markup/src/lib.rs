//! Line reader, tree builder, and data model for the **Widget Indentation
//! Language** (`.wil`).
//!
//! A `.wil` document describes one widget tree purely through indentation:
//!
//! ```wil
//! Box:
//!     id: login
//!     PasswordInput:
//!     Button:
//!         text: 'Authenticate'
//!         on_press: authenticate
//!     style:
//!         padding: 50
//! ```
//!
//! Keys starting with an upper-case letter open a widget; every other key is
//! an attribute of the widget one level up. An attribute followed by a deeper
//! block (`style:` above) takes that block as its value.
//!
//! This crate does not know any GUI toolkit. Widgets are realized through the
//! [`Toolkit`] trait; [`NodeToolkit`] builds plain [`WidgetNode`] trees and is
//! what [`parse_str`] uses.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`line`] | `SourceLine`, `LineKind`, `scan` |
//! | [`indent`] | indentation normalization |
//! | [`reader`] | `LineReader` |
//! | [`parser`] | `Loader`, `parse_str`, the tree builder |
//! | [`ast`] | `WidgetNode`, `AttributeMap`, `AttrValue` |
//! | [`toolkit`] | `Toolkit`, `WidgetSpec`, `NodeToolkit` |
//! | [`handlers`] | `HandlerRegistry` |
//! | [`breadcrumb`] | `BreadcrumbAccessor` |
//! | [`serialize`] | `to_markup` |
//! | [`error`] | `Error` |
//!
//! # Quick start
//!
//! ```rust
//! use wil_markup::{BreadcrumbAccessor, parse_str};
//!
//! let src = "
//! Box:
//!     Box:
//!         id: form
//!         Label:
//!             id: greeting
//!             text: 'Hello'
//! ";
//!
//! let root = parse_str(src).unwrap();
//! assert_eq!(root.widget, "Box");
//!
//! let label = BreadcrumbAccessor::new(&root).get("form.greeting").unwrap();
//! assert_eq!(label.text(), Some("Hello"));
//! ```

pub mod ast;
pub mod breadcrumb;
pub mod error;
pub mod handlers;
pub mod indent;
pub mod line;
pub mod options;
pub mod parser;
pub mod reader;
pub mod serialize;
pub mod toolkit;

pub use ast::{AttrValue, AttributeMap, WidgetNode};
pub use breadcrumb::{BreadcrumbAccessor, Tree};
pub use error::{Error, Result};
pub use handlers::HandlerRegistry;
pub use options::{IndentPolicy, ParseOptions};
pub use parser::{Loader, parse_str, parse_str_with};
pub use serialize::to_markup;
pub use toolkit::{NodeToolkit, Toolkit, ToolkitError, WidgetSpec};

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) { parse_str(src).unwrap(); }
    fn err(src: &str) { parse_str(src).unwrap_err(); }

    #[test] fn single_widget() { ok("Box:"); }
    #[test] fn indented_document() { ok("    Box:\n        id: a\n        Label:"); }
    #[test] fn trailing_spaces() { ok("Box:   \n    id: a   "); }
    #[test] fn quoted_sentence() { ok("Label:\n    text: 'Am I living in a box?'"); }
    #[test] fn unterminated_quote() { ok("Label:\n    text: 'Celsius"); }
    #[test] fn url_value() { ok("WebView:\n    url: https://beeware.org/docs?a=1&b=2"); }
    #[test] fn blank_lines_between() { ok("Box:\n\n    Label:\n\n\n    Button:\n"); }
    #[test] fn key_without_colon() { err("Box"); }
    #[test] fn space_before_colon() { err("Box :"); }
    #[test] fn two_roots() { err("Box:\nBox:"); }
    #[test] fn only_attributes() { err("id: x"); }
    #[test] fn empty_input() { err(""); }
    #[test] fn hash_value() { err("Box:\n    color: #ffffff"); }
    #[test] fn comma_value() { err("Box:\n    text: a, b"); }
    #[test] fn tab_indent() { err("Box:\n\tLabel:"); }
}
