// ABOUTME: Owned HTML document tree plus parsing, serialization and cleanup rules.
// ABOUTME: Parses with scraper, converts the ego_tree into typed nodes the cleaners mutate in place.

//! DOM utilities for HTML document manipulation.
//!
//! Markup is parsed with `scraper` and converted into an owned tree of
//! [`Node`]s. The tree is mutated in place by the rules in [`cleaners`] and
//! written back out with [`Document::to_html`].

pub mod cleaners;
mod node;
mod parse;
mod serialize;

pub use node::{Doctype, Document, Element, Node};
pub use parse::{nesting_depth, NestingTooDeep, MAX_DEPTH};
pub use serialize::{escape_attr, escape_text, is_void_element};
