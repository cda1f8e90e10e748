// ABOUTME: ReadableExtractor pulls the main text of a page out of raw markup.
// ABOUTME: Drops page furniture, picks the main container, and emits one line per text block.

use std::collections::HashSet;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::dom::{nesting_depth, MAX_DEPTH};

use super::scoring::{find_top_candidate, is_boilerplate, normalize_spaces, score_content};
use super::ContentExtractor;

/// Selectors for elements never part of readable content.
const DEFAULT_CLEAN_SELECTORS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form",
    "iframe", "button", "select", "textarea",
];

/// Explicit main-content containers, tried in order before scoring.
const MAIN_SELECTORS: &[&str] = &["article", "main", "[role=\"main\"]"];

/// Elements emitted as a single line of text.
const TEXT_BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "pre", "dt", "dd", "figcaption",
    "caption", "summary",
];

/// Elements that flow inside a line instead of breaking it.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "font", "i", "kbd",
    "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u",
    "var", "img", "wbr",
];

/// Default readable-content extractor.
#[derive(Debug, Clone)]
pub struct ReadableExtractor {
    /// Shortest main-container text accepted before falling back to scoring.
    pub min_main_chars: usize,
}

impl Default for ReadableExtractor {
    fn default() -> Self {
        Self { min_main_chars: 1 }
    }
}

impl ContentExtractor for ReadableExtractor {
    fn extract(&self, html: &str) -> Option<String> {
        let doc = Html::parse_document(html);
        let depth = nesting_depth(doc.tree.root());
        if depth > MAX_DEPTH {
            debug!(depth, "markup too deeply nested to extract");
            return None;
        }
        let skip = build_skip_set(&doc);

        let root = self
            .main_container(&doc, &skip)
            .or_else(|| {
                let scores = score_content(&doc, &skip);
                find_top_candidate(&doc, &scores)
            })
            .or_else(|| body(&doc))
            .unwrap_or_else(|| doc.root_element());
        debug!(root = root.value().name(), "readable root selected");

        let mut blocks = Vec::new();
        let mut pending = String::new();
        collect_blocks(*root, &skip, &mut blocks, &mut pending);
        flush(&mut pending, &mut blocks);

        if blocks.is_empty() {
            None
        } else {
            Some(blocks.join("\n"))
        }
    }
}

impl ReadableExtractor {
    fn main_container<'a>(&self, doc: &'a Html, skip: &HashSet<NodeId>) -> Option<ElementRef<'a>> {
        for sel_str in MAIN_SELECTORS {
            let Ok(selector) = Selector::parse(sel_str) else {
                continue;
            };
            let found = doc
                .select(&selector)
                .filter(|el| !is_skipped(**el, skip))
                .find(|el| {
                    normalize_spaces(&super::scoring::visible_text(*el, skip))
                        .chars()
                        .count()
                        >= self.min_main_chars
                });
            if found.is_some() {
                return found;
            }
        }
        None
    }
}

fn body(doc: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("body").ok()?;
    doc.select(&selector).next()
}

fn build_skip_set(doc: &Html) -> HashSet<NodeId> {
    let mut skip = HashSet::new();
    for sel_str in DEFAULT_CLEAN_SELECTORS {
        if let Ok(selector) = Selector::parse(sel_str) {
            skip.extend(doc.select(&selector).map(|el| el.id()));
        }
    }
    let all = Selector::parse("body *").unwrap();
    for el in doc.select(&all) {
        if is_boilerplate(&el) {
            skip.insert(el.id());
        }
    }
    skip
}

fn is_skipped(node: NodeRef<'_, scraper::Node>, skip: &HashSet<NodeId>) -> bool {
    skip.contains(&node.id()) || node.ancestors().any(|a| skip.contains(&a.id()))
}

fn flush(pending: &mut String, blocks: &mut Vec<String>) {
    let line = normalize_spaces(pending);
    if !line.is_empty() {
        blocks.push(line);
    }
    pending.clear();
}

fn has_tag(tags: &[&str], name: &str) -> bool {
    tags.iter().any(|t| t.eq_ignore_ascii_case(name))
}

fn collect_blocks(
    node: NodeRef<'_, scraper::Node>,
    skip: &HashSet<NodeId>,
    blocks: &mut Vec<String>,
    pending: &mut String,
) {
    for child in node.children() {
        if skip.contains(&child.id()) {
            continue;
        }
        match child.value() {
            scraper::Node::Text(text) => pending.push_str(text),
            scraper::Node::Element(el) => {
                let name = el.name();
                if name.eq_ignore_ascii_case("br") {
                    pending.push(' ');
                } else if name.eq_ignore_ascii_case("tr") {
                    flush(pending, blocks);
                    let row = table_row(child, skip);
                    if !row.is_empty() {
                        blocks.push(row);
                    }
                } else if has_tag(TEXT_BLOCK_TAGS, name) {
                    flush(pending, blocks);
                    let mut text = String::new();
                    inline_text(child, skip, &mut text);
                    flush(&mut text, blocks);
                } else if has_tag(INLINE_TAGS, name) {
                    collect_blocks(child, skip, blocks, pending);
                } else {
                    flush(pending, blocks);
                    collect_blocks(child, skip, blocks, pending);
                    flush(pending, blocks);
                }
            }
            _ => {}
        }
    }
}

fn inline_text(node: NodeRef<'_, scraper::Node>, skip: &HashSet<NodeId>, out: &mut String) {
    for child in node.children() {
        if skip.contains(&child.id()) {
            continue;
        }
        match child.value() {
            scraper::Node::Text(text) => out.push_str(text),
            scraper::Node::Element(el) if el.name().eq_ignore_ascii_case("br") => out.push(' '),
            scraper::Node::Element(_) => inline_text(child, skip, out),
            _ => {}
        }
    }
}

fn table_row(row: NodeRef<'_, scraper::Node>, skip: &HashSet<NodeId>) -> String {
    row.children()
        .filter(|cell| !skip.contains(&cell.id()))
        .filter_map(ElementRef::wrap)
        .filter(|cell| {
            let name = cell.value().name();
            name.eq_ignore_ascii_case("td") || name.eq_ignore_ascii_case("th")
        })
        .map(|cell| {
            let mut text = String::new();
            inline_text(*cell, skip, &mut text);
            normalize_spaces(&text)
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(html: &str) -> Option<String> {
        ReadableExtractor::default().extract(html)
    }

    #[test]
    fn prefers_article_over_navigation() {
        let html = r#"<html><body>
            <nav><a href="/">Início</a></nav>
            <article><h1>Frações</h1><p>Metade de <b>dois</b> é um.</p></article>
            <footer>Rodapé</footer>
        </body></html>"#;
        assert_eq!(extract(html).unwrap(), "Frações\nMetade de dois é um.");
    }

    #[test]
    fn falls_back_to_scored_container() {
        let html = r#"<html><body>
            <div class="sidebar"><p>Links, links, links and more links for everyone</p></div>
            <div class="conteudo">
              <p>Frações representam partes de um inteiro, e aparecem em receitas e medidas.</p>
              <p>Quando dividimos uma pizza em oito pedaços, cada pedaço é um oitavo dela.</p>
            </div>
        </body></html>"#;
        let text = extract(html).unwrap();
        assert!(text.starts_with("Frações representam"));
        assert!(!text.contains("Links"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn tables_become_rows() {
        let html = "<main><table><tr><th>a</th><th>b</th></tr><tr><td>1</td><td></td><td>2</td></tr></table></main>";
        assert_eq!(extract(html).unwrap(), "a | b\n1 | 2");
    }

    #[test]
    fn loose_text_is_kept() {
        let html = "<html><body><div>texto solto<br>segunda parte</div></body></html>";
        assert_eq!(extract(html).unwrap(), "texto solto segunda parte");
    }

    #[test]
    fn empty_page_yields_none() {
        assert_eq!(extract(""), None);
        assert_eq!(extract("<html><body><script>var x = 1;</script></body></html>"), None);
    }

    #[test]
    fn deeply_nested_page_yields_none() {
        let html = format!(
            "<html><body><p>{}texto{}</p></body></html>",
            "<span>".repeat(20_000),
            "</span>".repeat(20_000)
        );
        assert_eq!(extract(&html), None);
    }
}
