// ABOUTME: Readability scoring used to pick the main-content container of a page.
// ABOUTME: Scores paragraphs by length and commas, weights containers by class/id hints.

use ego_tree::NodeId;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};

static POSITIVE_SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|main|page|post|story|text|lesson|exercise|conteudo|atividade")
        .unwrap()
});
static NEGATIVE_SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)adbox|advert|banner|breadcrumb|combx|comment|cookie|footer|footnote|masthead|menu|modal|nav|outbrain|popup|promo|related|share|shoutbox|sidebar|social|sponsor|widget")
        .unwrap()
});
static NON_CANDIDATE_TAGS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(br|b|i|label|hr|area|base|basefont|input|img|link|meta|span|a|html)$")
        .unwrap()
});

/// Score storage using NodeId as key
pub type NodeScores = HashMap<NodeId, i32>;

/// Normalize whitespace in text
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Multi-factor paragraph scoring
pub fn score_paragraph(text: &str) -> i32 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }

    let len = text.chars().count();
    let mut score = text.matches(',').count() as i32;
    score += (len / 50) as i32;

    if len < 20 {
        score -= 10;
    }
    if (50..=200).contains(&len) {
        score += 5;
    }

    score
}

/// Get weight based on className and id patterns
pub fn get_weight(element: &ElementRef) -> i32 {
    let class = element.value().attr("class").unwrap_or("");
    let id = element.value().attr("id").unwrap_or("");
    let mut score = 0i32;

    for hint in [id, class] {
        if hint.is_empty() {
            continue;
        }
        if POSITIVE_SCORE_RE.is_match(hint) {
            score += 25;
        }
        if NEGATIVE_SCORE_RE.is_match(hint) {
            score -= 25;
        }
    }

    score
}

/// True when class/id hints mark the element as page furniture.
pub fn is_boilerplate(element: &ElementRef) -> bool {
    if element.value().name().eq_ignore_ascii_case("body") {
        return false;
    }
    get_weight(element) < 0
}

fn container_base_score(element: &ElementRef) -> i32 {
    let base = match element.value().name().to_lowercase().as_str() {
        "div" | "article" | "section" | "main" => 5,
        "td" | "blockquote" | "ol" | "ul" | "dl" => 3,
        "form" | "address" => -3,
        "th" => -5,
        _ => 0,
    };
    base + get_weight(element)
}

/// Visible text of an element, ignoring skipped subtrees.
pub fn visible_text(element: ElementRef, skip: &HashSet<NodeId>) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        if node.ancestors().any(|a| skip.contains(&a.id())) || skip.contains(&node.id()) {
            continue;
        }
        if let scraper::Node::Text(text) = node.value() {
            out.push_str(text);
        }
    }
    out
}

/// Score paragraphs and propagate to their parent (full) and grandparent (half).
pub fn score_content(doc: &Html, skip: &HashSet<NodeId>) -> NodeScores {
    let mut scores: NodeScores = HashMap::new();
    let selector = Selector::parse("p, pre, td, li").unwrap();

    for element in doc.select(&selector) {
        if skip.contains(&element.id()) || element.ancestors().any(|a| skip.contains(&a.id())) {
            continue;
        }
        let text = normalize_spaces(&visible_text(element, skip));
        if text.chars().count() < 25 {
            continue;
        }
        let score = 1 + score_paragraph(&text).max(0);

        if let Some(parent) = element.parent().and_then(ElementRef::wrap) {
            let entry = scores
                .entry(parent.id())
                .or_insert_with(|| container_base_score(&parent));
            *entry += score;

            if let Some(grandparent) = parent.parent().and_then(ElementRef::wrap) {
                let entry = scores
                    .entry(grandparent.id())
                    .or_insert_with(|| container_base_score(&grandparent));
                *entry += score / 2;
            }
        }
    }

    scores
}

/// Find the top scoring candidate element; ties go to the earlier element.
pub fn find_top_candidate<'a>(doc: &'a Html, scores: &NodeScores) -> Option<ElementRef<'a>> {
    let mut best: Option<ElementRef<'a>> = None;
    let mut top_score = 0i32;

    for element in doc.root_element().descendants().filter_map(ElementRef::wrap) {
        let Some(&score) = scores.get(&element.id()) else {
            continue;
        };
        if NON_CANDIDATE_TAGS_RE.is_match(element.value().name()) {
            continue;
        }
        if score > top_score {
            top_score = score;
            best = Some(element);
        }
    }

    best
}
