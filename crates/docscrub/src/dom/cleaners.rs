// ABOUTME: DOM cleanup rules applied in place to a Document by the Cleaner pipeline.
// ABOUTME: Unwraps divs/spans, strips lang/class/id, drops empty tables, images, answers and empty tags.

use super::node::{Document, Element, Node};

// Document skeleton never removed by the empty-tag sweep
const SKELETON_TAGS: &[&str] = &["html", "head", "body"];

/// True for the container inserted around paragraphs that held images.
pub fn is_exercise_container(el: &Element, exercise_class: &str) -> bool {
    el.is("div") && el.has_class(exercise_class)
}

/// Unwrap every `div`, keeping exercise containers.
pub fn remove_all_divs(doc: &mut Document, exercise_class: &str) -> usize {
    doc.unwrap_where(|el| el.is("div") && !is_exercise_container(el, exercise_class))
}

/// Delete the `lang` attribute everywhere.
pub fn remove_lang_attributes(doc: &mut Document) -> usize {
    doc.remove_attr_all("lang")
}

/// True if no descendant of the table carries non-whitespace text.
pub fn is_empty_table(table: &Element) -> bool {
    table.is_blank()
}

/// Delete tables without any text.
pub fn clean_empty_tables(doc: &mut Document) -> usize {
    doc.remove_where(|el| el.is("table") && is_empty_table(el))
}

/// Delete `colgroup` elements with no direct `col` child.
pub fn clean_empty_colgroups(doc: &mut Document) -> usize {
    doc.remove_where(|el| el.is("colgroup") && !el.element_children().any(|c| c.is("col")))
}

/// Delete the `class` attribute everywhere. On exercise containers only the
/// exercise token survives.
pub fn remove_all_classes(doc: &mut Document, exercise_class: &str) -> usize {
    let mut touched = 0;
    doc.for_each_element_mut(|el| {
        if is_exercise_container(el, exercise_class) {
            if el.attr("class") != Some(exercise_class) {
                el.set_attr("class", exercise_class);
                touched += 1;
            }
        } else if el.remove_attr("class") {
            touched += 1;
        }
    });
    touched
}

/// Delete the `id` attribute everywhere.
pub fn remove_all_ids(doc: &mut Document) -> usize {
    doc.remove_attr_all("id")
}

/// Wrap every paragraph holding an image in `<div class="exercise">`.
pub fn wrap_paragraph_with_div(doc: &mut Document, exercise_class: &str) -> usize {
    let wrapper = Element::new("div").with_attr("class", exercise_class);
    doc.wrap_where(
        |el| el.is("p") && el.has_descendant(&|d: &Element| d.is("img")),
        &wrapper,
    )
}

/// Unwrap every `span`.
pub fn remove_spans_tags(doc: &mut Document) -> usize {
    doc.unwrap_where(|el| el.is("span"))
}

/// Delete every `img`.
pub fn remove_imgs_tags(doc: &mut Document) -> usize {
    doc.remove_where(|el| el.is("img"))
}

/// True if the trimmed paragraph text starts with one of the prefixes.
/// Matching is case and accent sensitive.
pub fn is_answer_paragraph(el: &Element, prefixes: &[String]) -> bool {
    if !el.is("p") {
        return false;
    }
    let text = el.text();
    let text = text.trim();
    prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && text.starts_with(prefix.as_str()))
}

/// Delete paragraphs that open with an answer prefix.
pub fn remove_answers(doc: &mut Document, prefixes: &[String]) -> usize {
    doc.remove_where(|el| is_answer_paragraph(el, prefixes))
}

/// Delete every element whose trimmed text is empty. The `html`/`head`/`body`
/// skeleton stays and nothing inside `head` is touched.
pub fn remove_empty_tags(doc: &mut Document) -> usize {
    sweep_empty(doc.nodes_mut())
}

fn sweep_empty(nodes: &mut Vec<Node>) -> usize {
    let mut removed = 0;
    nodes.retain(|node| match node {
        Node::Element(el) if !is_skeleton(el) && el.is_blank() => {
            removed += 1;
            false
        }
        _ => true,
    });
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            if !el.is("head") {
                removed += sweep_empty(&mut el.children);
            }
        }
    }
    removed
}

fn is_skeleton(el: &Element) -> bool {
    SKELETON_TAGS.iter().any(|t| el.is(t))
}
