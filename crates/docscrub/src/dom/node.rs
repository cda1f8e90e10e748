// ABOUTME: Typed node tree (Document, Element, Node) with query and mutation primitives.
// ABOUTME: Provides find-all, attribute access, wrap, unwrap, remove and recursive text content.

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    Doctype(Doctype),
}

/// `<!DOCTYPE name PUBLIC "public_id" "system_id">`; the ids may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Recursive text content; comments and doctypes contribute nothing.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Comment(_) | Node::Doctype(_) => {}
        }
    }
}

/// An element with a lowercase tag name, ordered unique attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// True when the tag name matches, ignoring ASCII case.
    pub fn is(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Removes an attribute. Returns true if it was present.
    pub fn remove_attr(&mut self, key: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        self.attrs.len() != before
    }

    /// Whitespace-separated class tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Recursive text content of this element.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// True when the recursive text content is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    /// Direct element children.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// True if any descendant element satisfies the predicate.
    pub fn has_descendant(&self, pred: &impl Fn(&Element) -> bool) -> bool {
        self.element_children()
            .any(|child| pred(child) || child.has_descendant(pred))
    }

    /// Same tag and attributes, regardless of children.
    pub fn same_shell(&self, other: &Element) -> bool {
        self.is(&other.name) && self.attrs == other.attrs
    }
}

/// A parsed HTML document: the ordered top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
}

impl Document {
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    /// Recursive text content of the whole document.
    pub fn text(&self) -> String {
        self.nodes.iter().map(Node::text).collect()
    }

    /// All elements satisfying the predicate, in document order.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_matching(&self.nodes, &pred, &mut found);
        found
    }

    /// Matching elements that have no matching ancestor, in document order.
    pub fn find_outermost(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_outermost(&self.nodes, &pred, &mut found);
        found
    }

    /// All elements with the given tag name, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        self.find_all(|el| el.is(tag))
    }

    /// Elements carrying the given attribute, in document order.
    pub fn find_by_attr(&self, key: &str) -> Vec<&Element> {
        self.find_all(|el| el.has_attr(key))
    }

    /// Removes every matching element together with its subtree.
    /// Survivors are searched recursively. Returns the number removed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&Element) -> bool) -> usize {
        remove_matching(&mut self.nodes, &mut pred)
    }

    /// Replaces every matching element with its children.
    /// Nested matches are unwrapped too. Returns the number unwrapped.
    pub fn unwrap_where(&mut self, mut pred: impl FnMut(&Element) -> bool) -> usize {
        unwrap_matching(&mut self.nodes, &mut pred)
    }

    /// Encloses every matching element in a copy of `wrapper`. An element
    /// whose parent already has the wrapper's tag and attributes is left alone.
    /// Returns the number wrapped.
    pub fn wrap_where(&mut self, pred: impl Fn(&Element) -> bool, wrapper: &Element) -> usize {
        wrap_matching(&mut self.nodes, false, &pred, wrapper)
    }

    /// Visits every element mutably in pre-order.
    pub fn for_each_element_mut(&mut self, mut f: impl FnMut(&mut Element)) {
        visit_mut(&mut self.nodes, &mut f);
    }

    /// Removes `key` from every element carrying it. Returns the number touched.
    pub fn remove_attr_all(&mut self, key: &str) -> usize {
        let mut touched = 0;
        self.for_each_element_mut(|el| {
            if el.remove_attr(key) {
                touched += 1;
            }
        });
        touched
    }
}

fn collect_matching<'a>(
    nodes: &'a [Node],
    pred: &impl Fn(&Element) -> bool,
    found: &mut Vec<&'a Element>,
) {
    for node in nodes {
        if let Node::Element(el) = node {
            if pred(el) {
                found.push(el);
            }
            collect_matching(&el.children, pred, found);
        }
    }
}

fn collect_outermost<'a>(
    nodes: &'a [Node],
    pred: &impl Fn(&Element) -> bool,
    found: &mut Vec<&'a Element>,
) {
    for node in nodes {
        if let Node::Element(el) = node {
            if pred(el) {
                found.push(el);
            } else {
                collect_outermost(&el.children, pred, found);
            }
        }
    }
}

fn remove_matching(nodes: &mut Vec<Node>, pred: &mut impl FnMut(&Element) -> bool) -> usize {
    let mut removed = 0;
    nodes.retain(|node| match node {
        Node::Element(el) if pred(el) => {
            removed += 1;
            false
        }
        _ => true,
    });
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            removed += remove_matching(&mut el.children, pred);
        }
    }
    removed
}

fn unwrap_matching(nodes: &mut Vec<Node>, pred: &mut impl FnMut(&Element) -> bool) -> usize {
    let mut unwrapped = 0;
    let old = std::mem::take(nodes);
    nodes.reserve(old.len());
    for node in old {
        match node {
            Node::Element(mut el) => {
                unwrapped += unwrap_matching(&mut el.children, pred);
                if pred(&el) {
                    unwrapped += 1;
                    nodes.extend(el.children);
                } else {
                    nodes.push(Node::Element(el));
                }
            }
            other => nodes.push(other),
        }
    }
    unwrapped
}

fn wrap_matching(
    nodes: &mut Vec<Node>,
    inside_wrapper: bool,
    pred: &impl Fn(&Element) -> bool,
    wrapper: &Element,
) -> usize {
    let mut wrapped = 0;
    for node in nodes.iter_mut() {
        let Node::Element(el) = &mut *node else {
            continue;
        };
        let is_wrapper = el.same_shell(wrapper);
        wrapped += wrap_matching(&mut el.children, is_wrapper, pred, wrapper);

        if !inside_wrapper && pred(el) {
            let inner = std::mem::replace(node, Node::Text(String::new()));
            let mut shell = Element {
                name: wrapper.name.clone(),
                attrs: wrapper.attrs.clone(),
                children: Vec::with_capacity(1),
            };
            shell.children.push(inner);
            *node = Node::Element(shell);
            wrapped += 1;
        }
    }
    wrapped
}

fn visit_mut(nodes: &mut [Node], f: &mut impl FnMut(&mut Element)) {
    for node in nodes {
        if let Node::Element(el) = node {
            f(el);
            visit_mut(&mut el.children, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Document {
        Document::parse_fragment(html).unwrap()
    }

    #[test]
    fn find_all_is_document_order() {
        let d = doc("<div><p>a</p><section><p>b</p></section></div><p>c</p>");
        let texts: Vec<String> = d.find_by_tag("p").iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn find_outermost_skips_nested() {
        let d = doc("<table><tr><td><table><tr><td>in</td></tr></table></td></tr></table>");
        assert_eq!(d.find_by_tag("table").len(), 2);
        assert_eq!(d.find_outermost(|el| el.is("table")).len(), 1);
    }

    #[test]
    fn unwrap_keeps_children_in_place() {
        let mut d = doc("<p>a<span>b<span>c</span></span>d</p>");
        assert_eq!(d.unwrap_where(|el| el.is("span")), 2);
        assert_eq!(d.to_html(), "<p>abcd</p>");
    }

    #[test]
    fn remove_drops_subtree() {
        let mut d = doc("<div><img src=\"a.png\"><p>t</p></div>");
        assert_eq!(d.remove_where(|el| el.is("img")), 1);
        assert_eq!(d.to_html(), "<div><p>t</p></div>");
    }

    #[test]
    fn wrap_skips_already_wrapped() {
        let wrapper = Element::new("div").with_attr("class", "box");
        let mut d = doc("<p>x</p>");
        assert_eq!(d.wrap_where(|el| el.is("p"), &wrapper), 1);
        assert_eq!(d.wrap_where(|el| el.is("p"), &wrapper), 0);
        assert_eq!(d.to_html(), "<div class=\"box\"><p>x</p></div>");
    }

    #[test]
    fn attributes_are_case_insensitive_and_unique() {
        let mut el = Element::new("p").with_attr("lang", "pt");
        el.set_attr("LANG", "en");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.attr("lang"), Some("en"));
        assert!(el.remove_attr("lang"));
        assert!(!el.remove_attr("lang"));
    }

    #[test]
    fn text_ignores_comments() {
        let d = doc("<p>a<!-- hidden -->b</p>");
        assert_eq!(d.text(), "ab");
    }
}
