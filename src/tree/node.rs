use super::parser::Segment;
use std::fmt::{self, Debug, Formatter};

/// One segment position in a method's routing tree.
#[derive(Default)]
pub(crate) struct Node {
    // The route pattern terminating here, e.g. `/p/:lang`.
    pattern: Option<String>,
    // The segment this node matches, e.g. `:lang`.
    part: String,
    children: Vec<Node>,
    wild: bool,
}

impl Node {
    pub(crate) fn new() -> Node {
        Node::default()
    }

    fn child(part: &str) -> Node {
        Node {
            pattern: None,
            part: part.to_owned(),
            children: Vec::new(),
            wild: Segment::classify(part).is_wild(),
        }
    }

    pub(crate) fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Extends the tree so that following `parts` from this node ends on a node storing
    /// `pattern`. Returns the pattern it replaced, if any.
    pub(crate) fn insert(&mut self, pattern: &str, parts: &[&str], depth: usize) -> Option<String> {
        if parts.len() == depth {
            return self.pattern.replace(pattern.to_owned());
        }

        let part = parts[depth];
        let idx = match self.match_child(part) {
            Some(idx) => idx,
            None => {
                self.children.push(Node::child(part));
                self.children.len() - 1
            }
        };

        self.children[idx].insert(pattern, parts, depth + 1)
    }

    /// Depth-first, first-match search. Siblings are tried in insertion order and a wild
    /// node carrying a pattern accepts whatever is left of the path.
    pub(crate) fn search(&self, parts: &[&str], depth: usize) -> Option<&Node> {
        if parts.len() == depth || self.wild {
            if self.pattern.is_some() {
                return Some(self);
            }
            if parts.len() == depth {
                return None;
            }
        }

        let part = parts[depth];
        self.children
            .iter()
            .filter(|child| child.part == part || child.wild)
            .find_map(|child| child.search(parts, depth + 1))
    }

    /// Collects every pattern terminating in this subtree, parents before children.
    pub(crate) fn travel<'a>(&'a self, list: &mut Vec<&'a str>) {
        if let Some(pattern) = self.pattern.as_deref() {
            list.push(pattern);
        }
        for child in &self.children {
            child.travel(list);
        }
    }

    // The first child matching `part` verbatim or being wild, in insertion order.
    fn match_child(&self, part: &str) -> Option<usize> {
        self.children.iter().position(|child| child.part == part || child.wild)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node{{pattern={:?}, part={:?}, wild={}, children={:?}}}",
            self.pattern, self.part, self.wild, self.children
        )
    }
}
