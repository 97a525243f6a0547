//! The segment trie the registry keeps one of per HTTP method.

pub use self::parser::Segment;

pub(crate) use self::node::Node;
pub(crate) use self::parser::{check_pattern, join_segments, parse_pattern};

mod node;
mod parser;
