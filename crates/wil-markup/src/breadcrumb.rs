use crate::ast::WidgetNode;
use crate::error::{Error, Result};

/// A widget tree the breadcrumb accessor can walk.
pub trait Tree: Sized {
    /// The identifier path segments are matched against.
    fn id(&self) -> Option<&str>;
    fn children(&self) -> &[Self];
}

impl Tree for WidgetNode {
    fn id(&self) -> Option<&str> {
        WidgetNode::id(self)
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Finds descendants through dot-separated id paths such as
/// `"c_box.c_input"`.
///
/// Each segment is matched against the *direct* children of the widget the
/// previous segment found, starting with the root's children; the root's own
/// id is never part of the path.
#[derive(Debug, Clone, Copy)]
pub struct BreadcrumbAccessor<'t, N> {
    root: &'t N,
}

impl<'t, N: Tree> BreadcrumbAccessor<'t, N> {
    pub fn new(root: &'t N) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &'t N {
        self.root
    }

    /// Resolve `path`, failing on the first segment without a match.
    pub fn get(&self, path: &str) -> Result<&'t N> {
        let mut current = self.root;
        let mut walked = String::new();

        for segment in path.split('.') {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            current = current
                .children()
                .iter()
                .find(|child| child.id() == Some(segment))
                .ok_or_else(|| Error::Lookup { segment: segment.to_string(), path: walked.clone() })?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    const CONVERTER: &str = "
Box:
    id: main_box
    Box:
        id: f_box
        TextInput:
            id: f_input
    Box:
        id: c_box
        TextInput:
            id: c_input
            readonly: True
    Button:
        id: calculate
";

    fn lookup_err(root: &WidgetNode, path: &str) -> (String, String) {
        match BreadcrumbAccessor::new(root).get(path).unwrap_err() {
            Error::Lookup { segment, path } => (segment, path),
            other => panic!("expected a lookup error, got {other:?}"),
        }
    }

    #[test]
    fn two_segment_path() {
        let root = parse_str(CONVERTER).unwrap();
        let input = BreadcrumbAccessor::new(&root).get("c_box.c_input").unwrap();
        assert_eq!(input.widget, "TextInput");
        assert_eq!(input.attributes.scalar("readonly"), Some("True"));
    }

    #[test]
    fn single_segment_path() {
        let root = parse_str(CONVERTER).unwrap();
        assert_eq!(BreadcrumbAccessor::new(&root).get("calculate").unwrap().widget, "Button");
    }

    #[test]
    fn only_direct_children_match() {
        let root = parse_str(CONVERTER).unwrap();
        let (segment, path) = lookup_err(&root, "f_input");
        assert_eq!((segment.as_str(), path.as_str()), ("f_input", "f_input"));
    }

    #[test]
    fn missing_second_segment() {
        let root = parse_str("Box:\n    Box:\n        id: box1\n        Label:\n            id: label1").unwrap();
        let (segment, path) = lookup_err(&root, "box1.button1");
        assert_eq!(segment, "button1");
        assert_eq!(path, "box1.button1");
    }

    #[test]
    fn root_id_is_not_a_segment() {
        let root = parse_str(CONVERTER).unwrap();
        let (segment, _) = lookup_err(&root, "main_box.f_box");
        assert_eq!(segment, "main_box");
    }

    #[test]
    fn empty_path_is_not_found() {
        let root = parse_str(CONVERTER).unwrap();
        let (segment, _) = lookup_err(&root, "");
        assert_eq!(segment, "");
    }
}
