//! Arena document tree.
//!
//! The tree is an arena of nodes addressed by stable `NodeId` indices: the
//! `Document` is the single owner, parent links are optional indices used
//! for navigation only, and releasing the whole tree is simply dropping the
//! `Document`. This rules out ownership cycles without any cycle detection
//! at release time.
//!
//! Invariants:
//! - A node has at most one parent, set exactly once at attach time.
//! - Child order equals source (document) order.
//! - No attach can make a node its own ancestor (`append_child` asserts it).

/// Index of a node within its `Document`. Ids are only meaningful for the
/// document that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
}

#[derive(Debug)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
        parent: Option<NodeId>,
    },
    Text {
        text: String,
        parent: Option<NodeId>,
    },
}

/// A parsed document tree.
///
/// The root (id 0) is a synthetic, non-rendering element whose children are
/// the top-level parsed nodes. Read access is accessor-style; the only
/// structural mutations are `create_*`, `append_child` and
/// `append_attribute`, which is all the parser needs.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

/// Tag name of the synthetic document root.
pub const ROOT_TAG: &str = "#document";

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::Element {
                tag: ROOT_TAG.to_string(),
                attributes: Vec::new(),
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena, the synthetic root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root always exists.
        false
    }

    /// Allocate a fresh, detached element with empty attribute and child
    /// sequences.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: None,
        })
    }

    /// Allocate a fresh, detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text {
            text: text.into(),
            parent: None,
        })
    }

    /// Append `child` to the end of `parent`'s child sequence and set the
    /// child's parent back-reference.
    ///
    /// Amortized O(1): children live in a growable vector, there is no
    /// walk-to-the-tail scan. Panics if `child` is already attached, if the
    /// attach would create a cycle, or if `parent` is a text node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.parent(child).is_none(),
            "child is already attached to a parent"
        );
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            assert!(
                node != child,
                "appending would make a node its own ancestor"
            );
            cursor = self.parent(node);
        }

        match &mut self.nodes[parent.index()] {
            NodeData::Element { children, .. } => children.push(child),
            NodeData::Text { .. } => panic!("text nodes cannot have children"),
        }
        match &mut self.nodes[child.index()] {
            NodeData::Element { parent: p, .. } | NodeData::Text { parent: p, .. } => {
                *p = Some(parent);
            }
        }
    }

    /// Append an attribute to an element, in encounter order. Duplicate
    /// names are kept, never merged. A no-op (not an error) on a text node.
    pub fn append_attribute(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[node.index()] {
            attributes.push((name.into(), value.into()));
        }
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        match &self.nodes[id.index()] {
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text { .. } => NodeKind::Text,
        }
    }

    /// Tag name of an element node; `None` for text nodes.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()] {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text { .. } => None,
        }
    }

    /// Content of a text node; `None` for elements.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()] {
            NodeData::Text { text, .. } => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    /// Attributes of an element, in encounter order. Empty for text nodes.
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.index()] {
            NodeData::Element { attributes, .. } => attributes,
            NodeData::Text { .. } => &[],
        }
    }

    /// Children of an element, in document order. Empty for text nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.index()] {
            NodeData::Element { children, .. } => children,
            NodeData::Text { .. } => &[],
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        match &self.nodes[id.index()] {
            NodeData::Element { parent, .. } | NodeData::Text { parent, .. } => *parent,
        }
    }

    fn push(&mut self, node: NodeData) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("node arena exceeds u32::MAX entries");
        self.nodes.push(node);
        NodeId(id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Membership in the fixed set of tags that never carry children, with or
/// without an explicit `/>` in the source.
pub fn is_void_tag(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
