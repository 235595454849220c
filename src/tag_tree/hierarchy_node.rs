use serde::Serialize;

/// One node of the treemap-ready tag hierarchy.
///
/// Leaves serialize without a `children` field and the synthetic root without
/// a `size` field, which is what d3-style treemap layouts branch on.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub name: String,
    pub size: Option<f64>,
    pub children: Vec<HierarchyNode>,
    is_root: bool,
}

pub const ROOT_NAME: &str = "HED";

impl Serialize for HierarchyNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let field_count = 1
            + usize::from(self.size.is_some())
            + usize::from(self.is_root || !self.children.is_empty());

        let mut state = serializer.serialize_struct("HierarchyNode", field_count)?;
        state.serialize_field("name", &self.name)?;
        if let Some(size) = &self.size {
            state.serialize_field("size", size)?;
        }
        if self.is_root || !self.children.is_empty() {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

impl HierarchyNode {
    pub fn new(tag: &str, count: f64, size: f64) -> Self {
        HierarchyNode {
            name: format!("{} ({})", tag, count),
            size: Some(size),
            children: Vec::new(),
            is_root: false,
        }
    }

    pub fn root() -> Self {
        HierarchyNode {
            name: ROOT_NAME.to_string(),
            size: None,
            children: Vec::new(),
            is_root: true,
        }
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn with_children(mut self, children: Vec<HierarchyNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes below this one, not counting itself.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&HierarchyNode> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_name(name))
    }
}
