//! Department hierarchy models.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A department as returned by the flat list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub dept_name: String,
    /// Short unique code.
    #[serde(default)]
    pub dept_code: Option<String>,
    /// Parent department, `None` for a root.
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// A node of the department tree endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTreeNode {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub dept_name: String,
    /// Short unique code.
    #[serde(default)]
    pub dept_code: Option<String>,
    /// Child departments.
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<DepartmentTreeNode>,
}

impl DepartmentTreeNode {
    /// Finds a node by ID in this subtree, depth first.
    pub fn find(&self, id: i64) -> Option<&DepartmentTreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Returns the IDs of this node and all its descendants, depth first.
    pub fn subtree_ids(&self) -> Vec<i64> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<i64>) {
        ids.push(self.id);
        for child in &self.children {
            child.collect_ids(ids);
        }
    }

    /// Flattens the subtree into `(depth, node)` pairs for indented display.
    pub fn flatten(&self) -> Vec<(usize, &DepartmentTreeNode)> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            for child in node.children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }
}
