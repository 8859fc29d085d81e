//! Folder tree over flat archive paths

use crate::resource::ResourceEntry;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write;

/// One node of the resource tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    /// Slash-joined path from the root to this node.
    pub path: String,
    pub is_directory: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn directory(name: &str, path: String) -> Self {
        Self {
            name: name.to_string(),
            path,
            is_directory: true,
            children: Vec::new(),
        }
    }

    /// Number of file nodes below (and including) this node.
    #[must_use]
    pub fn file_count(&self) -> usize {
        if self.is_directory {
            self.children.iter().map(TreeNode::file_count).sum()
        } else {
            1
        }
    }

    fn sort(&mut self) {
        self.children.sort_by(|a, b| match (a.is_directory, b.is_directory) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });
        for child in &mut self.children {
            child.sort();
        }
    }
}

/// Build a tree from resource paths. The returned root has an empty name.
///
/// Every level lists directories first, then files, each alphabetically.
#[must_use]
pub fn build_tree(resources: &[ResourceEntry]) -> TreeNode {
    build_tree_from_paths(resources.iter().map(ResourceEntry::path))
}

/// Build a tree from bare paths.
#[must_use]
pub fn build_tree_from_paths<'a, I>(paths: I) -> TreeNode
where
    I: IntoIterator<Item = &'a str>,
{
    let mut root = TreeNode::directory("", String::new());

    for path in paths {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let mut current = &mut root;

        for (i, part) in parts.iter().enumerate() {
            let is_last = i == parts.len() - 1;
            let idx = match current.children.iter().position(|c| c.name == *part) {
                Some(idx) => idx,
                None => {
                    current.children.push(TreeNode {
                        name: (*part).to_string(),
                        path: parts[..=i].join("/"),
                        is_directory: !is_last,
                        children: Vec::new(),
                    });
                    current.children.len() - 1
                }
            };
            current = &mut current.children[idx];
        }
    }

    root.sort();
    root
}

/// Render a tree as indented text, two spaces per level, with a trailing `/`
/// on directories.
#[must_use]
pub fn render_tree(root: &TreeNode) -> String {
    fn walk(node: &TreeNode, depth: usize, out: &mut String) {
        for child in &node.children {
            let suffix = if child.is_directory { "/" } else { "" };
            let _ = writeln!(out, "{:indent$}{}{}", "", child.name, suffix, indent = depth * 2);
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(root, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_ordering() {
        let root = build_tree_from_paths([
            "textures/b",
            "zeta",
            "objects/x/gAnim",
            "textures/a",
            "alpha",
        ]);

        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["objects", "textures", "alpha", "zeta"]);
        assert_eq!(root.children[0].children[0].path, "objects/x");
        assert_eq!(root.children[0].children[0].children[0].path, "objects/x/gAnim");
        assert_eq!(root.file_count(), 5);
    }

    #[test]
    fn test_render_tree() {
        let root = build_tree_from_paths(["a/b", "c"]);
        assert_eq!(render_tree(&root), "a/\n  b\nc\n");
    }
}
