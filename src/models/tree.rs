// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Nested directory listing produced by the tree walker.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// How paths are recorded in a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathMode {
    /// Canonical absolute paths for files and directory keys.
    #[default]
    Absolute,
    /// Basenames only.
    Relative,
    /// Two independent trees, one of each kind.
    Both,
}

/// One item of a directory node, in listing order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEntry {
    File(String),
    Dir { key: String, node: TreeNode },
}

/// Contents of one directory.
///
/// Files and subdirectories share one insertion-ordered list; nothing is sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeNode {
    entries: Vec<TreeEntry>,
}

impl TreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_file(&mut self, path: impl Into<String>) {
        self.entries.push(TreeEntry::File(path.into()));
    }

    pub fn push_dir(&mut self, key: impl Into<String>, node: TreeNode) {
        self.entries.push(TreeEntry::Dir {
            key: key.into(),
            node,
        });
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File entries of this node only.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            TreeEntry::File(path) => Some(path.as_str()),
            TreeEntry::Dir { .. } => None,
        })
    }

    /// Direct subdirectories of this node.
    pub fn dirs(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.entries.iter().filter_map(|entry| match entry {
            TreeEntry::Dir { key, node } => Some((key.as_str(), node)),
            TreeEntry::File(_) => None,
        })
    }

    /// Subdirectory stored under `key`.
    pub fn dir(&self, key: &str) -> Option<&TreeNode> {
        self.dirs().find(|(k, _)| *k == key).map(|(_, node)| node)
    }

    /// Every file path and directory key at any depth, depth-first.
    pub fn all_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            for entry in node.entries() {
                match entry {
                    TreeEntry::File(path) => out.push(path.as_str()),
                    TreeEntry::Dir { key, node } => {
                        out.push(key.as_str());
                        stack.push(node);
                    }
                }
            }
        }
        out
    }
}

/// Serialized as a map: files under their running index (`"0"`, `"1"`, …),
/// directories under their key.
///
/// Keys are not disambiguated. In relative mode a directory named `0` next to
/// a first file emits two `"0"` members; both are written, but a JSON parser
/// that keeps one value per key will drop one of them. Use
/// [`TreeNode::entries`] when the structure must be exact.
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        let mut index = 0usize;
        for entry in &self.entries {
            match entry {
                TreeEntry::File(path) => {
                    map.serialize_entry(&index.to_string(), path)?;
                    index += 1;
                }
                TreeEntry::Dir { key, node } => map.serialize_entry(key, node)?,
            }
        }
        map.end()
    }
}

/// Result of a walk: one tree, or an absolute/relative pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tree {
    Single(TreeNode),
    Both {
        absolute: TreeNode,
        relative: TreeNode,
    },
}

impl Tree {
    /// The tree in the walk's primary form (absolute for [`Tree::Both`]).
    pub fn primary(&self) -> &TreeNode {
        match self {
            Self::Single(node) => node,
            Self::Both { absolute, .. } => absolute,
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(node) => node.serialize(serializer),
            Self::Both { absolute, relative } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("ABSOLUTE", absolute)?;
                map.serialize_entry("RELATIVE", relative)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Tree, TreeNode};

    fn sample() -> TreeNode {
        let mut sub = TreeNode::new();
        sub.push_file("c.txt");
        let mut root = TreeNode::new();
        root.push_file("a.txt");
        root.push_dir("sub", sub);
        root.push_file("b.txt");
        root
    }

    // Files keep positional keys that skip over directories.
    #[test]
    fn serializes_as_hybrid_map() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"0":"a.txt","sub":{"0":"c.txt"},"1":"b.txt"}"#);
    }

    #[test]
    fn both_mode_serializes_named_siblings() {
        let tree = Tree::Both {
            absolute: TreeNode::new(),
            relative: sample(),
        };
        let json = serde_json::to_value(&tree).unwrap();
        assert!(json["ABSOLUTE"].as_object().unwrap().is_empty());
        assert_eq!(json["RELATIVE"]["sub"]["0"], "c.txt");
    }

    #[test]
    fn accessors_split_files_and_dirs() {
        let root = sample();
        assert_eq!(root.files().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);
        assert_eq!(root.dirs().count(), 1);
        assert!(root.dir("sub").is_some());
        assert!(root.dir("missing").is_none());
        let mut names = root.all_names();
        names.sort_unstable();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt", "sub"]);
    }

    // A directory named like a file index is written as a duplicate key.
    #[test]
    fn numeric_directory_name_duplicates_file_index() {
        let mut zero = TreeNode::new();
        zero.push_file("inner.txt");
        let mut root = TreeNode::new();
        root.push_file("a.txt");
        root.push_dir("0", zero);

        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(json, r#"{"0":"a.txt","0":{"0":"inner.txt"}}"#);
        assert_eq!(root.entries().len(), 2);
    }
}
