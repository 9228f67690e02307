//! Folder tree with lazy child loading
//!
//! Nodes are an explicit tagged union rather than a structural guess, so a
//! file can never be mistaken for a folder by the shape of its fields.

use drive_api::{DriveApi, DriveFile, FolderTreeResponse, Result};
use serde::Serialize;
use tracing::{debug, warn};

/// A node of the folder tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    Folder(FolderNode),
    File(DriveFile),
}

impl TreeNode {
    pub fn id(&self) -> &str {
        match self {
            TreeNode::Folder(folder) => &folder.id,
            TreeNode::File(file) => &file.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder(folder) => &folder.name,
            TreeNode::File(file) => &file.name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }
}

/// A folder with lazily loaded children
///
/// `children` is only trustworthy once `is_loaded` is set; `is_loading` is
/// cleared on both the success and the failure path of a fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    pub children: Vec<TreeNode>,
    pub is_loaded: bool,
    pub is_loading: bool,
}

impl FolderNode {
    /// Create an unloaded folder node
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
            is_loaded: false,
            is_loading: false,
        }
    }

    /// Replace children from a fetched listing and mark the node loaded
    fn populate(&mut self, entries: Vec<DriveFile>) {
        self.children = entries
            .into_iter()
            .map(|entry| {
                if entry.is_folder {
                    TreeNode::Folder(FolderNode::new(entry.id, entry.name))
                } else {
                    TreeNode::File(entry)
                }
            })
            .collect();
        self.is_loaded = true;
        self.is_loading = false;
    }

    /// Find a folder node by id in this subtree
    pub fn find(&self, id: &str) -> Option<&FolderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            TreeNode::Folder(folder) => folder.find(id),
            TreeNode::File(_) => None,
        })
    }

    /// Find a folder node by id in this subtree, mutably
    pub fn find_mut(&mut self, id: &str) -> Option<&mut FolderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            TreeNode::Folder(folder) => folder.find_mut(id),
            TreeNode::File(_) => None,
        })
    }
}

/// The navigable folder hierarchy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderTree {
    root: FolderNode,
}

impl FolderTree {
    /// Build a tree from a fetched root level
    pub fn from_response(response: FolderTreeResponse) -> Self {
        let mut root = FolderNode::new(response.id, response.name);
        root.populate(response.children);
        Self { root }
    }

    pub fn root(&self) -> &FolderNode {
        &self.root
    }

    pub fn find(&self, id: &str) -> Option<&FolderNode> {
        self.root.find(id)
    }

    /// Lazily load the children of a folder
    ///
    /// A node fetches its children at most once: nodes already loaded (or
    /// currently loading) are left untouched. On a failed fetch the subtree
    /// simply stays absent and the node can be expanded again later.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error so the caller can surface an inline
    /// banner; the tree itself stays render-able either way.
    pub async fn expand(&mut self, api: &dyn DriveApi, folder_id: &str) -> Result<()> {
        let Some(node) = self.root.find_mut(folder_id) else {
            debug!(folder_id, "Expand requested for unknown folder");
            return Ok(());
        };

        if node.is_loaded || node.is_loading {
            return Ok(());
        }

        node.is_loading = true;

        match api.folder_tree(Some(folder_id.to_string())).await {
            Ok(response) => {
                node.populate(response.children);
                Ok(())
            }
            Err(e) => {
                warn!(folder_id, error = %e, "Folder expansion failed");
                node.is_loading = false;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_api::PathSegment;

    fn folder_entry(id: &str, name: &str) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: "application/vnd.google-apps.folder".to_string(),
            size: None,
            modified_time: None,
            is_folder: true,
            parents: Vec::new(),
            web_view_link: None,
        }
    }

    fn file_entry(id: &str, name: &str) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            size: Some(1024),
            modified_time: None,
            is_folder: false,
            parents: Vec::new(),
            web_view_link: None,
        }
    }

    fn root_response() -> FolderTreeResponse {
        FolderTreeResponse {
            id: "root".to_string(),
            name: "My Drive".to_string(),
            children: vec![
                folder_entry("f1", "Plans"),
                file_entry("d1", "overview.pdf"),
            ],
            path: vec![PathSegment {
                id: "root".to_string(),
                name: "My Drive".to_string(),
            }],
        }
    }

    #[test]
    fn test_from_response_discriminates_kinds() {
        let tree = FolderTree::from_response(root_response());
        let root = tree.root();

        assert!(root.is_loaded);
        assert_eq!(root.children.len(), 2);
        assert!(root.children[0].is_folder());
        assert!(!root.children[1].is_folder());
        assert_eq!(root.children[1].name(), "overview.pdf");
    }

    #[test]
    fn test_child_folders_start_unloaded() {
        let tree = FolderTree::from_response(root_response());
        let child = tree.find("f1").unwrap();

        assert!(!child.is_loaded);
        assert!(!child.is_loading);
        assert!(child.children.is_empty());
    }

    #[test]
    fn test_find_nested() {
        let mut tree = FolderTree::from_response(root_response());
        tree.root
            .find_mut("f1")
            .unwrap()
            .populate(vec![folder_entry("f2", "Structural")]);

        assert!(tree.find("f2").is_some());
        assert!(tree.find("missing").is_none());
        // Files are not folder nodes
        assert!(tree.find("d1").is_none());
    }
}
