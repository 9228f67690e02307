//! # Drive File Picker Model
//!
//! State logic for a two-pane Drive browser: a lazily loaded folder tree
//! sidebar and a flat per-folder file listing, with selection, MIME
//! filtering and breadcrumb navigation.
//!
//! ## Overview
//!
//! - **Tree** (`tree`): tagged folder/file nodes with lazy child loading
//! - **Filter** (`filter`): MIME substring filtering that never hides folders
//! - **Selection** (`selection`): single/multi selection over file ids
//! - **Breadcrumbs** (`breadcrumbs`): ordered navigation path
//! - **Picker** (`picker`): the controller tying the pieces to a `DriveApi`
//!
//! Rendering is the host's job; everything here is model state. Fetch
//! failures never panic or poison the model: they surface as an inline
//! error string and leave a render-able empty state behind.

pub mod breadcrumbs;
pub mod filter;
pub mod picker;
pub mod selection;
pub mod tree;

pub use breadcrumbs::{Breadcrumbs, Crumb};
pub use filter::MimeFilter;
pub use picker::{FilePicker, PickerOptions};
pub use selection::{Selection, SelectionMode};
pub use tree::{FolderNode, FolderTree, TreeNode};
