//! Picker controller
//!
//! Ties the tree, listing, selection and breadcrumbs to a `DriveApi`.

use drive_api::{DriveApi, DriveFile};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::breadcrumbs::{Breadcrumbs, Crumb};
use crate::filter::MimeFilter;
use crate::selection::{Selection, SelectionMode};
use crate::tree::FolderTree;

/// Picker construction options
#[derive(Debug, Clone)]
pub struct PickerOptions {
    pub mode: SelectionMode,
    pub filter: Option<MimeFilter>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Multi,
            filter: None,
        }
    }
}

/// Two-pane Drive browser state
///
/// The folder tree drives the sidebar, `listing` the flat file pane. All
/// fetches go through the `DriveApi` seam; failures surface as `last_error`
/// and an empty pane, never as a panic or a poisoned model.
pub struct FilePicker {
    api: Arc<dyn DriveApi>,
    filter: Option<MimeFilter>,
    selection: Selection,
    listing: Vec<DriveFile>,
    breadcrumbs: Breadcrumbs,
    tree: FolderTree,
    root_id: String,
    last_error: Option<String>,
    is_loading: bool,
}

impl FilePicker {
    /// Open the picker at the Drive root
    ///
    /// The root tree level and the root listing are fetched concurrently;
    /// they update disjoint state slices, so completion order is irrelevant.
    #[instrument(skip(api, options))]
    pub async fn open(api: Arc<dyn DriveApi>, options: PickerOptions) -> Self {
        let (tree_result, listing_result) = tokio::join!(api.folder_tree(None), api.list_files(None));

        let mut last_error = None;

        let tree = match tree_result {
            Ok(response) => FolderTree::from_response(response),
            Err(e) => {
                warn!(error = %e, "Root tree fetch failed");
                last_error = Some(e.to_string());
                FolderTree::from_response(drive_api::FolderTreeResponse::fallback(None))
            }
        };

        let listing = match listing_result {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "Root listing fetch failed");
                last_error = Some(e.to_string());
                Vec::new()
            }
        };

        let root_id = tree.root().id.clone();
        let breadcrumbs = Breadcrumbs::new(Crumb::new(root_id.clone(), tree.root().name.clone()));

        Self {
            api,
            filter: options.filter,
            selection: Selection::new(options.mode),
            listing,
            breadcrumbs,
            tree,
            root_id,
            last_error,
            is_loading: false,
        }
    }

    /// The current flat listing, unfiltered
    pub fn listing(&self) -> &[DriveFile] {
        &self.listing
    }

    /// The current listing with the MIME filter applied
    ///
    /// Folders always pass so they stay navigable.
    pub fn filtered_files(&self) -> Vec<&DriveFile> {
        self.listing
            .iter()
            .filter(|file| match &self.filter {
                Some(filter) => filter.matches(file),
                None => true,
            })
            .collect()
    }

    pub fn tree(&self) -> &FolderTree {
        &self.tree
    }

    pub fn breadcrumbs(&self) -> &Breadcrumbs {
        &self.breadcrumbs
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Inline error banner text, if the last fetch failed
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Navigate into a folder, appending it to the breadcrumb path
    pub async fn enter_folder(&mut self, folder_id: &str, name: &str) {
        self.breadcrumbs.enter(Crumb::new(folder_id, name));
        self.load_listing(Some(folder_id.to_string())).await;
    }

    /// Navigate back to the breadcrumb at `index`
    pub async fn navigate_to_crumb(&mut self, index: usize) {
        self.breadcrumbs.truncate_to(index);

        let current = self.breadcrumbs.current().id.clone();
        let folder_id = if current == self.root_id {
            None
        } else {
            Some(current)
        };
        self.load_listing(folder_id).await;
    }

    /// Replace the listing with name-search results
    pub async fn search(&mut self, query: &str) {
        self.is_loading = true;
        self.last_error = None;

        match self.api.search_files(query).await {
            Ok(files) => self.listing = files,
            Err(e) => {
                warn!(error = %e, "File search failed");
                self.listing.clear();
                self.last_error = Some(e.to_string());
            }
        }

        self.is_loading = false;
    }

    /// Lazily load a sidebar folder's children
    pub async fn expand_folder(&mut self, folder_id: &str) {
        if let Err(e) = self.tree.expand(self.api.as_ref(), folder_id).await {
            self.last_error = Some(e.to_string());
        }
    }

    /// Apply a pick to a file in the current listing
    ///
    /// Folders and ids outside the listing are ignored; folders navigate,
    /// they are never selected.
    pub fn toggle(&mut self, file_id: &str) {
        let selectable = self
            .listing
            .iter()
            .any(|file| file.id == file_id && !file.is_folder);

        if selectable {
            self.selection.toggle(file_id);
        } else {
            debug!(file_id, "Ignoring pick outside the selectable listing");
        }
    }

    /// Toggle between full and empty selection of the filtered files
    pub fn toggle_select_all(&mut self) {
        let filtered_file_ids: Vec<String> = self
            .filtered_files()
            .into_iter()
            .filter(|file| !file.is_folder)
            .map(|file| file.id.clone())
            .collect();

        let filtered_file_id_refs: Vec<&str> =
            filtered_file_ids.iter().map(|id| id.as_str()).collect();
        self.selection.toggle_all(&filtered_file_id_refs);
    }

    /// Return the chosen files
    ///
    /// Only files (never folders) that are both selected and present in the
    /// currently loaded listing are returned; selections made in folders
    /// whose listing has been replaced are dropped.
    pub fn confirm(&self) -> Vec<DriveFile> {
        self.listing
            .iter()
            .filter(|file| !file.is_folder && self.selection.contains(&file.id))
            .cloned()
            .collect()
    }

    async fn load_listing(&mut self, folder_id: Option<String>) {
        self.is_loading = true;
        self.last_error = None;

        match self.api.list_files(folder_id).await {
            Ok(files) => self.listing = files,
            Err(e) => {
                warn!(error = %e, "Folder listing fetch failed");
                self.listing.clear();
                self.last_error = Some(e.to_string());
            }
        }

        self.is_loading = false;
    }
}
