//! Breadcrumb navigation path

use serde::{Deserialize, Serialize};

/// One step of the navigation path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub id: String,
    pub name: String,
}

impl Crumb {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ordered navigation path from the root to the current folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumbs {
    crumbs: Vec<Crumb>,
}

impl Breadcrumbs {
    pub fn new(root: Crumb) -> Self {
        Self { crumbs: vec![root] }
    }

    pub fn path(&self) -> &[Crumb] {
        &self.crumbs
    }

    /// The crumb currently navigated to
    pub fn current(&self) -> &Crumb {
        self.crumbs.last().expect("breadcrumbs never empty")
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    /// Navigate back to the crumb at `index`, dropping everything after it
    ///
    /// Out-of-range indices are ignored.
    pub fn truncate_to(&mut self, index: usize) {
        if index < self.crumbs.len() {
            self.crumbs.truncate(index + 1);
        }
    }

    /// Navigate into a folder
    ///
    /// A folder already on the path truncates back to it; a new folder is
    /// appended.
    pub fn enter(&mut self, crumb: Crumb) {
        if let Some(index) = self.crumbs.iter().position(|c| c.id == crumb.id) {
            self.truncate_to(index);
        } else {
            self.crumbs.push(crumb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_abc() -> Breadcrumbs {
        let mut crumbs = Breadcrumbs::new(Crumb::new("root", "My Drive"));
        crumbs.enter(Crumb::new("a", "Projects"));
        crumbs.enter(Crumb::new("b", "Site 12"));
        crumbs.enter(Crumb::new("c", "Photos"));
        crumbs
    }

    #[test]
    fn test_enter_appends_new_folders() {
        let crumbs = path_abc();
        let ids: Vec<&str> = crumbs.path().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "b", "c"]);
    }

    #[test]
    fn test_truncate_keeps_prefix() {
        let mut crumbs = path_abc();
        let original: Vec<Crumb> = crumbs.path().to_vec();

        crumbs.truncate_to(1);

        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs.path(), &original[..2]);
        assert_eq!(crumbs.current().id, "a");
    }

    #[test]
    fn test_truncate_out_of_range_is_noop() {
        let mut crumbs = path_abc();
        crumbs.truncate_to(10);
        assert_eq!(crumbs.len(), 4);
    }

    #[test]
    fn test_enter_existing_folder_truncates() {
        let mut crumbs = path_abc();

        crumbs.enter(Crumb::new("a", "Projects"));

        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs.current().id, "a");
    }

    #[test]
    fn test_root_is_always_reachable() {
        let mut crumbs = path_abc();
        crumbs.truncate_to(0);

        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs.current().id, "root");
    }
}
