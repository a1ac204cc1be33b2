//! Signed-in workspace: tree, expansion and routing owned by one controller

use crate::config::WorkspaceManifest;
use crate::dialogs::{ConversionDialog, PasswordDialog, SyncDialog};
use crate::error::Result;
use crate::expansion::{ExpansionState, VisibleRow};
use crate::ops::{OperationTimings, PasswordVerification, SyncSettings};
use crate::router::{QueryRouter, Selection};
use crate::search::{SearchFilterEngine, SearchHit};
use crate::tree::TreeModel;
use synapse_types::{SearchFilters, SessionContext};
use tracing::debug;

/// What activating a navigation row did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActivation {
    /// A folder was opened or closed
    Toggled { open: bool },
    /// A file was opened in the preview pane
    Opened,
    /// The id is not in the tree
    Ignored,
}

pub struct Workspace {
    session: SessionContext,
    tree: TreeModel,
    expansion: ExpansionState,
    router: QueryRouter,
    timings: OperationTimings,
    rejected_credential: String,
}

impl Workspace {
    /// Only a signed-in session can open a workspace
    pub fn open(manifest: &WorkspaceManifest, session: SessionContext) -> Result<Self> {
        let tree = manifest.tree()?;
        let expansion = ExpansionState::new(&tree);
        debug!("Opened workspace with {} nodes for {}", tree.len(), session.user);
        Ok(Self {
            session,
            expansion,
            tree,
            router: QueryRouter::new(manifest.timings.answer_delay()),
            timings: manifest.timings,
            rejected_credential: manifest.rejected_credential.clone(),
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn router(&self) -> &QueryRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut QueryRouter {
        &mut self.router
    }

    pub fn timings(&self) -> &OperationTimings {
        &self.timings
    }

    /// Navigation rows in display order
    pub fn rows(&self) -> Vec<VisibleRow> {
        self.expansion.visible_rows(&self.tree)
    }

    /// Folder rows toggle; file rows open a preview
    pub fn activate_row(&mut self, id: &str) -> RowActivation {
        let Some(node) = self.tree.find_by_id(id) else {
            return RowActivation::Ignored;
        };
        if node.is_folder() {
            self.expansion.toggle(&self.tree, id);
            return RowActivation::Toggled {
                open: self.expansion.is_open(id),
            };
        }
        match self.router.select_node(node) {
            Selection::Opened => RowActivation::Opened,
            Selection::Ignored => RowActivation::Ignored,
        }
    }

    /// Make a node visible by opening its ancestors
    pub fn reveal(&mut self, id: &str) -> bool {
        self.expansion.open_ancestors_of(&self.tree, id)
    }

    pub fn expand_all(&mut self) {
        self.expansion.expand_all(&self.tree);
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all(&self.tree);
    }

    /// Evaluate filters without routing
    pub fn search(&self, filters: &SearchFilters) -> Vec<SearchHit<'_>> {
        SearchFilterEngine::search(&self.tree, &filters.clone().normalized())
    }

    /// Submit a search: compute matches, then hand the query and the matched
    /// names to the assistant. Returns the matched ids.
    pub fn submit(&mut self, filters: &SearchFilters) -> Result<Vec<String>> {
        let filters = filters.clone().normalized();
        filters.validate()?;

        let hits = SearchFilterEngine::search(&self.tree, &filters);
        let ids: Vec<String> = hits.iter().map(|hit| hit.node.id.clone()).collect();
        let names: Vec<String> = hits.iter().map(|hit| hit.node.name.clone()).collect();

        self.router.submit_search(&filters, Some(names))?;
        Ok(ids)
    }

    /// Conversion dialog for a file; `None` for folders and unknown ids
    pub fn conversion_dialog(&self, id: &str) -> Option<ConversionDialog> {
        let node = self.tree.find_by_id(id).filter(|n| n.is_file())?;
        Some(ConversionDialog::open(node, &self.timings))
    }

    pub fn password_dialog(&self, id: &str) -> Option<PasswordDialog> {
        let node = self.tree.find_by_id(id).filter(|n| n.is_file())?;
        let verification =
            PasswordVerification::new(self.rejected_credential.clone(), self.timings.verify_delay());
        Some(PasswordDialog::open(node.name.clone(), verification))
    }

    pub fn sync_dialog(&self, settings: SyncSettings) -> SyncDialog {
        SyncDialog::open(settings, &self.timings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::ContentView;
    use synapse_types::SearchScope;

    fn workspace() -> Workspace {
        Workspace::open(&WorkspaceManifest::sample(), SessionContext::new("tester")).unwrap()
    }

    #[test]
    fn test_activate_rows() {
        let mut ws = workspace();
        assert_eq!(ws.rows().len(), 4);

        assert_eq!(ws.activate_row("1"), RowActivation::Toggled { open: true });
        assert_eq!(ws.rows().len(), 7);

        assert_eq!(ws.activate_row("1-2"), RowActivation::Opened);
        assert!(matches!(ws.router().view(), ContentView::File(ref n) if n.id == "1-2"));

        assert_eq!(ws.activate_row("nope"), RowActivation::Ignored);
    }

    #[test]
    fn test_reveal_opens_ancestors() {
        let mut ws = workspace();
        assert!(ws.reveal("2-1"));
        let ids: Vec<String> = ws.rows().into_iter().map(|r| r.id).collect();
        assert!(ids.contains(&"2-1".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_routes_matches_to_assistant() {
        let mut ws = workspace();
        let filters = SearchFilters::new("revenue").with_scope(SearchScope::Content);
        assert_eq!(ws.submit(&filters).unwrap(), vec!["1-1"]);
        assert_eq!(ws.router().view(), &ContentView::Chat);

        let reply = ws.router_mut().conversation_mut().await_reply().await.unwrap().unwrap();
        assert!(reply.text.contains("Found 1 related document in your workspace"));
        assert!(reply.text.contains("Q4_Report.pdf"));
    }

    #[test]
    fn test_sentinel_facets_are_absent() {
        let ws = workspace();
        let mut filters = SearchFilters::new("pdf");
        filters.directory = Some("all".to_string());
        filters.file_type = Some("ALL".to_string());
        assert_eq!(ws.search(&filters).len(), 2);
    }

    #[test]
    fn test_dialogs_only_for_files() {
        let ws = workspace();
        assert!(ws.conversion_dialog("1").is_none());
        assert!(ws.conversion_dialog("missing").is_none());
        assert_eq!(ws.conversion_dialog("1-3").map(|d| d.targets().len()), Some(3));
        assert!(ws.password_dialog("2-2").is_some());
    }
}
