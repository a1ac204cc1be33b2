//! Routes submissions and selections to the content pane

use crate::conversation::Conversation;
use crate::error::Result;
use crate::preview::FilePreview;
use std::time::Duration;
use synapse_types::{Node, SearchFilters};
use tracing::{debug, info};

/// What the content pane shows. Chat and file preview are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentView {
    #[default]
    Welcome,
    Chat,
    File(Node),
}

/// Outcome of selecting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A file was opened in the preview pane
    Opened,
    /// Folders do not change the view; expansion handles them
    Ignored,
}

pub struct QueryRouter {
    view: ContentView,
    conversation: Conversation,
    preview: Option<FilePreview>,
}

impl QueryRouter {
    pub fn new(answer_delay: Duration) -> Self {
        Self {
            view: ContentView::Welcome,
            conversation: Conversation::new(answer_delay),
            preview: None,
        }
    }

    pub fn view(&self) -> &ContentView {
        &self.view
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    /// Preview of the selected file, while it is shown
    pub fn preview(&self) -> Option<&FilePreview> {
        match self.view {
            ContentView::File(_) => self.preview.as_ref(),
            _ => None,
        }
    }

    pub fn preview_mut(&mut self) -> Option<&mut FilePreview> {
        match self.view {
            ContentView::File(_) => self.preview.as_mut(),
            _ => None,
        }
    }

    /// Switch to chat and seed the assistant with the filters.
    ///
    /// The switch happens whatever the search found. An answer still pending
    /// from an earlier submission is superseded.
    pub fn submit_search(&mut self, filters: &SearchFilters, supporting: Option<Vec<String>>) -> Result<()> {
        filters.validate()?;

        self.conversation.close();
        self.conversation.send_with_context(&filters.to_prompt(), supporting)?;
        self.view = ContentView::Chat;
        info!("Routed search '{}' to the assistant", filters.query.trim());
        Ok(())
    }

    /// Open a file in the preview pane; folders are ignored
    pub fn select_node(&mut self, node: &Node) -> Selection {
        if node.is_folder() {
            return Selection::Ignored;
        }

        let same_file = self
            .preview
            .as_ref()
            .map_or(false, |p| p.file_id() == node.id);
        if !same_file {
            self.preview = Some(FilePreview::for_node(node));
        }
        self.view = ContentView::File(node.clone());
        debug!("Showing file {}", node.name);
        Selection::Opened
    }

    /// Close the preview and return to the welcome pane
    pub fn close_file(&mut self) {
        if matches!(self.view, ContentView::File(_)) {
            self.view = ContentView::Welcome;
        }
    }

    /// Show the retained chat again. False when there is nothing to show.
    pub fn resume_chat(&mut self) -> bool {
        if self.conversation.transcript().is_empty() {
            return false;
        }
        self.view = ContentView::Chat;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynapseError;

    fn router() -> QueryRouter {
        QueryRouter::new(Duration::from_millis(1500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_switches_to_chat_even_without_matches() {
        let mut router = router();
        assert_eq!(router.view(), &ContentView::Welcome);

        router.submit_search(&SearchFilters::new("zebra"), Some(vec![])).unwrap();
        assert_eq!(router.view(), &ContentView::Chat);
        assert_eq!(router.conversation().transcript().len(), 1);
        assert!(router.conversation().is_loading());
    }

    #[test]
    fn test_blank_submission_rejected() {
        let mut router = router();
        let err = router.submit_search(&SearchFilters::new("  "), None).unwrap_err();
        assert!(matches!(err, SynapseError::ValidationRejected(ref m) if m == "Search query is required"));
        assert_eq!(router.view(), &ContentView::Welcome);
    }

    #[tokio::test(start_paused = true)]
    async fn test_file_selection_replaces_chat_and_keeps_transcript() {
        let mut router = router();
        router.submit_search(&SearchFilters::new("revenue"), None).unwrap();
        router.conversation_mut().await_reply().await.unwrap().unwrap();

        let file = Node::file("1-1", "Q4_Report.pdf");
        assert_eq!(router.select_node(&file), Selection::Opened);
        assert_eq!(router.view(), &ContentView::File(file));
        assert_eq!(router.conversation().transcript().len(), 2);

        router.close_file();
        assert_eq!(router.view(), &ContentView::Welcome);
        assert!(router.resume_chat());
        assert_eq!(router.view(), &ContentView::Chat);
    }

    #[test]
    fn test_folder_selection_is_ignored() {
        let mut router = router();
        let folder = Node::folder("1", "Documents", vec![]);
        assert_eq!(router.select_node(&folder), Selection::Ignored);
        assert_eq!(router.view(), &ContentView::Welcome);
        assert!(!router.resume_chat());
    }

    #[test]
    fn test_reselecting_file_keeps_draft() {
        let mut router = router();
        let file = Node::file("3", "Project_Brief.md");
        router.select_node(&file);
        if let Some(preview) = router.preview_mut() {
            preview.begin_edit();
            preview.set_draft("draft");
        }

        router.select_node(&file);
        assert_eq!(router.preview().map(|p| p.displayed()), Some("draft"));

        router.select_node(&Node::file("1-1", "Q4_Report.pdf"));
        assert_eq!(router.preview().map(|p| p.is_editing()), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_search_supersedes_pending_answer() {
        let mut router = router();
        router.submit_search(&SearchFilters::new("first"), None).unwrap();
        router.submit_search(&SearchFilters::new("second"), None).unwrap();

        let reply = router.conversation_mut().await_reply().await.unwrap().unwrap();
        assert!(reply.text.contains("\"second\""));
        // Two prompts, one answer
        assert_eq!(router.conversation().transcript().len(), 3);
    }
}
