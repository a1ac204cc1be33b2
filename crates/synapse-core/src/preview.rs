//! In-memory file preview with a local edit buffer

use synapse_types::Node;

/// Preview of one selected file.
///
/// Saving only updates the in-memory content; nothing is written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreview {
    file_id: String,
    file_name: String,
    content: String,
    draft: Option<String>,
}

impl FilePreview {
    pub fn for_node(node: &Node) -> Self {
        Self::new(node.id.clone(), node.name.clone())
    }

    pub fn new(file_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let content = format!(
            "# {}\n\nThis is a sample file content. You can edit this content and save your changes.\n\nProject Synapse allows you to:\n- View and edit documents\n- Search across all files\n- Get AI-powered insights\n- Collaborate with your team",
            file_name
        );
        Self {
            file_id: file_id.into(),
            file_name,
            content,
            draft: None,
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Saved content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Draft while editing, saved content otherwise
    pub fn displayed(&self) -> &str {
        self.draft.as_deref().unwrap_or(&self.content)
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Enter edit mode with the saved content as the draft. No-op when already editing.
    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.content.clone());
        }
    }

    /// Replace the draft; ignored outside edit mode
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match self.draft {
            Some(ref mut draft) => {
                *draft = text.into();
                true
            }
            None => false,
        }
    }

    /// Commit the draft and leave edit mode
    pub fn save(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) => {
                self.content = draft;
                true
            }
            None => false,
        }
    }

    /// Drop the draft and leave edit mode
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_content() {
        let preview = FilePreview::new("1-1", "Q4_Report.pdf");
        assert!(preview.content().starts_with("# Q4_Report.pdf\n\nThis is a sample file content."));
        assert!(preview.content().ends_with("- Collaborate with your team"));
        assert!(!preview.is_editing());
    }

    #[test]
    fn test_edit_save_and_cancel() {
        let mut preview = FilePreview::new("3", "Project_Brief.md");
        assert!(!preview.set_draft("ignored"));

        preview.begin_edit();
        assert!(preview.set_draft("new text"));
        assert_eq!(preview.displayed(), "new text");
        assert!(preview.save());
        assert_eq!(preview.content(), "new text");
        assert!(!preview.is_editing());

        preview.begin_edit();
        preview.set_draft("thrown away");
        preview.cancel();
        assert_eq!(preview.displayed(), "new text");
        assert!(!preview.save());
    }
}
