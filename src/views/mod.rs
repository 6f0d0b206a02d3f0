//! ビューモジュール

pub mod file_preview;
pub mod file_tree_panel;
pub mod workspace_viewer;

pub use file_preview::{CodeViewer, FilePreview};
pub use file_tree_panel::FileTreePanel;
pub use workspace_viewer::WorkspaceViewer;
