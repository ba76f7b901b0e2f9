/// Helper functions the core consumes for parsing and gating messages
pub trait Utilities: Send + Sync {
    /// Whether the text is in command form (recognized prefix)
    fn is_command(&self, text: &str) -> bool;

    /// Text with the command prefix removed
    fn strip_prefix(&self, text: &str) -> String;

    fn server_id(&self, channel_id: &str) -> Option<String>;

    fn is_administrator(&self, user_id: &str) -> bool;

    /// Sanitize text before it is shown as presence
    fn filter_status_text(&self, text: &str) -> String;
}
