/// One row of the browser's `urls` table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryRecord {
    pub url: String,
    /// May be empty; see [`crate::export::RenderOptions::include_untitled`]
    pub title: String,
}

impl HistoryRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}
