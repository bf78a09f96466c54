/// One entry of a feed, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: Option<String>,
    pub enclosure_url: Option<String>,
}

impl FeedItem {
    pub fn new(title: Option<String>, enclosure_url: Option<String>) -> Self {
        Self {
            title,
            enclosure_url,
        }
    }

    /// Title safe to print on any console: non-ASCII characters become `?`.
    pub fn display_title(&self) -> String {
        console_safe(self.title.as_deref().unwrap_or("(Untitled)"))
    }
}

pub fn console_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}
