use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use feed_rs::model::Entry;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{GrabpodError, Result};
use crate::domain::FeedItem;

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse a stored feed document and return the items to consider.
    ///
    /// Items keep document order; `limit` takes a prefix of at most that
    /// many items, `None` takes them all. Items lacking an enclosure are
    /// still returned.
    pub fn select_items(&self, path: &Path, limit: Option<usize>) -> Result<Vec<FeedItem>> {
        let file = File::open(path).map_err(|e| GrabpodError::FeedParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let items = self
            .normalize(BufReader::new(file))
            .map_err(|reason| GrabpodError::FeedParse {
                path: path.to_path_buf(),
                reason,
            })?;

        Ok(match limit {
            Some(n) => items.into_iter().take(n).collect(),
            None => items,
        })
    }

    pub fn normalize<R: Read>(&self, body: R) -> std::result::Result<Vec<FeedItem>, String> {
        let feed = parser::parse(body).map_err(|e| e.to_string())?;

        Ok(feed
            .entries
            .iter()
            .map(|entry| FeedItem {
                title: entry
                    .title
                    .as_ref()
                    .map(|t| {
                        let text = t.content.trim();
                        // Plain text titles arrive already unescaped.
                        if t.content_type.essence().to_string() == "text/html" {
                            decode_html_entities(text).to_string()
                        } else {
                            text.to_string()
                        }
                    }),
                enclosure_url: enclosure_url(entry),
            })
            .collect())
    }
}

/// RSS `<enclosure>` surfaces as media content, next to any `<media:content>`
/// artwork; Atom uses `rel="enclosure"` links. Audio or video wins, then
/// anything that is not an image.
fn enclosure_url(entry: &Entry) -> Option<String> {
    let contents: Vec<(String, Option<String>)> = entry
        .media
        .iter()
        .flat_map(|media| media.content.iter())
        .filter_map(|content| {
            let url = content.url.as_ref()?.to_string();
            Some((url, content.content_type.as_ref().map(|m| m.to_string())))
        })
        .collect();
    let links: Vec<(String, Option<String>)> = entry
        .links
        .iter()
        .filter(|link| link.rel.as_deref() == Some("enclosure"))
        .map(|link| (link.href.clone(), link.media_type.clone()))
        .collect();

    let candidates = || contents.iter().chain(links.iter());

    candidates()
        .find(|(_, mime)| mime.as_deref().is_some_and(is_playable))
        .or_else(|| {
            candidates().find(|(_, mime)| {
                !mime
                    .as_deref()
                    .is_some_and(|m| m.starts_with("image/"))
            })
        })
        .map(|(url, _)| url.clone())
}

fn is_playable(mime: &str) -> bool {
    mime.starts_with("audio/") || mime.starts_with("video/")
}
