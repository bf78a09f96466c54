use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One configured feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastSpec {
    pub alias: String,
    #[serde(rename = "url")]
    pub feed_url: String,
    #[serde(
        rename = "num downloads",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_limit",
        deserialize_with = "deserialize_limit"
    )]
    pub download_limit: Option<usize>,
}

impl PodcastSpec {
    pub fn new(alias: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            feed_url: feed_url.into(),
            download_limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.download_limit = Some(limit);
        self
    }
}

// Written back as a string, which is how existing config files spell it.
fn serialize_limit<S>(limit: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match limit {
        Some(n) => serializer.serialize_str(&n.to_string()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Limit {
        Number(usize),
        Text(String),
    }

    match Option::<Limit>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Limit::Number(n)) => Ok(Some(n)),
        Some(Limit::Text(text)) => text.trim().parse::<usize>().map(Some).map_err(|_| {
            de::Error::custom(format!(
                "\"num downloads\" must be a non-negative integer, got {:?}",
                text
            ))
        }),
    }
}
