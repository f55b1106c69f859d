use std::collections::HashMap;

use tracing::debug;

use crate::embed::derive_embed_url;

/// A channel from the reference table with its resolved URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    pub channel_name: String,
    pub live_url: Option<String>,
    pub embed_url: Option<String>,
}

impl ChannelEntry {
    /// Builds an entry from raw table cells.
    ///
    /// A missing or blank embed cell is derived from the live URL. Returns
    /// `None` when the channel name is blank.
    pub fn from_fields(name: &str, live_url: &str, embed_url: Option<&str>) -> Option<Self> {
        let channel_name = name.trim();
        if channel_name.is_empty() {
            return None;
        }

        let live_url = non_blank(live_url);
        let embed_url = match embed_url.and_then(non_blank) {
            Some(url) => Some(url),
            None => derive_embed_url(live_url.as_deref()),
        };

        Some(Self {
            channel_name: channel_name.to_string(),
            live_url,
            embed_url,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Channel name -> URLs lookup, built once per run
#[derive(Debug, Clone, Default)]
pub struct ChannelTable {
    entries: HashMap<String, ChannelEntry>,
    overwritten: usize,
}

impl ChannelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. A later entry with the same name replaces the earlier one.
    pub fn insert(&mut self, entry: ChannelEntry) {
        if let Some(previous) = self.entries.insert(entry.channel_name.clone(), entry) {
            debug!("Channel '{}' listed more than once, keeping the last row", previous.channel_name);
            self.overwritten += 1;
        }
    }

    /// Exact lookup on the trimmed channel name
    pub fn resolve(&self, channel_name: &str) -> Option<&ChannelEntry> {
        self.entries.get(channel_name.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows that replaced an earlier row with the same channel name
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}

impl FromIterator<ChannelEntry> for ChannelTable {
    fn from_iter<I: IntoIterator<Item = ChannelEntry>>(iter: I) -> Self {
        let mut table = ChannelTable::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}
