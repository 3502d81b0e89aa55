use serde::{Deserialize, Serialize};

/// A manufacturing partner listed in the industry directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<String>,
}

impl Industry {
    /// Case-insensitive substring match over name and description.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Case-insensitive tag membership test.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
