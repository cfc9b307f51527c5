//! Search criteria and sort keys for catalog listings.

use serde::{Deserialize, Serialize};

/// Sort key for search results.
///
/// Unknown or absent keys fall back to `Recent` (newest first).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    Artist,
    #[default]
    Recent,
}

impl SortKey {
    /// Parse a sort key, treating anything unrecognized as `Recent`.
    pub fn parse(value: &str) -> Self {
        match value {
            "title" => Self::Title,
            "artist" => Self::Artist,
            _ => Self::Recent,
        }
    }
}

/// Criteria for an advanced search. All fields are optional and combine with
/// logical AND; blank strings count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text term matched against title, artist and description.
    pub search_term: Option<String>,
    /// Artist substring match.
    pub artist: Option<String>,
    /// Genre equality match (case-insensitive).
    pub genre: Option<String>,
    /// Instrument equality match (case-insensitive).
    pub instrument: Option<String>,
}

impl SearchCriteria {
    /// Drop blank criteria so the store only applies supplied filters.
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Self {
            search_term: non_blank(self.search_term),
            artist: non_blank(self.artist),
            genre: non_blank(self.genre),
            instrument: non_blank(self.instrument),
        }
    }

    /// True when no criterion is supplied.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_none()
            && self.artist.is_none()
            && self.genre.is_none()
            && self.instrument.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parse_falls_back_to_recent() {
        assert_eq!(SortKey::parse("title"), SortKey::Title);
        assert_eq!(SortKey::parse("artist"), SortKey::Artist);
        assert_eq!(SortKey::parse("recent"), SortKey::Recent);
        assert_eq!(SortKey::parse("popularity"), SortKey::Recent);
        assert_eq!(SortKey::parse(""), SortKey::Recent);
    }

    #[test]
    fn normalized_drops_blank_criteria() {
        let criteria = SearchCriteria {
            search_term: Some("  ".to_string()),
            artist: Some("Bach".to_string()),
            genre: Some(String::new()),
            instrument: None,
        }
        .normalized();

        assert_eq!(criteria.search_term, None);
        assert_eq!(criteria.artist.as_deref(), Some("Bach"));
        assert_eq!(criteria.genre, None);
        assert!(!criteria.is_empty());
    }

    #[test]
    fn empty_criteria_is_empty() {
        assert!(SearchCriteria::default().is_empty());
    }
}
