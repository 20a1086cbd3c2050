use crate::normalize::{canonical_time, collapse_whitespace, czech_cmp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One screening: a canonical `HH:MM` time and a possibly empty hall label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub time: String,
    pub hall: String,
}

impl Show {
    /// Builds a show from any text carrying a time of day.
    /// Returns `None` when no valid `HH:MM` can be read from `raw_time`.
    pub fn new(raw_time: &str, hall: &str) -> Option<Self> {
        Some(Self {
            time: canonical_time(raw_time)?,
            hall: collapse_whitespace(hall),
        })
    }
}

/// A film title with its shows for the requested day, sorted by time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub shows: Vec<Show>,
}

/// Collects shows per title during one extraction run.
#[derive(Debug, Default)]
pub struct ListingAccumulator {
    by_title: BTreeMap<String, Vec<Show>>,
}

impl ListingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a show under `title`. No-op for an empty title or an empty time.
    pub fn accumulate(&mut self, title: &str, show: Show) {
        let title = collapse_whitespace(title);
        if title.is_empty() || show.time.is_empty() {
            return;
        }
        self.by_title.entry(title).or_default().push(show);
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    /// Produces the output shape: shows sorted by time within each title,
    /// titles without shows dropped, listings sorted by title.
    pub fn materialize(&self) -> Vec<Listing> {
        let mut listings: Vec<Listing> = self
            .by_title
            .iter()
            .filter_map(|(title, shows)| {
                let mut shows: Vec<Show> =
                    shows.iter().filter(|s| !s.time.is_empty()).cloned().collect();
                if shows.is_empty() {
                    return None;
                }
                // Fixed-width HH:MM, so string order is time order.
                shows.sort_by(|a, b| a.time.cmp(&b.time));
                Some(Listing {
                    title: title.clone(),
                    shows,
                })
            })
            .collect();
        listings.sort_by(|a, b| czech_cmp(&a.title, &b.title));
        listings
    }
}
