use crate::CinemaScraper;
use crate::sites::expand_candidates;

const CANDIDATE_URLS: [&str; 3] = [
    "https://www.kinoatlaspraha.cz/program/",
    "https://kinoatlaspraha.cz/program/",
    "https://www.kinoatlaspraha.cz/program/?date={date}",
];

/// Kino Atlas, Praha. Program rows are `div.line` elements carrying
/// `data-program-date` / `data-program-title`, which the default profile covers.
pub struct AtlasScraper;

impl AtlasScraper {
    pub fn new() -> Self {
        Self
    }
}

impl CinemaScraper for AtlasScraper {
    fn id(&self) -> &'static str {
        "atlas"
    }

    fn candidate_urls(&self, date: &str) -> Vec<String> {
        expand_candidates(&CANDIDATE_URLS, date)
    }
}
