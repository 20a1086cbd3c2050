use crate::CinemaScraper;
use crate::sites::expand_candidates;
use crate::strategy::SiteProfile;

const CANDIDATE_URLS: [&str; 3] = [
    "https://www.kinosvetozor.cz/cz/program/",
    "https://kinosvetozor.cz/cz/program/",
    "https://www.kinosvetozor.cz/cz/program/?date={date}",
];

/// Kino Světozor, Praha. Halls are labelled `.sal`, times sometimes `.cas`.
pub struct SvetozorScraper;

impl SvetozorScraper {
    pub fn new() -> Self {
        Self
    }
}

impl CinemaScraper for SvetozorScraper {
    fn id(&self) -> &'static str {
        "svetozor"
    }

    fn candidate_urls(&self, date: &str) -> Vec<String> {
        expand_candidates(&CANDIDATE_URLS, date)
    }

    fn profile(&self) -> SiteProfile {
        SiteProfile {
            hall_selectors: &[".hall", ".program-hall", ".sal"],
            time_selector: "time, .time, .program-time, .cas",
            ..SiteProfile::default()
        }
    }
}
