use crate::CinemaScraper;
use crate::sites::expand_candidates;
use crate::strategy::SiteProfile;

const CANDIDATE_URLS: [&str; 3] = [
    "https://www.kinolucerna.cz/cz/program",
    "https://kinolucerna.cz/cz/program",
    "https://www.kinolucerna.cz/cz/program?date={date}",
];

/// Kino Lucerna, Praha. Publishes schema.org `ScreeningEvent`s; the markup
/// fallback reads `.showtime` badges inside `.program-item` blocks.
pub struct LucernaScraper;

impl LucernaScraper {
    pub fn new() -> Self {
        Self
    }
}

impl CinemaScraper for LucernaScraper {
    fn id(&self) -> &'static str {
        "lucerna"
    }

    fn candidate_urls(&self, date: &str) -> Vec<String> {
        expand_candidates(&CANDIDATE_URLS, date)
    }

    fn profile(&self) -> SiteProfile {
        SiteProfile {
            time_selector: "time, .time, .program-time, .showtime",
            container_selector: ".program-item, article, li, tr, section, div",
            ..SiteProfile::default()
        }
    }
}
