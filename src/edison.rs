use crate::CinemaScraper;
use crate::sites::expand_candidates;
use crate::strategy::SiteProfile;

const CANDIDATE_URLS: [&str; 2] = [
    "https://www.edisonfilmhub.cz/program",
    "https://edisonfilmhub.cz/program",
];

/// Edison Filmhub, Praha. Show rows put the start in `data-start`.
pub struct EdisonScraper;

impl EdisonScraper {
    pub fn new() -> Self {
        Self
    }
}

impl CinemaScraper for EdisonScraper {
    fn id(&self) -> &'static str {
        "edison"
    }

    fn candidate_urls(&self, date: &str) -> Vec<String> {
        expand_candidates(&CANDIDATE_URLS, date)
    }

    fn profile(&self) -> SiteProfile {
        SiteProfile {
            hall_selectors: &[".hall", ".program-hall", ".cinema-hall"],
            time_selector: "time, .time, .program-time, [data-start]",
            time_attrs: &["datetime", "data-time", "data-start"],
            ..SiteProfile::default()
        }
    }
}
