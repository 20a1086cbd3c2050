use crate::CinemaScraper;
use crate::sites::expand_candidates;
use crate::strategy::SiteProfile;

const CANDIDATE_URLS: [&str; 4] = [
    "https://www.kinoaero.cz/cz/program",
    "https://kinoaero.cz/cz/program",
    "https://www.kinoaero.cz/?date={date}",
    "https://www.kinoaero.cz/cz/program?date={date}",
];

/// Kino Aero, Praha. Also runs screenings at outdoor venues, labelled `.venue`.
pub struct AeroScraper;

impl AeroScraper {
    pub fn new() -> Self {
        Self
    }
}

impl CinemaScraper for AeroScraper {
    fn id(&self) -> &'static str {
        "aero"
    }

    fn candidate_urls(&self, date: &str) -> Vec<String> {
        expand_candidates(&CANDIDATE_URLS, date)
    }

    fn profile(&self) -> SiteProfile {
        SiteProfile {
            hall_selectors: &[".hall", ".program-hall", ".venue"],
            title_selectors: &[
                ".title",
                ".film-title",
                ".film-name",
                ".program-title",
                "h1",
                "h2",
                "h3",
                "h4",
                "a[href*=\"/film/\"]",
            ],
            ..SiteProfile::default()
        }
    }
}
