use crate::CinemaScraper;
use crate::aero::AeroScraper;
use crate::atlas::AtlasScraper;
use crate::edison::EdisonScraper;
use crate::lucerna::LucernaScraper;
use crate::svetozor::SvetozorScraper;
use std::sync::Arc;

/// Fills `{date}` placeholders in a cinema's URL templates, keeping order.
pub fn expand_candidates(templates: &[&str], date: &str) -> Vec<String> {
    templates.iter().map(|t| t.replace("{date}", date)).collect()
}

/// A cinema resolved for one request.
pub struct ResolvedSite<'a> {
    pub candidate_urls: Vec<String>,
    pub scraper: &'a Arc<dyn CinemaScraper>,
}

/// Maps cinema identifiers to their scrapers.
pub struct SiteRegistry {
    scrapers: Vec<Arc<dyn CinemaScraper>>,
}

impl SiteRegistry {
    pub fn new(scrapers: Vec<Box<dyn CinemaScraper>>) -> Self {
        Self {
            scrapers: scrapers.into_iter().map(Arc::from).collect(),
        }
    }

    /// Every cinema this service knows how to read.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(AtlasScraper::new()),
            Box::new(SvetozorScraper::new()),
            Box::new(LucernaScraper::new()),
            Box::new(AeroScraper::new()),
            Box::new(EdisonScraper::new()),
        ])
    }

    pub fn supported(&self) -> Vec<&'static str> {
        self.scrapers.iter().map(|s| s.id()).collect()
    }

    /// `None` means the cinema is not supported.
    pub fn resolve(&self, cinema: &str, date: &str) -> Option<ResolvedSite<'_>> {
        let cinema = cinema.trim();
        let scraper = self
            .scrapers
            .iter()
            .find(|s| s.id().eq_ignore_ascii_case(cinema))?;
        Some(ResolvedSite {
            candidate_urls: scraper.candidate_urls(date),
            scraper,
        })
    }
}
