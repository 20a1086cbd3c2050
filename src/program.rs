use crate::error::{ExtractError, ProgramError, Result};
use crate::fetcher::{FetchOutcome, PageFetcher};
use crate::listing::Listing;
use crate::normalize::date_portion;
use crate::sites::SiteRegistry;
use crate::CinemaScraper;
use chrono::NaiveDate;
use scraper::Html;
use std::any::Any;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Resolves a cinema, fetches its page and runs its extractor.
pub struct ProgramService {
    fetcher: Arc<dyn PageFetcher>,
    registry: SiteRegistry,
}

impl ProgramService {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_registry(fetcher, SiteRegistry::standard())
    }

    pub fn with_registry(fetcher: Arc<dyn PageFetcher>, registry: SiteRegistry) -> Self {
        Self { fetcher, registry }
    }

    pub fn supported(&self) -> Vec<&'static str> {
        self.registry.supported()
    }

    /// Listings for `cinema` on `date` (`YYYY-MM-DD`).
    pub async fn run(&self, cinema: &str, date: &str) -> Result<Vec<Listing>> {
        let date = date.trim();
        if date_portion(date) != Some(date) || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
        {
            return Err(ProgramError::invalid_date(date));
        }

        let site = self.registry.resolve(cinema, date).ok_or_else(|| {
            warn!(cinema, "unsupported cinema");
            ProgramError::UnsupportedSite {
                cinema: cinema.to_string(),
                supported: self.registry.supported(),
            }
        })?;

        let text = match self.fetcher.fetch_first(&site.candidate_urls).await {
            FetchOutcome::Page { text, .. } => text,
            FetchOutcome::Failed { status, snippet } => {
                warn!(cinema, ?status, "no candidate url produced a program page");
                return Err(ProgramError::UpstreamUnavailable { status, snippet });
            }
        };

        let listings = extract_blocking(Arc::clone(site.scraper), text, date.to_string())
            .await
            .map_err(|source| {
                error!(cinema, error = %source, "extraction failed");
                ProgramError::Extraction {
                    cinema: cinema.to_string(),
                    source,
                }
            })?;

        info!(cinema, date, listings = listings.len(), "program extracted");
        Ok(listings)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Parses and extracts on the blocking pool. A panicking extractor ends
/// that task only and comes back as an error.
async fn extract_blocking(
    scraper: Arc<dyn CinemaScraper>,
    text: String,
    date: String,
) -> std::result::Result<Vec<Listing>, ExtractError> {
    let extraction = tokio::task::spawn_blocking(move || {
        let document = Html::parse_document(&text);
        scraper.extract(&document, &date)
    })
    .await;

    match extraction {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(ExtractError::Panic(panic_message(&*e.into_panic()))),
        Err(e) => Err(ExtractError::Panic(e.to_string())),
    }
}
