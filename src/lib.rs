use scraper::Html;

pub mod aero;
pub mod atlas;
pub mod config;
pub mod edison;
pub mod error;
pub mod fetcher;
pub mod jsonld;
pub mod listing;
pub mod logger;
pub mod lucerna;
pub mod normalize;
pub mod program;
pub mod server;
pub mod sites;
pub mod strategy;
pub mod svetozor;

pub use error::{ExtractError, ProgramError};
pub use fetcher::{FetchOutcome, HttpFetcher, PageFetcher};
pub use listing::{Listing, ListingAccumulator, Show};
pub use program::ProgramService;
pub use sites::SiteRegistry;
pub use strategy::{SiteProfile, StrategyLadder};

/// Trait that every supported cinema implements.
///
/// A cinema is mostly configuration: where its program lives and which
/// selectors its markup uses. Extraction itself is the shared strategy ladder.
pub trait CinemaScraper: Send + Sync {
    /// Identifier used in the `cinema` query parameter.
    fn id(&self) -> &'static str;

    /// Program page URLs to try in order for the given ISO date.
    fn candidate_urls(&self, date: &str) -> Vec<String>;

    /// Selector names for this cinema's markup (default: the common ones).
    fn profile(&self) -> SiteProfile {
        SiteProfile::default()
    }

    /// Read the listings for `date` out of a fetched program page.
    fn extract(&self, document: &Html, date: &str) -> Result<Vec<Listing>, ExtractError> {
        StrategyLadder::standard().extract(document, date, &self.profile())
    }
}
