//! The extraction ladder: attribute-tagged rows, then JSON-LD, then a
//! markup heuristic around time elements. The first strategy that yields
//! any listing wins.

use crate::error::ExtractError;
use crate::jsonld::find_events;
use crate::listing::{Listing, ListingAccumulator, Show};
use crate::normalize::{canonical_time, collapse_whitespace, date_portion, extract_time_token};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, warn};

/// Selector and attribute names one cinema's markup uses.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub date_attr: &'static str,
    pub title_attr: &'static str,
    pub hall_attr: &'static str,
    /// Sub-elements holding the hall name, first non-empty match wins.
    pub hall_selectors: &'static [&'static str],
    pub structured_data_selector: &'static str,
    pub time_selector: &'static str,
    /// Machine-readable time attributes on time elements, in order.
    pub time_attrs: &'static [&'static str],
    pub container_selector: &'static str,
    /// Title candidates inside a container, in priority order.
    pub title_selectors: &'static [&'static str],
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            date_attr: "data-program-date",
            title_attr: "data-program-title",
            hall_attr: "data-program-hall",
            hall_selectors: &[".hall", ".program-hall"],
            structured_data_selector: "script[type=\"application/ld+json\"]",
            time_selector: "time, .time, .program-time",
            time_attrs: &["datetime", "data-time"],
            container_selector: "article, li, tr, section, div",
            title_selectors: &[
                ".title",
                ".film-title",
                ".program-title",
                "h1",
                "h2",
                "h3",
                "h4",
                "a[href*=\"/film/\"]",
            ],
        }
    }
}

/// One way of reading screenings out of a document.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn try_extract(
        &self,
        document: &Html,
        date: &str,
        profile: &SiteProfile,
    ) -> Result<Vec<Listing>, ExtractError>;
}

fn selector(s: &str) -> Result<Selector, ExtractError> {
    Selector::parse(s).map_err(|e| ExtractError::Selector {
        selector: s.to_string(),
        message: e.to_string(),
    })
}

fn element_text(el: &ElementRef) -> String {
    collapse_whitespace(
        &el.text()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Text of the first hall sub-element that is not blank.
fn hall_from_children(el: &ElementRef, profile: &SiteProfile) -> Result<String, ExtractError> {
    for css in profile.hall_selectors {
        let sel = selector(css)?;
        if let Some(text) = el
            .select(&sel)
            .map(|h| element_text(&h))
            .find(|t| !t.is_empty())
        {
            return Ok(text);
        }
    }
    Ok(String::new())
}

/// Rows tagged like `<div data-program-date="2025-09-07 13:00:00" data-program-title="...">`.
pub struct AttributeStrategy;

impl ExtractionStrategy for AttributeStrategy {
    fn name(&self) -> &'static str {
        "attribute"
    }

    fn try_extract(
        &self,
        document: &Html,
        date: &str,
        profile: &SiteProfile,
    ) -> Result<Vec<Listing>, ExtractError> {
        let rows = selector(&format!("[{}][{}]", profile.date_attr, profile.title_attr))?;
        let prefix = format!("{} ", date);
        let mut acc = ListingAccumulator::new();

        for el in document.select(&rows) {
            let (Some(when), Some(title)) = (
                el.value().attr(profile.date_attr),
                el.value().attr(profile.title_attr),
            ) else {
                continue;
            };
            // Plain prefix match: listings are local time, no zone handling.
            let Some(clock) = when.strip_prefix(&prefix) else {
                continue;
            };

            let hall = match el
                .value()
                .attr(profile.hall_attr)
                .map(collapse_whitespace)
                .filter(|h| !h.is_empty())
            {
                Some(h) => h,
                None => hall_from_children(&el, profile)?,
            };

            if let Some(show) = Show::new(clock, &hall) {
                acc.accumulate(title, show);
            }
        }

        Ok(acc.materialize())
    }
}

/// schema.org events embedded as `application/ld+json`.
pub struct StructuredDataStrategy;

impl ExtractionStrategy for StructuredDataStrategy {
    fn name(&self) -> &'static str {
        "structured-data"
    }

    fn try_extract(
        &self,
        document: &Html,
        date: &str,
        profile: &SiteProfile,
    ) -> Result<Vec<Listing>, ExtractError> {
        let scripts = selector(profile.structured_data_selector)?;
        let mut acc = ListingAccumulator::new();

        for script in document.select(&scripts) {
            let raw: String = script.text().collect();
            let value: Value = match serde_json::from_str(raw.trim()) {
                Ok(v) => v,
                Err(e) => {
                    debug!(error = %e, "skipping malformed structured data block");
                    continue;
                }
            };

            for event in find_events(&value) {
                if date_portion(&event.start) != Some(date) {
                    continue;
                }
                if let Some(show) = Show::new(&event.start, &event.hall) {
                    acc.accumulate(&event.title, show);
                }
            }
        }

        Ok(acc.materialize())
    }
}

/// Last resort: time elements and whatever title sits in the same block.
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    fn time_of(el: &ElementRef, date: &str, profile: &SiteProfile) -> Option<String> {
        let machine = profile
            .time_attrs
            .iter()
            .find_map(|attr| el.value().attr(attr))
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match machine {
            Some(value) => {
                // Undated values cannot be filtered and are kept.
                if date_portion(value).is_some_and(|d| d != date) {
                    return None;
                }
                canonical_time(value).or_else(|| extract_time_token(&element_text(el)))
            }
            None => extract_time_token(&element_text(el)),
        }
    }

    fn title_of(container: &ElementRef, candidates: &[Selector]) -> Option<String> {
        let explicit = candidates.iter().find_map(|sel| {
            container
                .select(sel)
                .map(|t| element_text(&t))
                .find(|t| !t.is_empty())
        });
        explicit.or_else(|| {
            // Join first so inline tags inside a title do not split it.
            let visible: String = container.text().collect();
            visible
                .lines()
                .map(collapse_whitespace)
                .find(|line| line.chars().count() > 3)
        })
    }
}

impl ExtractionStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn try_extract(
        &self,
        document: &Html,
        date: &str,
        profile: &SiteProfile,
    ) -> Result<Vec<Listing>, ExtractError> {
        let times = selector(profile.time_selector)?;
        let containers = selector(profile.container_selector)?;
        let title_selectors = profile
            .title_selectors
            .iter()
            .map(|css| selector(css))
            .collect::<Result<Vec<_>, _>>()?;
        let mut acc = ListingAccumulator::new();

        for el in document.select(&times) {
            // Nested time elements describe one screening; read the innermost.
            let wraps_another = el
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .any(|d| times.matches(&d));
            if wraps_another {
                continue;
            }
            let Some(time) = Self::time_of(&el, date, profile) else {
                continue;
            };
            let Some(container) = el
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|a| containers.matches(a))
            else {
                continue;
            };
            let Some(title) = Self::title_of(&container, &title_selectors) else {
                continue;
            };
            let hall = hall_from_children(&container, profile)?;

            if let Some(show) = Show::new(&time, &hall) {
                acc.accumulate(&title, show);
            }
        }

        Ok(acc.materialize())
    }
}

/// Ordered strategies; later ones run only while earlier ones find nothing.
pub struct StrategyLadder {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl StrategyLadder {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(AttributeStrategy),
            Box::new(StructuredDataStrategy),
            Box::new(HeuristicStrategy),
        ])
    }

    pub fn extract(
        &self,
        document: &Html,
        date: &str,
        profile: &SiteProfile,
    ) -> Result<Vec<Listing>, ExtractError> {
        for strategy in &self.strategies {
            let listings = match strategy.try_extract(document, date, profile) {
                Ok(listings) => listings,
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "strategy failed, trying next");
                    continue;
                }
            };
            if !listings.is_empty() {
                debug!(
                    strategy = strategy.name(),
                    listings = listings.len(),
                    "strategy matched"
                );
                return Ok(listings);
            }
            debug!(strategy = strategy.name(), "strategy found nothing");
        }
        Ok(Vec::new())
    }
}
