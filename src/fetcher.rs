use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, info, warn};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

const SNIPPET_CHARS: usize = 200;

/// Result of trying a cinema's candidate URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Page { url: String, text: String },
    /// Every candidate failed; carries the last status (none on transport
    /// errors) and the start of the last body.
    Failed { status: Option<u16>, snippet: String },
}

/// Retrieves the first usable program page out of a list of candidates.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_first(&self, urls: &[String]) -> FetchOutcome;
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_CHARS).collect()
}

/// Soft-404 guard: a program page must at least be an HTML document.
fn looks_like_page(body: &str) -> bool {
    body.to_ascii_lowercase().contains("<html")
}

/// `PageFetcher` over reqwest. Candidates are tried one at a time.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(user_agent: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_first(&self, urls: &[String]) -> FetchOutcome {
        let mut status = None;
        let mut last_snippet = String::from("no candidate urls");

        for url in urls {
            debug!(url = %url, "fetching program page");
            let resp = match self
                .client
                .get(url)
                .header(header::USER_AGENT, &self.user_agent)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    warn!(url = %url, error = %e, "request failed");
                    status = None;
                    last_snippet = snippet(&e.to_string());
                    continue;
                }
            };

            let code = resp.status();
            let body = match resp.text().await {
                Ok(b) => b,
                Err(e) => {
                    warn!(url = %url, error = %e, "failed to read body");
                    status = Some(code.as_u16());
                    last_snippet = snippet(&e.to_string());
                    continue;
                }
            };

            if code.is_success() && looks_like_page(&body) {
                info!(url = %url, status = code.as_u16(), "fetched program page");
                return FetchOutcome::Page {
                    url: url.clone(),
                    text: body,
                };
            }

            warn!(url = %url, status = code.as_u16(), "unusable response");
            status = Some(code.as_u16());
            last_snippet = snippet(&body);
        }

        FetchOutcome::Failed {
            status,
            snippet: last_snippet,
        }
    }
}
