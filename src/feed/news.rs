//! News ticker client. The only component with a designed failure
//! path: any fetch or parse error collapses to one static fallback
//! message.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::logging::{log, obj, v_num, v_str, Domain, Level};
use crate::model::Headline;

#[async_trait]
pub trait HeadlineSource {
    async fn fetch_headlines(&self) -> Result<Vec<Headline>>;
}

pub struct HttpHeadlineSource {
    client: Client,
    url: String,
}

impl HttpHeadlineSource {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl HeadlineSource for HttpHeadlineSource {
    async fn fetch_headlines(&self) -> Result<Vec<Headline>> {
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("news resource returned {}", resp.status()));
        }
        let headlines: Vec<Headline> = resp.json().await?;
        log(
            Level::Info,
            Domain::Ticker,
            "headlines_fetched",
            obj(&[
                ("url", v_str(&self.url)),
                ("headlines", v_num(headlines.len() as f64)),
            ]),
        );
        Ok(headlines)
    }
}

/// Reads headlines from a local file instead of HTTP; the harvester
/// writes `news.json` next to the page.
pub struct FileHeadlineSource {
    pub path: String,
}

#[async_trait]
impl HeadlineSource for FileHeadlineSource {
    async fn fetch_headlines(&self) -> Result<Vec<Headline>> {
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Fetch and render in one pass; failure yields the static fallback.
pub async fn load_ticker_fragment(source: &dyn HeadlineSource) -> String {
    match source.fetch_headlines().await {
        Ok(headlines) => crate::render::render_ticker(&headlines),
        Err(err) => {
            log(
                Level::Error,
                Domain::Ticker,
                "news_fetch_failed",
                obj(&[("error", v_str(&err.to_string()))]),
            );
            crate::render::render_ticker_fallback()
        }
    }
}
