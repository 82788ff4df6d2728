//! Agenda feed client: one GET against the agenda service, one JSON
//! array back. No pagination, no retry; the feed is rebuilt in full
//! from whatever the service returns.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::logging::{log, obj, v_num, v_str, Domain, Level};
use crate::model::AgendaItem;

#[async_trait]
pub trait AgendaSource {
    async fn fetch_agenda(&self) -> Result<Vec<AgendaItem>>;
}

pub struct HttpAgendaSource {
    client: Client,
    endpoint: String,
}

impl HttpAgendaSource {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl AgendaSource for HttpAgendaSource {
    async fn fetch_agenda(&self) -> Result<Vec<AgendaItem>> {
        let resp = self.client.get(&self.endpoint).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("agenda endpoint returned {}", resp.status()));
        }
        let items: Vec<AgendaItem> = resp.json().await?;
        log(
            Level::Info,
            Domain::Feed,
            "agenda_fetched",
            obj(&[
                ("endpoint", v_str(&self.endpoint)),
                ("items", v_num(items.len() as f64)),
            ]),
        );
        Ok(items)
    }
}

/// Fetch and render in one pass. A failed fetch renders the explicit
/// fallback fragment instead of leaving the feed stuck on its loader.
pub async fn load_feed_fragment(source: &dyn AgendaSource) -> String {
    match source.fetch_agenda().await {
        Ok(items) => crate::render::render_agenda_feed(&items),
        Err(err) => {
            log(
                Level::Error,
                Domain::Feed,
                "agenda_fetch_failed",
                obj(&[("error", v_str(&err.to_string()))]),
            );
            crate::render::render_agenda_fallback()
        }
    }
}
