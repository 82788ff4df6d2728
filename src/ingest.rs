//! Agenda ingestion pipeline: poll the LIMS meetings API, skip items
//! the ledger has already processed, summarize the rest in batches of
//! five, and insert the agenda rows the dashboard renders. When the
//! API or the summarizer is down, mock items and placeholder summaries
//! keep the pipeline producing rows.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::logging::{log, obj, v_num, v_str, Domain, Level};
use crate::model::AgendaItem;
use crate::storage::LedgerStore;

/// Items per summarizer call; larger batches truncate the model's
/// context.
pub const BATCH_SIZE: usize = 5;

/// Pause between batches, to respect API limits.
pub const BATCH_PAUSE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LimsItem {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "MeetingId")]
    pub meeting_id: String,
}

fn lims_item(id: &str, title: &str, meeting_id: &str) -> LimsItem {
    LimsItem {
        id: id.to_string(),
        title: title.to_string(),
        meeting_id: meeting_id.to_string(),
    }
}

pub fn mock_lims_items() -> Vec<LimsItem> {
    vec![
        lims_item("item_101", "Public Works Funding 2026", "m_01"),
        lims_item("item_102", "Zoning Board Expansion", "m_01"),
        lims_item("item_103", "Metro Transit Safety Initiative", "m_02"),
        lims_item("item_104", "Affordable Housing Mandate", "m_02"),
        lims_item("item_105", "City Infrastructure Repair Bill", "m_02"),
        lims_item("item_106", "New Library Construction", "m_03"),
    ]
}

#[async_trait]
pub trait LimsSource {
    async fn fetch_items(&self) -> Result<Vec<LimsItem>>;
}

pub struct HttpLimsSource {
    client: Client,
    url: String,
}

impl HttpLimsSource {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl LimsSource for HttpLimsSource {
    async fn fetch_items(&self) -> Result<Vec<LimsItem>> {
        let resp = self
            .client
            .get(&self.url)
            .timeout(Duration::from_secs(10))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("LIMS API returned {}", resp.status()));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
pub trait Summarizer {
    async fn summarize(&self, batch: &[LimsItem]) -> Result<String>;
}

/// Prompt for one batch, one title per line.
pub fn batch_prompt(batch: &[LimsItem]) -> String {
    let mut prompt =
        String::from("Summarize the following Minneapolis City Council agenda items concisely:\n");
    for item in batch {
        prompt.push_str(&format!("- {}\n", item.title));
    }
    prompt
}

pub fn placeholder_summary(batch_len: usize) -> String {
    format!("AI Summary placeholder for {} items", batch_len)
}

/// Gemini 3 Pro over the generateContent REST endpoint. No key means
/// every call errs and the caller falls back to placeholders.
pub struct GeminiSummarizer {
    client: Client,
    api_key: Option<String>,
}

impl GeminiSummarizer {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, batch: &[LimsItem]) -> Result<String> {
        let key = self.api_key.as_deref().ok_or_else(|| anyhow!("no API key"))?;
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-pro:generateContent?key={}",
            key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": batch_prompt(batch) }] }]
        });
        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("summarizer returned {}", resp.status()));
        }
        let parsed: serde_json::Value = resp.json().await?;
        parsed["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("summarizer response had no text"))
    }
}

fn agenda_row(item: &LimsItem, summary: &str) -> AgendaItem {
    AgendaItem {
        category: "General".to_string(),
        date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        title: item.title.clone(),
        ai_summary: summary.to_string(),
        status: "Pending".to_string(),
    }
}

/// One pipeline run. Fetch falls back to the mock list; unprocessed
/// items are summarized in batches and inserted, and each item lands
/// in the ingested cache so a rerun skips it.
pub async fn ingest(
    store: &mut LedgerStore,
    source: &dyn LimsSource,
    summarizer: &dyn Summarizer,
    pause: Duration,
) -> Result<usize> {
    let items = match source.fetch_items().await {
        Ok(items) => {
            log(
                Level::Info,
                Domain::Ingest,
                "lims_fetched",
                obj(&[("items", v_num(items.len() as f64))]),
            );
            items
        }
        Err(err) => {
            log(
                Level::Warn,
                Domain::Ingest,
                "lims_fetch_fallback",
                obj(&[("error", v_str(&err.to_string()))]),
            );
            mock_lims_items()
        }
    };

    let mut unprocessed = Vec::new();
    for item in items {
        if !store.is_ingested(&item.id)? {
            unprocessed.push(item);
        }
    }
    log(
        Level::Info,
        Domain::Ingest,
        "unprocessed",
        obj(&[("items", v_num(unprocessed.len() as f64))]),
    );

    let mut inserted = 0usize;
    let mut batches = unprocessed.chunks(BATCH_SIZE).peekable();
    while let Some(batch) = batches.next() {
        let summary = match summarizer.summarize(batch).await {
            Ok(text) => text,
            Err(err) => {
                log(
                    Level::Warn,
                    Domain::Ingest,
                    "summary_placeholder",
                    obj(&[("error", v_str(&err.to_string()))]),
                );
                placeholder_summary(batch.len())
            }
        };
        for item in batch {
            store.insert_item(&agenda_row(item, &summary))?;
            store.mark_ingested(&item.id)?;
            inserted += 1;
        }
        if batches.peek().is_some() {
            tokio::time::sleep(pause).await;
        }
    }

    log(
        Level::Info,
        Domain::Ingest,
        "ingested",
        obj(&[("rows", v_num(inserted as f64))]),
    );
    Ok(inserted)
}
