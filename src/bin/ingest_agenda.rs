//! Agenda ingestion binary: poll LIMS, summarize new items, insert
//! agenda rows. Run with: cargo run --bin ingest_agenda

use anyhow::Result;

use mpls_ledger::config::Config;
use mpls_ledger::ingest::{ingest, GeminiSummarizer, HttpLimsSource, BATCH_PAUSE};
use mpls_ledger::storage::LedgerStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    println!("Starting LIMS data pipeline...");

    let mut store = LedgerStore::new(&cfg.sqlite_path)?;
    store.init()?;

    let source = HttpLimsSource::new(cfg.lims_api_url.clone());
    let summarizer = GeminiSummarizer::new(cfg.gemini_api_key.clone());
    let inserted = ingest(&mut store, &source, &summarizer, BATCH_PAUSE).await?;

    println!("Inserted {} agenda rows into {}", inserted, cfg.sqlite_path);
    Ok(())
}
