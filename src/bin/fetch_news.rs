//! News harvester binary: scrape headlines, write news.json.
//! Run with: cargo run --bin fetch_news

use anyhow::Result;

use mpls_ledger::config::Config;
use mpls_ledger::harvest::{harvest, write_news_json};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    println!("Fetching local news...");
    let headlines = harvest(&cfg).await;
    write_news_json(&cfg.news_out_path, &headlines)?;
    println!(
        "Successfully dumped {} headlines to {}",
        headlines.len(),
        cfg.news_out_path
    );
    Ok(())
}
