//! Seed the ledger database with demo agenda items and votes.
//! Run with: cargo run --bin seed_ledger

use anyhow::Result;

use mpls_ledger::config::Config;
use mpls_ledger::storage::LedgerStore;

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let mut store = LedgerStore::new(&cfg.sqlite_path)?;
    store.init()?;
    store.seed_demo()?;
    println!("Seeded demo ledger at {}", cfg.sqlite_path);
    Ok(())
}
