//! Agenda service binary.
//!
//! Serves agenda rows as JSON behind permissive CORS.
//! Run with: cargo run --bin agenda_server

use anyhow::Result;
use std::net::TcpListener;

use mpls_ledger::config::Config;
use mpls_ledger::server::serve;
use mpls_ledger::storage::LedgerStore;

fn main() -> Result<()> {
    let cfg = Config::from_env();

    let mut store = LedgerStore::new(&cfg.sqlite_path)?;
    store.init()?;
    drop(store);

    let listener = TcpListener::bind(&cfg.bind_addr)?;
    println!("Agenda service running at http://{}", cfg.bind_addr);
    println!();
    println!("Endpoints:");
    println!("  GET /api/agenda - Agenda rows as JSON, newest first");
    println!("  OPTIONS *       - CORS preflight");
    println!();

    serve(listener, &cfg.sqlite_path)
}
