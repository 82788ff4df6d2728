use anyhow::Result;
use rusqlite::{params, Connection};

use crate::logging::{log, obj, v_num, v_str, Domain, Level};
use crate::model::AgendaItem;

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    pub fn new(path: &str) -> Result<Self> {
        Ok(Self { conn: Connection::open(path)? })
    }

    pub fn init(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "BEGIN;
            CREATE TABLE IF NOT EXISTS agenda (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                title TEXT NOT NULL,
                ai_summary TEXT NOT NULL,
                status TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS votes (
                item_id INTEGER NOT NULL,
                member_name TEXT NOT NULL,
                vote_cast TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS ingested (
                lims_id TEXT PRIMARY KEY
            );
            COMMIT;",
        )?;
        Ok(())
    }

    /// Newest items first. The service contract is deterministic
    /// ordering by date.
    pub fn list_agenda(&self) -> Result<Vec<AgendaItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, date, title, ai_summary, status FROM agenda ORDER BY date DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AgendaItem {
                category: row.get(0)?,
                date: row.get(1)?,
                title: row.get(2)?,
                ai_summary: row.get(3)?,
                status: row.get(4)?,
            })
        })?;
        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    pub fn insert_item(&mut self, item: &AgendaItem) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO agenda (category, date, title, ai_summary, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![item.category, item.date, item.title, item.ai_summary, item.status],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_vote(&mut self, item_id: i64, member_name: &str, vote_cast: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO votes (item_id, member_name, vote_cast) VALUES (?1, ?2, ?3)",
            params![item_id, member_name, vote_cast],
        )?;
        Ok(())
    }

    /// True once the pipeline has processed this LIMS item. The cache
    /// is what keeps a rerun from summarizing the same item twice.
    pub fn is_ingested(&self, lims_id: &str) -> Result<bool> {
        let mut stmt = self.conn.prepare("SELECT 1 FROM ingested WHERE lims_id = ?1")?;
        Ok(stmt.exists(params![lims_id])?)
    }

    pub fn mark_ingested(&mut self, lims_id: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO ingested (lims_id) VALUES (?1)",
            params![lims_id],
        )?;
        Ok(())
    }

    /// Demo rows for local development: a handful of agenda items plus
    /// a vote record shaped like the real one.
    pub fn seed_demo(&mut self) -> Result<()> {
        let items = [
            AgendaItem {
                category: "Transit".to_string(),
                date: "2026-02-10".to_string(),
                title: "Light Rail Corridor Review".to_string(),
                ai_summary: "Staff recommends extending the Blue Line study area to include two additional station options.".to_string(),
                status: "Pending".to_string(),
            },
            AgendaItem {
                category: "Housing".to_string(),
                date: "2026-02-03".to_string(),
                title: "Affordable Housing Trust Fund Allocation".to_string(),
                ai_summary: "Allocates $12M to the trust fund with a set-aside for deeply affordable units.".to_string(),
                status: "Passed".to_string(),
            },
            AgendaItem {
                category: "Public Safety".to_string(),
                date: "2026-01-27".to_string(),
                title: "Neighborhood Safety Pilot Renewal".to_string(),
                ai_summary: "Renews the violence-interruption pilot for one year with quarterly reporting.".to_string(),
                status: "In Committee".to_string(),
            },
            AgendaItem {
                category: "Parks".to_string(),
                date: "2026-01-20".to_string(),
                title: "Tree Canopy Preservation Ordinance".to_string(),
                ai_summary: "Requires replacement planting for removals over 10 inches diameter on city land.".to_string(),
                status: "Pending".to_string(),
            },
        ];

        let mut ids = Vec::new();
        for item in &items {
            ids.push(self.insert_item(item)?);
        }

        // Votes only exist for items that reached the floor.
        let ayes = ["Payne", "Wonsley", "Osman", "Chughtai", "Chavez"];
        let nays = ["Palmisano", "Rainville", "Vetaw"];
        for &item_id in ids.iter().take(2) {
            for member in ayes {
                self.insert_vote(item_id, member, "Aye")?;
            }
            for member in nays {
                self.insert_vote(item_id, member, "Nay")?;
            }
        }

        log(
            Level::Info,
            Domain::Storage,
            "seeded",
            obj(&[
                ("agenda_rows", v_num(items.len() as f64)),
                ("path", v_str("sqlite")),
            ]),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CorrelationProvider;

    fn temp_store() -> (tempfile::TempDir, LedgerStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.sqlite");
        let mut store = LedgerStore::new(path.to_str().unwrap()).unwrap();
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn test_list_agenda_orders_by_date_desc() {
        let (_dir, mut store) = temp_store();
        store.seed_demo().unwrap();
        let items = store.list_agenda().unwrap();
        assert_eq!(items.len(), 4);
        for pair in items.windows(2) {
            assert!(pair[0].date >= pair[1].date, "not date-descending");
        }
        assert_eq!(items[0].date, "2026-02-10");
    }

    #[test]
    fn test_empty_table_lists_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list_agenda().unwrap().is_empty());
    }

    #[test]
    fn test_ingested_cache_round_trip() {
        let (_dir, mut store) = temp_store();
        assert!(!store.is_ingested("item_101").unwrap());
        store.mark_ingested("item_101").unwrap();
        assert!(store.is_ingested("item_101").unwrap());
        // reruns hit the same id again
        store.mark_ingested("item_101").unwrap();
        assert!(store.is_ingested("item_101").unwrap());
    }

    #[test]
    fn test_seeded_votes_feed_correlation_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.sqlite");
        let mut store = LedgerStore::new(path.to_str().unwrap()).unwrap();
        store.init().unwrap();
        store.seed_demo().unwrap();
        drop(store);

        let provider = crate::matrix::VoteCorrelationProvider {
            sqlite_path: path.to_string_lossy().to_string(),
        };
        let cells = provider
            .correlations(&crate::matrix::MEMBERS)
            .unwrap();
        assert_eq!(cells.len(), 64);
        // Payne and Wonsley voted identically on both floor items, but
        // identical constant records have zero variance, so the pair
        // falls back to 0.0 rather than NaN.
        let cell = cells
            .iter()
            .find(|c| c.member_a == "Payne" && c.member_b == "Wonsley")
            .unwrap();
        assert!(cell.value.is_finite());
    }
}
