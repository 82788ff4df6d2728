//! Voting-bloc correlation matrix.
//!
//! Providers produce the full N×N cross-product over the fixed member
//! list (self-pairs included); rendering lives in [`svg`].

pub mod svg;

use anyhow::Result;
use rand::Rng;
use rusqlite::Connection;
use std::collections::{BTreeMap, HashMap};

use crate::logging::{log, obj, v_num, Domain, Level};
use crate::model::CorrelationCell;

/// The eight sitting council members, in chart order.
pub const MEMBERS: [&str; 8] = [
    "Payne", "Wonsley", "Osman", "Chughtai", "Chavez", "Palmisano", "Rainville", "Vetaw",
];

pub trait CorrelationProvider {
    fn correlations(&self, members: &[&str]) -> Result<Vec<CorrelationCell>>;
}

/// Mock provider: perfect self-alignment, uniform random everywhere
/// else, recomputed on every call.
pub struct MockCorrelationProvider;

impl CorrelationProvider for MockCorrelationProvider {
    fn correlations(&self, members: &[&str]) -> Result<Vec<CorrelationCell>> {
        let mut rng = rand::thread_rng();
        let mut cells = Vec::with_capacity(members.len() * members.len());
        for a in members {
            for b in members {
                let value = if a == b { 1.0 } else { rng.gen_range(-1.0..=1.0) };
                cells.push(CorrelationCell {
                    member_a: (*a).to_string(),
                    member_b: (*b).to_string(),
                    value,
                });
            }
        }
        log(
            Level::Debug,
            Domain::Matrix,
            "mock_correlations",
            obj(&[("cells", v_num(cells.len() as f64))]),
        );
        Ok(cells)
    }
}

/// Pearson correlation of Aye/Nay votes from the `votes` table.
/// Aye maps to 1, Nay to 0, anything else is ignored. Pairs with fewer
/// than two common items or zero variance fall back to 0.0 so the grid
/// stays complete.
pub struct VoteCorrelationProvider {
    pub sqlite_path: String,
}

impl VoteCorrelationProvider {
    fn load_votes(&self) -> Result<HashMap<String, BTreeMap<i64, f64>>> {
        let conn = Connection::open(&self.sqlite_path)?;
        let mut stmt = conn.prepare(
            "SELECT item_id, member_name, vote_cast FROM votes WHERE vote_cast IN ('Aye', 'Nay')",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut by_member: HashMap<String, BTreeMap<i64, f64>> = HashMap::new();
        for row in rows {
            let (item_id, member, vote) = row?;
            let numeric = if vote == "Aye" { 1.0 } else { 0.0 };
            by_member.entry(member).or_default().insert(item_id, numeric);
        }
        Ok(by_member)
    }
}

impl CorrelationProvider for VoteCorrelationProvider {
    fn correlations(&self, members: &[&str]) -> Result<Vec<CorrelationCell>> {
        let votes = self.load_votes()?;
        let empty = BTreeMap::new();
        let mut cells = Vec::with_capacity(members.len() * members.len());
        for a in members {
            for b in members {
                let value = if a == b {
                    1.0
                } else {
                    let va = votes.get(*a).unwrap_or(&empty);
                    let vb = votes.get(*b).unwrap_or(&empty);
                    pearson_on_common(va, vb).unwrap_or(0.0)
                };
                cells.push(CorrelationCell {
                    member_a: (*a).to_string(),
                    member_b: (*b).to_string(),
                    value,
                });
            }
        }
        log(
            Level::Info,
            Domain::Matrix,
            "vote_correlations",
            obj(&[
                ("members_with_votes", v_num(votes.len() as f64)),
                ("cells", v_num(cells.len() as f64)),
            ]),
        );
        Ok(cells)
    }
}

/// Provider selection: "votes" reads the ledger, anything else mocks.
pub fn provider_from(source: &str, sqlite_path: &str) -> Box<dyn CorrelationProvider> {
    match source {
        "votes" => Box::new(VoteCorrelationProvider {
            sqlite_path: sqlite_path.to_string(),
        }),
        _ => Box::new(MockCorrelationProvider),
    }
}

/// One vote in a member's recent record, for the persona prompt.
#[derive(Debug, Clone)]
pub struct RecentVote {
    pub title: String,
    pub vote_cast: String,
}

/// Analysis prompt asking the model to label a member's "Political
/// Trending" persona from their recent votes.
pub fn member_persona_prompt(member_name: &str, recent_votes: &[RecentVote]) -> String {
    let formatted_votes = recent_votes
        .iter()
        .map(|vote| format!("- {}: {}", vote.title, vote.vote_cast))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        concat!(
            "You are an expert political data scientist analyzing the Minneapolis City Council.\n",
            "Please review the last 20 votes made by Council Member {member}.\n",
            "\n",
            "Recent Votes:\n",
            "{votes}\n",
            "\n",
            "Based entirely on the voting record above, please determine this member's current \"Political Trending\" persona.\n",
            "Some examples might include (but are not limited to):\n",
            "- Pro-Transit Reformer\n",
            "- Fiscal Hawk\n",
            "- Affordable Housing Advocate\n",
            "- Law and Order Moderate\n",
            "\n",
            "Your Response Format Must Include:\n",
            "1. Persona Title: <A concise 2-4 word label>\n",
            "2. Summary Analysis: <One paragraph explaining why this persona fits, based on the specific vote topics>\n",
            "3. Bloc Deviation: <Note any specific instances where they broke from obvious political norms/factions on key issues>\n",
            "\n",
            "Keep the tone extremely analytical, neutral, and data-driven."
        ),
        member = member_name,
        votes = formatted_votes,
    )
}

/// Pearson r over the items both members voted on. None when fewer
/// than two common items or either side has zero variance.
fn pearson_on_common(a: &BTreeMap<i64, f64>, b: &BTreeMap<i64, f64>) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .filter_map(|(item, &va)| b.get(item).map(|&vb| (va, vb)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (va, vb) in &pairs {
        let da = va - mean_a;
        let db = vb - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    Some(cov / (var_a.sqrt() * var_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_full_cross_product() {
        let cells = MockCorrelationProvider.correlations(&MEMBERS).unwrap();
        assert_eq!(cells.len(), 64);
    }

    #[test]
    fn test_mock_diagonal_is_exactly_one() {
        let cells = MockCorrelationProvider.correlations(&MEMBERS).unwrap();
        for cell in cells.iter().filter(|c| c.member_a == c.member_b) {
            assert_eq!(cell.value, 1.0);
        }
    }

    #[test]
    fn test_mock_off_diagonal_in_range() {
        let cells = MockCorrelationProvider.correlations(&MEMBERS).unwrap();
        for cell in cells.iter().filter(|c| c.member_a != c.member_b) {
            assert!(cell.value >= -1.0 && cell.value <= 1.0, "out of range: {}", cell.value);
        }
    }

    fn votes(pairs: &[(i64, f64)]) -> BTreeMap<i64, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_pearson_identical_records() {
        let a = votes(&[(1, 1.0), (2, 0.0), (3, 1.0)]);
        let r = pearson_on_common(&a, &a).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_opposed_records() {
        let a = votes(&[(1, 1.0), (2, 0.0), (3, 1.0)]);
        let b = votes(&[(1, 0.0), (2, 1.0), (3, 0.0)]);
        let r = pearson_on_common(&a, &b).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance_is_none() {
        let a = votes(&[(1, 1.0), (2, 1.0), (3, 1.0)]);
        let b = votes(&[(1, 0.0), (2, 1.0), (3, 0.0)]);
        assert!(pearson_on_common(&a, &b).is_none());
    }

    #[test]
    fn test_pearson_too_few_common_items_is_none() {
        let a = votes(&[(1, 1.0)]);
        let b = votes(&[(1, 0.0), (2, 1.0)]);
        assert!(pearson_on_common(&a, &b).is_none());
    }

    #[test]
    fn test_provider_from_votes_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.sqlite");
        let mut store = crate::storage::LedgerStore::new(path.to_str().unwrap()).unwrap();
        store.init().unwrap();
        store.seed_demo().unwrap();
        drop(store);

        let provider = provider_from("votes", path.to_str().unwrap());
        let a = provider.correlations(&MEMBERS).unwrap();
        let b = provider.correlations(&MEMBERS).unwrap();
        assert_eq!(a.len(), 64);
        for (ca, cb) in a.iter().zip(&b) {
            assert_eq!(ca.value, cb.value);
        }
    }

    #[test]
    fn test_provider_from_default_mocks() {
        let cells = provider_from("mock", "unused.sqlite")
            .correlations(&MEMBERS)
            .unwrap();
        assert_eq!(cells.len(), 64);
        for cell in cells.iter().filter(|c| c.member_a == c.member_b) {
            assert_eq!(cell.value, 1.0);
        }
    }

    #[test]
    fn test_persona_prompt_lists_votes_and_format() {
        let votes = vec![
            RecentVote {
                title: "2026 Budget Amendment - Transit Infrastructure".to_string(),
                vote_cast: "Aye".to_string(),
            },
            RecentVote {
                title: "Zoning Board Ordinance 2026-11".to_string(),
                vote_cast: "Nay".to_string(),
            },
        ];
        let prompt = member_persona_prompt("Payne", &votes);
        assert!(prompt.contains("Council Member Payne"));
        assert!(prompt.contains("- 2026 Budget Amendment - Transit Infrastructure: Aye"));
        assert!(prompt.contains("- Zoning Board Ordinance 2026-11: Nay"));
        assert!(prompt.contains("1. Persona Title:"));
        assert!(prompt.contains("3. Bloc Deviation:"));
    }

    #[test]
    fn test_vote_provider_grid_complete_on_empty_db() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("votes.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE votes (item_id INTEGER, member_name TEXT, vote_cast TEXT);",
        )
        .unwrap();
        drop(conn);

        let provider = VoteCorrelationProvider {
            sqlite_path: path.to_string_lossy().to_string(),
        };
        let cells = provider.correlations(&MEMBERS).unwrap();
        assert_eq!(cells.len(), 64);
        for cell in &cells {
            if cell.member_a == cell.member_b {
                assert_eq!(cell.value, 1.0);
            } else {
                assert_eq!(cell.value, 0.0);
            }
        }
    }
}
