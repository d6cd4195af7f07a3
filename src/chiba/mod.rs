//! The Chiba sale table: a CSV-backed listing of horses bought at the sale,
//! with the sort/filter behavior of the page modeled as explicit state and
//! pure transitions.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One row of `chiba-sale.csv`: owner,horse,price,point. Values stay as
/// text; the page only displays and sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub owner: String,
    pub horse: String,
    pub price: String,
    pub point: String,
}

impl SaleRecord {
    fn key(&self, key: SortKey) -> &str {
        match key {
            SortKey::Owner => &self.owner,
            SortKey::Horse => &self.horse,
            SortKey::Price => &self.price,
            SortKey::Point => &self.point,
        }
    }
}

/// Parse the sale CSV. The first line is a header and is skipped; short
/// lines are ignored rather than failing the whole load.
pub fn load_sale_csv(path: impl AsRef<Path>) -> anyhow::Result<Vec<SaleRecord>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_sale_csv(&text))
}

pub fn parse_sale_csv(text: &str) -> Vec<SaleRecord> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split(',');
            Some(SaleRecord {
                owner: fields.next()?.trim().to_string(),
                horse: fields.next()?.trim().to_string(),
                price: fields.next()?.trim().to_string(),
                point: fields.next()?.trim().to_string(),
            })
        })
        .filter(|r| !r.owner.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Table state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Owner,
    Horse,
    Price,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Explicit table state: which column is sorted, in which order, and which
/// owners are hidden. All transitions are pure; `view` projects the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub hidden_owners: BTreeSet<String>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Owner,
            sort_order: SortOrder::Desc,
            hidden_owners: BTreeSet::new(),
        }
    }
}

impl TableState {
    /// Clicking a column header: same column flips the order, a new column
    /// keeps the current order.
    pub fn toggle_sort(&self, key: SortKey) -> Self {
        let mut next = self.clone();
        if self.sort_key == key {
            next.sort_order = self.sort_order.flipped();
        }
        next.sort_key = key;
        next
    }

    pub fn set_owner_visible(&self, owner: &str, visible: bool) -> Self {
        let mut next = self.clone();
        if visible {
            next.hidden_owners.remove(owner);
        } else {
            next.hidden_owners.insert(owner.to_string());
        }
        next
    }

    /// Apply the filter and sort to a snapshot of the records.
    pub fn view(&self, records: &[SaleRecord]) -> Vec<SaleRecord> {
        let mut rows: Vec<SaleRecord> = records
            .iter()
            .filter(|r| !self.hidden_owners.contains(&r.owner))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ord = a.key(self.sort_key).cmp(b.key(self.sort_key));
            match self.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        rows
    }
}

/// Distinct owners in first-appearance order, for the filter checkboxes.
pub fn distinct_owners(records: &[SaleRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.owner.clone()))
        .map(|r| r.owner.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "owner,horse,price,point\n\
                       alice,Thunder,1000,10\n\
                       bob,Lightning,2000,5\n\
                       alice,Storm,1500,8\n";

    fn records() -> Vec<SaleRecord> {
        parse_sale_csv(CSV)
    }

    #[test]
    fn test_parse_skips_header_and_short_lines() {
        let recs = parse_sale_csv("owner,horse,price,point\nalice,Thunder,1000,10\nbroken\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].horse, "Thunder");
    }

    #[test]
    fn test_distinct_owners_keeps_first_appearance_order() {
        assert_eq!(distinct_owners(&records()), vec!["alice", "bob"]);
    }

    #[test]
    fn test_toggle_same_column_flips_order() {
        let state = TableState::default();
        assert_eq!(state.sort_order, SortOrder::Desc);
        let state = state.toggle_sort(SortKey::Owner);
        assert_eq!(state.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_toggle_new_column_keeps_order() {
        let state = TableState::default().toggle_sort(SortKey::Price);
        assert_eq!(state.sort_key, SortKey::Price);
        assert_eq!(state.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_view_sorts_and_filters() {
        let state = TableState::default()
            .toggle_sort(SortKey::Horse)
            .toggle_sort(SortKey::Horse); // asc
        let state = state.set_owner_visible("bob", false);

        let rows = state.view(&records());
        let horses: Vec<&str> = rows.iter().map(|r| r.horse.as_str()).collect();
        assert_eq!(horses, vec!["Storm", "Thunder"]);
    }

    #[test]
    fn test_filter_roundtrip_restores_rows() {
        let state = TableState::default()
            .set_owner_visible("alice", false)
            .set_owner_visible("alice", true);
        assert_eq!(state.view(&records()).len(), 3);
    }
}
