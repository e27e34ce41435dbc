use serde::{Deserialize, Serialize};

use ewaste_core::{Aggregate, AggregateRoot, DomainError};

use crate::coefficient::CoefficientTable;
use crate::entry::{Entry, Quantity};

/// Aggregate root: Ledger (ordered recycling entries).
///
/// Row position is the only key an entry has. Deleting a row shifts every
/// later row down by one.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Entry>,
    version: u64,
}

impl PartialEq for Ledger {
    // `version` counts in-memory applications only; two ledgers with the same
    // rows are the same ledger.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from persisted rows, in stored order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            version: 0,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total kilograms of CO₂ saved across all entries.
    ///
    /// Exactly `0.0` (never `-0.0`) for an empty ledger.
    pub fn total_saved(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, e| acc + e.co2_saved())
    }

    /// CO₂ saved per item, in order of first appearance.
    ///
    /// Only items with at least one entry are present.
    pub fn aggregate_by_item(&self) -> ItemTotals {
        let mut totals: Vec<ItemTotal> = Vec::new();
        for entry in &self.entries {
            match totals.iter_mut().find(|t| t.item == entry.item()) {
                Some(total) => total.co2_saved += entry.co2_saved(),
                None => totals.push(ItemTotal {
                    item: entry.item().to_string(),
                    co2_saved: entry.co2_saved(),
                }),
            }
        }
        ItemTotals(totals)
    }
}

impl AggregateRoot for Ledger {
    fn version(&self) -> u64 {
        self.version
    }
}

/// Summed CO₂ for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTotal {
    pub item: String,
    pub co2_saved: f64,
}

/// One item's percentage of the overall total (pie chart slice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemShare {
    pub item: String,
    pub percent: f64,
}

/// Per-item CO₂ totals in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTotals(Vec<ItemTotal>);

impl ItemTotals {
    pub fn get(&self, item: &str) -> Option<f64> {
        self.0.iter().find(|t| t.item == item).map(|t| t.co2_saved)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemTotal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all items; equals the ledger's `total_saved`.
    pub fn total(&self) -> f64 {
        self.0.iter().fold(0.0, |acc, t| acc + t.co2_saved)
    }

    /// Each item's share of the total, in percent.
    ///
    /// Empty when the total is zero.
    pub fn shares(&self) -> Vec<ItemShare> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }
        self.0
            .iter()
            .map(|t| ItemShare {
                item: t.item.clone(),
                percent: t.co2_saved / total * 100.0,
            })
            .collect()
    }
}

impl IntoIterator for ItemTotals {
    type Item = ItemTotal;
    type IntoIter = std::vec::IntoIter<ItemTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Command: RecordEntry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    pub item: String,
    pub quantity: i64,
    pub coefficients: CoefficientTable,
}

/// Command: DeleteEntry (positional).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteEntry {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    RecordEntry(RecordEntry),
    DeleteEntry(DeleteEntry),
    Clear,
}

/// Event: EntryRecorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecorded {
    pub entry: Entry,
}

/// Event: EntryDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDeleted {
    pub index: usize,
    pub entry: Entry,
}

/// Event: LedgerCleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerCleared {
    /// Number of entries dropped (0 when the ledger was already empty).
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    EntryRecorded(EntryRecorded),
    EntryDeleted(EntryDeleted),
    LedgerCleared(LedgerCleared),
}

impl LedgerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::EntryRecorded(_) => "ledger.entry.recorded",
            LedgerEvent::EntryDeleted(_) => "ledger.entry.deleted",
            LedgerEvent::LedgerCleared(_) => "ledger.cleared",
        }
    }
}

impl Aggregate for Ledger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::EntryRecorded(e) => {
                self.entries.push(e.entry.clone());
            }
            LedgerEvent::EntryDeleted(e) => {
                if e.index < self.entries.len() {
                    self.entries.remove(e.index);
                }
            }
            LedgerEvent::LedgerCleared(_) => {
                self.entries.clear();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::RecordEntry(cmd) => self.handle_record(cmd),
            LedgerCommand::DeleteEntry(cmd) => self.handle_delete(cmd),
            LedgerCommand::Clear => Ok(vec![LedgerEvent::LedgerCleared(LedgerCleared {
                removed: self.entries.len(),
            })]),
        }
    }
}

impl Ledger {
    fn handle_record(&self, cmd: &RecordEntry) -> Result<Vec<LedgerEvent>, DomainError> {
        let quantity = Quantity::new(cmd.quantity)?;
        let entry = Entry::priced(&cmd.item, quantity, &cmd.coefficients)?;
        Ok(vec![LedgerEvent::EntryRecorded(EntryRecorded { entry })])
    }

    fn handle_delete(&self, cmd: &DeleteEntry) -> Result<Vec<LedgerEvent>, DomainError> {
        let entry = self
            .entries
            .get(cmd.index)
            .cloned()
            .ok_or_else(|| DomainError::index_out_of_range(cmd.index, self.entries.len()))?;
        Ok(vec![LedgerEvent::EntryDeleted(EntryDeleted {
            index: cmd.index,
            entry,
        })])
    }
}
