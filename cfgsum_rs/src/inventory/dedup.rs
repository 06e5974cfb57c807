use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::types::{CASHFLOW_KEY, FunctorRecord, TYPE_KEY};

/// Functors with the same property tuple, merged across files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DedupRow {
    /// Name of the first functor seen with this tuple.
    pub name: String,
    pub cashflow: String,
    /// Values aligned with the property columns of the group.
    pub values: Vec<String>,
    /// Every source file holding a functor with this tuple.
    pub files: BTreeSet<PathBuf>,
}

/// Sorted union of property keys, minus `type` and `cashflow`.
pub fn property_columns<'a>(functors: impl IntoIterator<Item = &'a FunctorRecord>) -> Vec<String> {
    let keys: BTreeSet<&str> = functors
        .into_iter()
        .flat_map(|f| f.properties.keys())
        .filter(|k| *k != TYPE_KEY && *k != CASHFLOW_KEY)
        .collect();
    keys.into_iter().map(str::to_string).collect()
}

/// Collapse functors whose values over `columns` are identical.
///
/// The first functor of a tuple provides name and cashflow; every functor of
/// the tuple adds its file. Nameless rows are dropped and the rest are ordered
/// by `(cashflow, name)`.
pub fn dedup_rows(functors: &[FunctorRecord], columns: &[String]) -> Vec<DedupRow> {
    let mut rows: Vec<DedupRow> = Vec::new();
    let mut seen: HashMap<Vec<String>, usize> = HashMap::new();

    for functor in functors {
        let key: Vec<String> = columns
            .iter()
            .map(|c| functor.properties.get(c).unwrap_or_default().to_string())
            .collect();
        let slot = match seen.get(&key) {
            Some(&slot) => slot,
            None => {
                rows.push(DedupRow {
                    name: functor.name.clone(),
                    cashflow: functor
                        .properties
                        .get(CASHFLOW_KEY)
                        .unwrap_or_default()
                        .to_string(),
                    values: key.clone(),
                    files: BTreeSet::new(),
                });
                seen.insert(key, rows.len() - 1);
                rows.len() - 1
            }
        };
        rows[slot].files.insert(functor.source_file.clone());
    }

    rows.retain(|r| !r.name.is_empty());
    rows.sort_by(|a, b| a.cashflow.cmp(&b.cashflow).then_with(|| a.name.cmp(&b.name)));
    rows
}
