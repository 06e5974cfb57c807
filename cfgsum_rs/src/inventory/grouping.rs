use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::types::FunctorRecord;

/// All functors sharing one `type` value.
#[derive(Clone, Debug)]
pub struct CalculatorGroup {
    pub calculator_type: String,
    pub files: BTreeSet<PathBuf>,
    pub functors: Vec<FunctorRecord>,
}

impl CalculatorGroup {
    fn new(calculator_type: &str) -> Self {
        Self {
            calculator_type: calculator_type.to_string(),
            files: BTreeSet::new(),
            functors: Vec::new(),
        }
    }

    fn push(&mut self, record: FunctorRecord) {
        self.files.insert(record.source_file.clone());
        self.functors.push(record);
    }
}

/// Partition records by their `type` property, keeping first-seen type order.
/// Records without a type, or with an empty one, are dropped.
pub fn group_by_type(records: impl IntoIterator<Item = FunctorRecord>) -> Vec<CalculatorGroup> {
    let mut groups: Vec<CalculatorGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(calc_type) = record
            .calculator_type()
            .filter(|t| !t.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        let slot = *index.entry(calc_type.clone()).or_insert_with(|| {
            groups.push(CalculatorGroup::new(&calc_type));
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    groups
}
