// STRTK - Short tandem repeat toolkit
// Copyright (C) 2024  Osma S. Rautila
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use std::collections::{hash_map::Entry, BTreeSet, HashMap};

use indexmap::IndexMap;

use crate::structs::{ExpandedTable, GenotypeCall, MergedRow, MergedTable, VariantKey};

/// Full outer join of expanded tables on [`VariantKey`].
///
/// Tables are accumulated with [`SampleMerger::add_table`]; the sample
/// columns are only fixed by [`SampleMerger::finalize`], once every input has
/// been seen. Rows keep the order in which their key was first seen.
#[derive(Debug, Default)]
pub struct SampleMerger {
    samples: BTreeSet<String>,
    rows: IndexMap<VariantKey, HashMap<String, GenotypeCall>>,
    ntables: usize,
    conflicts: usize,
}

impl SampleMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, table: ExpandedTable) {
        self.samples.extend(table.samples.iter().cloned());
        self.ntables += 1;

        for row in table.rows {
            let cells = self.rows.entry(row.key.clone()).or_default();

            for (sample, call) in table.samples.iter().zip(row.calls) {
                match cells.entry(sample.clone()) {
                    Entry::Vacant(cell) => {
                        cell.insert(call);
                    }
                    Entry::Occupied(mut cell) => {
                        let current = *cell.get();
                        if current.is_no_call() {
                            cell.insert(call);
                        } else if !call.is_no_call() && call != current {
                            tracing::warn!(
                                "Conflicting calls {current} and {call} for {sample} at {}. Keeping {current}.",
                                row.key
                            );
                            self.conflicts += 1;
                        }
                    }
                }
            }
        }
    }

    /// Samples seen so far, sorted
    pub fn samples(&self) -> impl Iterator<Item = &String> {
        self.samples.iter()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Fix the sample columns and fill unseen cells with no-calls
    pub fn finalize(self) -> MergedTable {
        let samples: Vec<String> = self.samples.into_iter().collect();

        let rows = self
            .rows
            .into_iter()
            .map(|(key, mut cells)| {
                let calls = samples
                    .iter()
                    .map(|s| cells.remove(s).unwrap_or_default())
                    .collect();
                MergedRow { key, ac: 0, calls }
            })
            .collect::<Vec<MergedRow>>();

        tracing::info!(
            "Merged {} tables into {} rows and {} samples.",
            self.ntables,
            rows.len(),
            samples.len()
        );

        if self.conflicts > 0 {
            tracing::warn!("{} cells had conflicting calls between inputs.", self.conflicts);
        }

        MergedTable { samples, rows }
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;
    use crate::structs::ExpandedRow;
    use GenotypeCall::*;

    fn key(chrom: &str, pos: u64, alt: &str) -> VariantKey {
        VariantKey {
            chrom: chrom.into(), pos, reference: "C".into(), alt: alt.into(),
            end: pos + 10, rep_unit: "CA".into(), var_id: ".".into(),
        }
    }

    fn table(samples: Vec<&str>, rows: Vec<(VariantKey, Vec<GenotypeCall>)>) -> ExpandedTable {
        ExpandedTable {
            path: "test.vcf".into(),
            samples: samples.into_iter().map(String::from).collect(),
            rows: rows.into_iter().map(|(key, calls)| ExpandedRow { key, calls }).collect(),
        }
    }

    #[test]
    fn outer_join_fills_sentinels() {
        let mut merger = SampleMerger::new();
        merger.add_table(table(vec!["sampleB"], vec![(key("chr1", 100, "STR7"), vec![Het])]));
        merger.add_table(table(vec!["sampleA"], vec![
            (key("chr1", 100, "STR7"), vec![HomAlt]),
            (key("chr2", 50, "STR3"), vec![Het]),
        ]));

        assert_eq!(merger.samples().collect::<Vec<_>>(), vec!["sampleA", "sampleB"]);
        assert_eq!(merger.nrows(), 2);

        let merged = merger.finalize();
        assert_eq!(merged.samples, vec!["sampleA", "sampleB"]);
        assert_eq!(merged.rows.len(), 2);

        // First seen order
        assert_eq!(merged.rows[0].key, key("chr1", 100, "STR7"));
        assert_eq!(merged.rows[0].calls, vec![HomAlt, Het]);

        // sampleB never saw chr2
        assert_eq!(merged.rows[1].calls, vec![Het, NoCall]);
        assert!(merged.rows.iter().all(|r| r.calls.len() == 2));
    }

    #[test]
    fn keys_differing_in_one_field_are_not_joined() {
        let mut other = key("chr1", 100, "STR7");
        other.var_id = String::from("DMPK");

        let mut merger = SampleMerger::new();
        merger.add_table(table(vec!["sampleA"], vec![(key("chr1", 100, "STR7"), vec![Het])]));
        merger.add_table(table(vec!["sampleB"], vec![(other, vec![Het])]));

        let merged = merger.finalize();
        assert_eq!(merged.rows.len(), 2);
        assert_eq!(merged.rows[0].calls, vec![Het, NoCall]);
        assert_eq!(merged.rows[1].calls, vec![NoCall, Het]);
    }

    #[test]
    fn calls_replace_no_calls_and_first_call_wins() {
        let mut merger = SampleMerger::new();
        merger.add_table(table(vec!["sampleA"], vec![(key("chr1", 100, "STR7"), vec![NoCall])]));
        merger.add_table(table(vec!["sampleA"], vec![(key("chr1", 100, "STR7"), vec![Het])]));
        merger.add_table(table(vec!["sampleA"], vec![(key("chr1", 100, "STR7"), vec![HomAlt])]));
        merger.add_table(table(vec!["sampleA"], vec![(key("chr1", 100, "STR7"), vec![NoCall])]));

        let merged = merger.finalize();
        assert_eq!(merged.samples, vec!["sampleA"]);
        assert_eq!(merged.rows.len(), 1);
        assert_eq!(merged.rows[0].calls, vec![Het]);
    }

    #[test]
    fn empty_merger() {
        let merged = SampleMerger::new().finalize();
        assert!(merged.samples.is_empty());
        assert!(merged.rows.is_empty());
    }
}
