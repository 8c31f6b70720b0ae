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

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Marker for a missing or inapplicable cell
pub const SENTINEL: &str = ".";

/// Leading columns of the merged table, sample columns follow
pub const FIXED_COLUMNS: [&str; 8] = [
    "CHROM", "POS", "REF", "ALT", "END", "REP_UNIT", "VAR_ID", "AC",
];

/// 1-based ALT allele index to repeat count, in ALT order
pub type AlleleMap = BTreeMap<usize, u64>;

/// Identity of a single expanded STR allele. Two rows are joined only when
/// every field is equal.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub chrom: String,
    pub pos: u64,
    pub reference: String,
    pub alt: String,
    pub end: u64,
    pub rep_unit: String,
    pub var_id: String,
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let line = format!(
            "{}_{}_{}_{}_{}",
            self.chrom, self.pos, self.alt, self.rep_unit, self.var_id
        );
        write!(f, "{line}")
    }
}

/// A sample's call relative to one expanded allele
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenotypeCall {
    /// The sample was not seen carrying this allele
    #[default]
    NoCall,
    /// One copy of the allele. Also used when the other copy is a different ALT.
    Het,
    /// Both copies are the allele
    HomAlt,
}

impl GenotypeCall {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCall => SENTINEL,
            Self::Het => "0/1",
            Self::HomAlt => "1/1",
        }
    }

    /// Carrier weight of the call
    pub fn dosage(self) -> u32 {
        match self {
            Self::NoCall => 0,
            Self::Het => 1,
            Self::HomAlt => 2,
        }
    }

    pub fn is_no_call(&self) -> bool {
        *self == Self::NoCall
    }
}

impl std::fmt::Display for GenotypeCall {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single STR record of a VCF, before expansion
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StrRecord {
    /// 1-based line number in the source file
    pub line: usize,
    pub chrom: String,
    pub pos: u64,
    pub reference: String,
    pub rep_unit: String,
    pub ref_repeats: u64,
    pub var_id: String,
    pub alleles: AlleleMap,
    /// GT subfield per sample, aligned with the header samples
    pub genotypes: Vec<String>,
}

/// Records and header samples of one VCF
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VcfTable {
    pub path: PathBuf,
    pub samples: Vec<String>,
    pub records: Vec<StrRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedRow {
    pub key: VariantKey,
    pub calls: Vec<GenotypeCall>,
}

/// One row per allele of every record in a VCF. Calls are aligned with `samples`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpandedTable {
    pub path: PathBuf,
    pub samples: Vec<String>,
    pub rows: Vec<ExpandedRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub key: VariantKey,
    pub ac: u32,
    pub calls: Vec<GenotypeCall>,
}

impl From<&MergedRow> for Vec<String> {
    fn from(row: &MergedRow) -> Vec<String> {
        let mut record = vec![
            row.key.chrom.clone(),
            row.key.pos.to_string(),
            row.key.reference.clone(),
            row.key.alt.clone(),
            row.key.end.to_string(),
            row.key.rep_unit.clone(),
            row.key.var_id.clone(),
            row.ac.to_string(),
        ];
        record.extend(row.calls.iter().map(|c| c.as_str().to_string()));
        record
    }
}

/// The joined table. Every row has one call per entry of `samples`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MergedTable {
    pub samples: Vec<String>,
    pub rows: Vec<MergedRow>,
}

impl MergedTable {
    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(ToString::to_string)
            .chain(self.samples.iter().cloned())
            .collect()
    }

    pub fn sample_idx(&self, sample: &str) -> Option<usize> {
        self.samples.binary_search_by(|s| s.as_str().cmp(sample)).ok()
    }

    pub fn call(&self, row: &MergedRow, sample: &str) -> Option<GenotypeCall> {
        self.sample_idx(sample).and_then(|i| row.calls.get(i).copied())
    }

    pub fn find_rows<'a>(&'a self, chrom: &'a str, pos: u64) -> impl Iterator<Item = &'a MergedRow> {
        self.rows
            .iter()
            .filter(move |r| r.key.chrom == chrom && r.key.pos == pos)
    }
}
