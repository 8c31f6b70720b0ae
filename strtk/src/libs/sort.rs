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

use std::cmp::Ordering;

use crate::structs::MergedRow;

/// Sort key of a chromosome label.
///
/// Numeric labels, with or without a `chr` prefix, come first in numeric
/// order. Everything else (X, Y, M, unplaced contigs) follows in
/// lexicographic order. The full label breaks ties so that `chr1` and `1`
/// do not interleave.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChromOrder<'a> {
    Numeric(u64, &'a str),
    Named(&'a str),
}

impl<'a> ChromOrder<'a> {
    pub fn from_label(label: &'a str) -> Self {
        let stripped = label.strip_prefix("chr").unwrap_or(label);

        if !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = stripped.parse::<u64>() {
                return Self::Numeric(n, label);
            }
        }

        Self::Named(label)
    }
}

pub fn compare_chroms(a: &str, b: &str) -> Ordering {
    ChromOrder::from_label(a).cmp(&ChromOrder::from_label(b))
}

/// Stable sort by chromosome and integer position
pub fn sort_genome_order(rows: &mut [MergedRow]) {
    rows.sort_by(|a, b| {
        compare_chroms(&a.key.chrom, &b.key.chrom).then_with(|| a.key.pos.cmp(&b.key.pos))
    });
}
