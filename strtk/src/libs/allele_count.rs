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

use crate::structs::{GenotypeCall, MergedTable};

/// Carrier weighted count: one per `Het` and two per `HomAlt` call.
/// Not a population allele count.
pub fn allele_count(calls: &[GenotypeCall]) -> u32 {
    calls.iter().map(|c| c.dosage()).sum()
}

pub fn count_alleles(table: &mut MergedTable) {
    for row in &mut table.rows {
        row.ac = allele_count(&row.calls);
    }
}
