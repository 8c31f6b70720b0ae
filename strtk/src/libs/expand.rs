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

use crate::structs::{ExpandedRow, ExpandedTable, GenotypeCall, StrRecord, VariantKey, VcfTable};
use crate::utils::str_allele_end;

/// Genotypes carrying no allele information for any expanded row
pub const NO_CALL_GENOTYPES: [&str; 4] = ["./.", "0/0", ".|.", "0|0"];

/// Classify a raw genotype (`a/b`, optionally followed by `:` subfields)
/// against the 1-based `allele_idx`.
///
/// A sample carrying `allele_idx` once is `Het`, whatever the other allele
/// is, so compound heterozygotes (`1/2`) are `Het` on both rows.
pub fn classify_genotype(raw: &str, allele_idx: usize) -> GenotypeCall {
    let gt = raw.split(':').next().unwrap_or_default().trim();

    if gt.is_empty() || gt == "." || NO_CALL_GENOTYPES.contains(&gt) {
        return GenotypeCall::NoCall;
    }

    let mut alleles = gt.split(['/', '|']).map(str::trim);
    let a = alleles.next().unwrap_or_default();
    // Haploid calls count as a homozygous pair
    let b = alleles.next().unwrap_or(a);

    let is_target = |allele: &str| allele.parse::<usize>().is_ok_and(|idx| idx == allele_idx);

    match (is_target(a), is_target(b)) {
        (true, true) => GenotypeCall::HomAlt,
        (true, false) | (false, true) => GenotypeCall::Het,
        (false, false) => GenotypeCall::NoCall,
    }
}

/// One row per entry of the record's allele map
/// One row per STR allele. Records from the parser have their END values
/// checked already, an allele whose END overflows is dropped here.
pub fn expand_record(record: &StrRecord) -> Vec<ExpandedRow> {
    record
        .alleles
        .iter()
        .filter_map(|(&allele_idx, &repeats)| {
            let Some(end) = str_allele_end(record.pos, &record.rep_unit, repeats) else {
                tracing::warn!("END of STR{repeats} overflows at line {}. Skipping the allele.", record.line);
                return None;
            };

            let key = VariantKey {
                chrom: record.chrom.clone(),
                pos: record.pos,
                reference: record.reference.clone(),
                alt: format!("STR{repeats}"),
                end,
                rep_unit: record.rep_unit.clone(),
                var_id: record.var_id.clone(),
            };

            let calls = record
                .genotypes
                .iter()
                .map(|gt| classify_genotype(gt, allele_idx))
                .collect();

            Some(ExpandedRow { key, calls })
        })
        .collect()
}

pub fn expand_table(table: VcfTable) -> ExpandedTable {
    let rows: Vec<ExpandedRow> = table.records.iter().flat_map(expand_record).collect();

    tracing::debug!(
        "Expanded {} records into {} rows from {}",
        table.records.len(),
        rows.len(),
        table.path.display()
    );

    ExpandedTable {
        path: table.path,
        samples: table.samples,
        rows,
    }
}
