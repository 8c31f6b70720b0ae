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

use std::path::{Path, PathBuf};

use color_eyre::Result;
use rayon::prelude::*;

use crate::{
    allele_count::count_alleles,
    args::MergeArgs,
    expand::expand_table,
    io::{collect_input_files, save_merged_table},
    merger::SampleMerger,
    read_vcf::read_str_vcf,
    sort::sort_genome_order,
    structs::{ExpandedTable, MergedTable},
};

#[doc(hidden)]
pub fn run(args: MergeArgs) -> Result<()> {
    let files = collect_input_files(&args.inputs())?;
    let path = merge_to_file(&files, &args.outdir, &args.output)?;
    tracing::info!("Merged table saved to {}", path.display());
    Ok(())
}

/// Parse and expand every file in parallel, then join, count and sort.
///
/// The files are merged in the given order, which fixes the order of rows
/// sharing a chromosome and position.
pub fn merge_files(files: &[PathBuf]) -> Result<MergedTable> {
    tracing::info!("Merging {} VCF files.", files.len());

    let tables = files
        .par_iter()
        .map(|path| -> Result<ExpandedTable> {
            tracing::info!("Processing file: {}", path.display());
            let table = read_str_vcf(path)?;
            Ok(expand_table(table))
        })
        .collect::<Result<Vec<ExpandedTable>>>()?;

    let mut merger = SampleMerger::new();
    for table in tables {
        merger.add_table(table);
    }

    let mut merged = merger.finalize();
    count_alleles(&mut merged);
    sort_genome_order(&mut merged.rows);

    Ok(merged)
}

pub fn merge_to_file(files: &[PathBuf], outdir: &Path, name: &str) -> Result<PathBuf> {
    let merged = merge_files(files)?;
    save_merged_table(&merged, outdir, name)
}
