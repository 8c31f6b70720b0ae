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

//! STRTK - Short tandem repeat toolkit
//!
//! Merge per-sample short tandem repeat VCFs into a single wide table with one
//! row per STR allele.
//!
//! The merge runs in stages:
//!
//! * Parse every VCF into STR records ([`read_vcf`])
//! * Expand multiallelic records into one row per ALT allele ([`expand`])
//! * Outer join the per-file tables on the variant key ([`merger`])
//! * Count carrier weighted alleles per row ([`allele_count`])
//! * Sort the rows into genome order ([`sort`])
//! * Write the table as tab separated text ([`io`])
//!
//! # Running STRTK
//!
//! To print the available commands use:
//! ```bash
//! strtk --help
//! ```
//! To merge all gzipped VCFs of a folder:
//! ```bash
//! strtk merge --folder ${vcf_dir} --outdir ${outdir} --output merged_output.txt
//! ```
//!
//! To split the VCFs by phenotype and merge both groups:
//! ```bash
//! strtk group affected.txt --folder ${vcf_dir} --merge --outdir ${outdir}
//! ```

#[doc(hidden)]
pub mod args;

#[doc(hidden)]
pub mod io;

/// Functions for reading STR VCFs into records
pub mod read_vcf;

/// Expanding multiallelic records into single allele rows
pub mod expand;

/// Outer join of the expanded tables
pub mod merger;

/// Carrier weighted allele count
pub mod allele_count;

/// Genome ordering of merged rows
pub mod sort;

/// Phenotype based routing of VCF files
pub mod group;

/// STRTK structs
pub mod structs;

#[doc(hidden)]
pub mod utils;

#[doc(hidden)]
pub mod error;

#[cfg(feature = "clap")]
pub mod clap;
