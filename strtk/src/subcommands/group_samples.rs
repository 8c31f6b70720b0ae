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

use std::path::PathBuf;

use color_eyre::Result;

use crate::{
    error::Error,
    group::{read_phenotypes, route_files, Phenotype},
    io::{collect_input_files, create_outdir, get_output, get_tsv_writer},
    utils::strip_prefix,
};

use super::merge_vcfs::merge_to_file;

#[doc(hidden)]
#[tracing::instrument]
pub fn run(
    phenotypes: PathBuf,
    folder: PathBuf,
    merge: bool,
    outdir: PathBuf,
    prefix: Option<String>,
) -> Result<()> {
    let phenotypes = read_phenotypes(&phenotypes)?;
    let routed = route_files(&folder, &phenotypes)?;

    create_outdir(&outdir)?;
    let prefix = strip_prefix(prefix);

    let mut wrtr = get_tsv_writer(get_output(Some(outdir.join(output_name(&prefix, "routing", "tsv"))))?);
    for file in &routed {
        wrtr.serialize(file)?;
    }
    wrtr.flush()?;

    if !merge {
        return Ok(());
    }

    for phenotype in [Phenotype::Control, Phenotype::Case] {
        let group_dir = folder.join(phenotype.dir_name());

        let files = match collect_input_files(&[group_dir]) {
            Ok(files) => files,
            Err(Error::NoInputFiles) => {
                tracing::warn!("No VCFs in the {} group. Skipping merge.", phenotype.dir_name());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let name = output_name(&prefix, phenotype.dir_name(), "txt");
        let path = merge_to_file(&files, &outdir, &name)?;
        tracing::info!("Merged {} table saved to {}", phenotype.dir_name(), path.display());
    }

    Ok(())
}

fn output_name(prefix: &Option<String>, name: &str, suffix: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}_{name}.{suffix}"),
        None => format!("{name}.{suffix}"),
    }
}
