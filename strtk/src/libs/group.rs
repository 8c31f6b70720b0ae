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

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use serde::Serialize;

use crate::error::Error;
use crate::io::{read_lines, FileType};
use crate::utils::sample_id_from_file_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phenotype {
    Control,
    Case,
}

impl Phenotype {
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "0" => Some(Self::Control),
            "1" => Some(Self::Case),
            _ => None,
        }
    }

    /// Name of the group folder inside the VCF folder
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Control => "controls_0",
            Self::Case => "cases_1",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Phenotypes {
    pub controls: BTreeSet<String>,
    pub cases: BTreeSet<String>,
}

impl Phenotypes {
    pub fn get(&self, sample: &str) -> Option<Phenotype> {
        if self.controls.contains(sample) {
            Some(Phenotype::Control)
        } else if self.cases.contains(sample) {
            Some(Phenotype::Case)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.controls.len() + self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A VCF moved into a group folder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedFile {
    pub file: String,
    pub sample: String,
    pub phenotype: Phenotype,
}

/// Read a `sample<whitespace>status` file where status 0 is a control and 1 a case
pub fn read_phenotypes(path: &Path) -> Result<Phenotypes> {
    let mut phenotypes = Phenotypes::default();

    for (i, line) in read_lines(path)?.enumerate() {
        let line = line.wrap_err_with(|| eyre!("Failed to read {}", path.display()))?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let (sample, status) = match parts.as_slice() {
            [sample, status] => (*sample, *status),
            _ => {
                tracing::warn!("Invalid line format at {}:{}: {line}", path.display(), i + 1);
                continue;
            }
        };

        match Phenotype::from_status(status) {
            Some(Phenotype::Control) => phenotypes.controls.insert(sample.to_string()),
            Some(Phenotype::Case) => phenotypes.cases.insert(sample.to_string()),
            None => {
                tracing::warn!("Unknown status {status:?} for sample {sample}");
                continue;
            }
        };
    }

    if let Some(sample) = phenotypes.controls.intersection(&phenotypes.cases).next() {
        return Err(Error::AmbiguousPhenotype {
            sample: sample.clone(),
            path: path.to_path_buf(),
        }
        .into());
    }

    tracing::info!(
        "Read {} controls and {} cases from {}",
        phenotypes.controls.len(),
        phenotypes.cases.len(),
        path.display()
    );

    Ok(phenotypes)
}

/// Move the `.vcf.gz` files of `folder` into `controls_0` and `cases_1`
/// subfolders by the sample ID in the file name. Unlisted samples stay put.
pub fn route_files(folder: &Path, phenotypes: &Phenotypes) -> Result<Vec<RoutedFile>> {
    for phenotype in [Phenotype::Control, Phenotype::Case] {
        let dir = folder.join(phenotype.dir_name());
        std::fs::create_dir_all(&dir)
            .wrap_err_with(|| eyre!("Error creating directory {}", dir.display()))?;
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(folder)
        .wrap_err_with(|| eyre!("Failed to list {}", folder.display()))?
        .map(|entry| -> Result<PathBuf> { Ok(entry?.path()) })
        .collect::<Result<Vec<PathBuf>>>()?;
    files.retain(|f| f.is_file() && FileType::from_path(f) == FileType::VCFGZ);
    files.sort();

    let mut routed = vec![];

    for src in files {
        let Some(file_name) = src.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let sample = sample_id_from_file_name(file_name);

        let Some(phenotype) = phenotypes.get(sample) else {
            tracing::debug!("Sample {sample} has no phenotype. Leaving {file_name} in place.");
            continue;
        };

        let dest = folder.join(phenotype.dir_name()).join(file_name);
        std::fs::rename(&src, &dest)
            .wrap_err_with(|| eyre!("Failed to move {} to {}", src.display(), dest.display()))?;

        routed.push(RoutedFile {
            file: file_name.to_string(),
            sample: sample.to_string(),
            phenotype,
        });
    }

    tracing::info!(
        "Moved {} files into {} and {}",
        routed.len(),
        Phenotype::Control.dir_name(),
        Phenotype::Case.dir_name()
    );

    Ok(routed)
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;

    #[test]
    fn test_phenotype_status() {
        assert_eq!(Phenotype::from_status("0"), Some(Phenotype::Control));
        assert_eq!(Phenotype::from_status("1"), Some(Phenotype::Case));
        assert_eq!(Phenotype::from_status("2"), None);
        assert_eq!(Phenotype::Control.dir_name(), "controls_0");
        assert_eq!(Phenotype::Case.dir_name(), "cases_1");
    }

    #[test]
    fn test_phenotypes_get() {
        let phenotypes = Phenotypes {
            controls: BTreeSet::from(["SAMPLE1".to_string()]),
            cases: BTreeSet::from(["SAMPLE2".to_string()]),
        };
        assert_eq!(phenotypes.get("SAMPLE1"), Some(Phenotype::Control));
        assert_eq!(phenotypes.get("SAMPLE2"), Some(Phenotype::Case));
        assert_eq!(phenotypes.get("SAMPLE3"), None);
        assert_eq!(phenotypes.len(), 2);
        assert!(!phenotypes.is_empty());
    }
}
