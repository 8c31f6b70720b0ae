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

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct MergeArgs {
    /// VCF files to merge. Folders given here are scanned like --folder.
    #[cfg_attr(feature = "clap", arg(long, num_args = 1.., value_hint = clap::ValueHint::FilePath))]
    pub files: Vec<PathBuf>,

    /// Folders to scan for gzipped VCFs
    #[cfg_attr(feature = "clap", arg(long, num_args = 1.., value_hint = clap::ValueHint::DirPath))]
    pub folder: Vec<PathBuf>,

    /// Output directory
    #[cfg_attr(feature = "clap", arg(short = 'o', long="outdir", default_value_os_t = PathBuf::from("./output"), value_hint = clap::ValueHint::DirPath))]
    pub outdir: PathBuf,

    /// Output file name
    #[cfg_attr(feature = "clap", arg(long, default_value_t = String::from("merged_output.txt")))]
    pub output: String,
}

impl Default for MergeArgs {
    fn default() -> Self {
        Self {
            files: vec![],
            folder: vec![],
            outdir: PathBuf::from("./output"),
            output: String::from("merged_output.txt"),
        }
    }
}

impl MergeArgs {
    /// Explicit files first, then folders
    pub fn inputs(&self) -> Vec<PathBuf> {
        self.files.iter().chain(&self.folder).cloned().collect()
    }
}
