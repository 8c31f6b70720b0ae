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

use crate::read_vcf::read_sample_names;

pub fn get_sample_names(files: &[PathBuf]) -> Result<Vec<String>> {
    let mut ids = vec![];
    for path in files {
        ids.extend(read_sample_names(path)?);
    }
    Ok(ids)
}

#[doc(hidden)]
pub fn run(files: Vec<PathBuf>) -> Result<()> {
    let ids = get_sample_names(&files)?;
    for id in ids {
        println!("{id}");
    }
    Ok(())
}
