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

use thiserror::Error as ThisError;

#[rustfmt::skip]
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Malformed record at {path}:{line}: {reason}")]
    MalformedRecord { path: PathBuf, line: usize, reason: String },

    #[error("Record at {path}:{line} is missing {key}")]
    MissingRequiredKey { path: PathBuf, line: usize, key: &'static str },

    #[error("Invalid {field} value {value:?} at {path}:{line}, expected an unsigned 64-bit integer")]
    InvalidNumericField { path: PathBuf, line: usize, field: &'static str, value: String },

    #[error("No valid VCF files were found in the given inputs")]
    NoInputFiles,

    #[error("Sample {sample} is listed as both a case and a control in {path}")]
    AmbiguousPhenotype { sample: String, path: PathBuf },

    #[error("Io error: {0} {1}")]
    Io(PathBuf, std::io::Error),

    #[error("Io error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Recoverable errors only drop the offending record.
    pub fn is_record_local(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. } | Self::MissingRequiredKey { .. })
    }
}
