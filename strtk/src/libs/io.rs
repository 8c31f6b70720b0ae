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

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use csv::{QuoteStyle, Writer, WriterBuilder};
use itertools::Itertools;

use crate::error::Error;
use crate::structs::MergedTable;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    VCF,
    VCFGZ,
    GZ,
    Other,
}

impl FileType {
    pub fn from_path(path: &Path) -> Self {
        let Some(extension) = path.extension().and_then(OsStr::to_str) else {
            return Self::Other;
        };

        match extension {
            "vcf" => Self::VCF,
            "gz" | "bgz" => match return_double_extension_filetype(path, extension) {
                Ok(ext) if ext == "vcf.gz" || ext == "vcf.bgz" => Self::VCFGZ,
                _ => Self::GZ,
            },
            _ => Self::Other,
        }
    }

    /// Accepted when listed explicitly
    pub fn is_input(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Accepted when found in a scanned folder
    pub fn is_compressed(&self) -> bool {
        matches!(self, Self::VCFGZ | Self::GZ)
    }
}

pub fn return_double_extension_filetype(path: &Path, e1: &str) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| eyre!("file has no stem"))?;
    let e2 = Path::new(&stem)
        .extension()
        .and_then(OsStr::to_str)
        .ok_or_else(|| eyre!("file has no other filetype"))?;
    Ok(format!("{e2}.{e1}"))
}

/// Resolve files and folders into the ordered list of VCFs to merge.
///
/// Folders contribute their compressed files in file name order, explicit
/// files keep the order they were given in. A path listed twice is read once.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, Error> {
    let mut files: Vec<PathBuf> = vec![];

    for path in paths {
        if path.is_dir() {
            let mut found = vec![];
            for entry in std::fs::read_dir(path).map_err(|e| Error::Io(path.clone(), e))? {
                let entry = entry.map_err(|e| Error::Io(path.clone(), e))?;
                let file = entry.path();
                if file.is_file() && FileType::from_path(&file).is_compressed() {
                    found.push(file);
                }
            }
            found.sort();

            if found.is_empty() {
                tracing::warn!("No .gz files found in {}", path.display());
            }
            files.extend(found);
        } else if !path.exists() {
            tracing::warn!("Input {} does not exist. Skipping.", path.display());
        } else if FileType::from_path(path).is_input() {
            files.push(path.clone());
        } else {
            tracing::warn!("Input {} is not a VCF file. Skipping.", path.display());
        }
    }

    let files: Vec<PathBuf> = files.into_iter().unique().collect();

    if files.is_empty() {
        return Err(Error::NoInputFiles);
    }

    Ok(files)
}

pub fn read_lines<P>(filename: P) -> Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let name = filename.as_ref().display();
    let file = match File::open(&filename) {
        Ok(x) => x,
        Err(err) => {
            let msg = format!("failed to open {name}: {err}");
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, msg))?;
        }
    };
    Ok(io::BufReader::new(file).lines())
}

pub fn get_table_writer<W: io::Write>(output: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(false)
        .double_quote(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output)
}

pub fn get_tsv_writer<W: io::Write>(output: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(false)
        .from_writer(output)
}

/// Decompression is detected from the stream, plain text passes through
pub fn get_input(filename: Option<PathBuf>) -> Result<Box<dyn io::Read>> {
    let input: Box<dyn io::Read> = match filename {
        Some(name) => match name.to_str() {
            Some("-") => Box::new(io::stdin()),
            Some(name) => {
                let r = match niffler::from_path(name) {
                    Ok(x) => x.0,
                    Err(err) => {
                        let msg = format!("failed to open \"{name}\": {err}");
                        return Err(eyre!(msg))?;
                    }
                };
                Box::new(r)
            }
            None => return Err(eyre!("Unknown I/O error")),
        },
        None => Box::new(io::stdin()),
    };
    Ok(input)
}

pub fn get_output(filename: Option<PathBuf>) -> Result<Box<dyn io::Write>> {
    let output: Box<dyn io::Write> = match filename {
        Some(name) => match name.to_str() {
            Some("-") => Box::new(io::stdout()),
            Some(name) => Box::new(
                match std::fs::File::options()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(name)
                {
                    Ok(x) => io::BufWriter::new(x),
                    Err(err) => return Err(eyre!("failed to open \"{name}\": {err}"))?,
                },
            ),
            None => return Err(eyre!("Unknown I/O error")),
        },
        None => Box::new(io::stdout()),
    };
    Ok(output)
}

pub fn create_outdir(outdir: &Path) -> Result<()> {
    std::fs::create_dir_all(outdir)
        .wrap_err_with(|| eyre!("Error creating directory {}", outdir.display()))
}

pub fn write_merged_table<W: io::Write>(table: &MergedTable, writer: &mut Writer<W>) -> Result<()> {
    writer.write_record(table.header())?;

    for row in &table.rows {
        writer.write_record(Into::<Vec<String>>::into(row))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the merged table to `outdir/name`, creating `outdir` if needed
pub fn save_merged_table(table: &MergedTable, outdir: &Path, name: &str) -> Result<PathBuf> {
    create_outdir(outdir)?;
    let path = outdir.join(name);

    let mut writer = get_table_writer(get_output(Some(path.clone()))?);
    write_merged_table(table, &mut writer)
        .wrap_err_with(|| eyre!("Failed to write {}", path.display()))?;

    Ok(path)
}
