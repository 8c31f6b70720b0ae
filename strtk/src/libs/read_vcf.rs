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

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use itertools::Itertools;

use crate::{
    error::Error,
    io::get_input,
    structs::{AlleleMap, StrRecord, VcfTable, SENTINEL},
    utils::{parse_u64_field, str_allele_end},
};

/// CHROM, POS, ID, REF, ALT, QUAL, FILTER and INFO
pub const MIN_FIELDS: usize = 8;

/// Sample columns start after FORMAT
pub const FIRST_SAMPLE_COLUMN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    /// Only `##` meta lines seen so far
    AwaitingHeader,
    /// The `#CHROM` line has been read
    ParsingRecords { samples: Vec<String> },
}

/// Line driven reader of STR VCFs.
///
/// Malformed and incomplete records are logged and dropped, unparseable
/// numbers abort the file.
#[derive(Debug)]
pub struct VcfRecordParser {
    path: PathBuf,
    state: ParserState,
    records: Vec<StrRecord>,
    skipped: usize,
}

/// INFO keys needed for STR rows
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StrInfo<'a> {
    pub rep_unit: Option<&'a str>,
    pub ref_repeats: Option<&'a str>,
    pub var_id: Option<&'a str>,
}

impl VcfRecordParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: ParserState::AwaitingHeader,
            records: vec![],
            skipped: 0,
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn samples(&self) -> Option<&[String]> {
        match &self.state {
            ParserState::AwaitingHeader => None,
            ParserState::ParsingRecords { samples } => Some(samples),
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Feed one line, `line_no` is 1-based. Only fatal errors are returned.
    pub fn parse_line(&mut self, line_no: usize, line: &str) -> Result<(), Error> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() || line.starts_with("##") {
            return Ok(());
        }

        let nsamples = self.samples().map(<[String]>::len);

        match nsamples {
            None if line.starts_with('#') => {
                let samples: Vec<String> = line
                    .split('\t')
                    .skip(FIRST_SAMPLE_COLUMN)
                    .map(|s| s.trim().to_string())
                    .collect();

                let duplicates = duplicate_samples(&samples);
                if !duplicates.is_empty() {
                    tracing::warn!(
                        "Sample IDs {} are repeated in the header at {}:{line_no}. Their calls share one merged column.",
                        duplicates.join(", "),
                        self.path.display()
                    );
                }

                self.state = ParserState::ParsingRecords { samples };
            }
            None => self.skip(Error::MalformedRecord {
                path: self.path.clone(),
                line: line_no,
                reason: String::from("data line before the #CHROM header"),
            }),
            Some(_) if line.starts_with('#') => {
                tracing::trace!("Ignoring a repeated header line at {}:{line_no}", self.path.display());
            }
            Some(nsamples) => match parse_record(&self.path, line_no, line, nsamples) {
                Ok(record) => {
                    tracing::trace!("STR record {} at {}:{}", record.var_id, self.path.display(), record.line);
                    self.records.push(record);
                }
                Err(e) if e.is_record_local() => self.skip(e),
                Err(e) => return Err(e),
            },
        }

        Ok(())
    }

    fn skip(&mut self, err: Error) {
        match err {
            Error::MissingRequiredKey { .. } => tracing::debug!("{err}. Skipping the record."),
            _ => tracing::warn!("{err}. Skipping the record."),
        }
        self.skipped += 1;
    }

    pub fn finish(self) -> VcfTable {
        let samples = match self.state {
            ParserState::AwaitingHeader => {
                tracing::warn!("No #CHROM header line found in {}", self.path.display());
                vec![]
            }
            ParserState::ParsingRecords { samples } => samples,
        };

        tracing::debug!(
            "Read {} STR records and skipped {} from {}",
            self.records.len(),
            self.skipped,
            self.path.display()
        );

        VcfTable {
            path: self.path,
            samples,
            records: self.records,
        }
    }
}

/// Parse a single data line. `nsamples` is the number of header samples.
pub fn parse_record(
    path: &Path,
    line_no: usize,
    line: &str,
    nsamples: usize,
) -> Result<StrRecord, Error> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

    if fields.len() < MIN_FIELDS {
        return Err(Error::MalformedRecord {
            path: path.to_path_buf(),
            line: line_no,
            reason: format!(
                "expected at least {MIN_FIELDS} tab separated fields, found {}",
                fields.len()
            ),
        });
    }

    let pos = parse_u64_field(fields[1], "POS", path, line_no)?;

    let info = parse_info(fields[7]).map_err(|reason| Error::MalformedRecord {
        path: path.to_path_buf(),
        line: line_no,
        reason,
    })?;

    let ref_repeats = match info.ref_repeats {
        Some(value) => parse_u64_field(value, "INFO/REF", path, line_no)?,
        None => 1,
    };

    let alleles = parse_str_alleles(fields[4]).map_err(|value| Error::InvalidNumericField {
        path: path.to_path_buf(),
        line: line_no,
        field: "ALT repeat count",
        value,
    })?;

    let missing = |key| Error::MissingRequiredKey {
        path: path.to_path_buf(),
        line: line_no,
        key,
    };

    let rep_unit = match info.rep_unit {
        Some(ru) if !ru.is_empty() => ru,
        _ => return Err(missing("RU")),
    };

    if alleles.is_empty() {
        return Err(missing("STR ALT allele"));
    }

    for &repeats in alleles.values() {
        if str_allele_end(pos, rep_unit, repeats).is_none() {
            return Err(Error::InvalidNumericField {
                path: path.to_path_buf(),
                line: line_no,
                field: "END",
                value: format!("{pos} + {} * {repeats}", rep_unit.len()),
            });
        }
    }

    let mut genotypes: Vec<String> = fields
        .iter()
        .skip(FIRST_SAMPLE_COLUMN)
        .take(nsamples)
        .map(|sample| sample.split(':').next().unwrap_or_default().trim().to_string())
        .collect();
    genotypes.resize(nsamples, SENTINEL.to_string());

    Ok(StrRecord {
        line: line_no,
        chrom: fields[0].to_string(),
        pos,
        reference: fields[3].to_string(),
        rep_unit: rep_unit.to_string(),
        ref_repeats,
        var_id: info.var_id.unwrap_or(SENTINEL).to_string(),
        alleles,
        genotypes,
    })
}

/// Sample IDs listed more than once, in header order
pub fn duplicate_samples(samples: &[String]) -> Vec<&str> {
    samples.iter().map(String::as_str).duplicates().collect()
}

/// Split INFO into the STR keys. Returns the reason on entries without `=`.
pub fn parse_info(info: &str) -> Result<StrInfo<'_>, String> {
    let mut parsed = StrInfo::default();

    for entry in info.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| format!("INFO entry {entry:?} is not a key=value pair"))?;

        match key.trim() {
            "RU" => parsed.rep_unit = Some(value.trim()),
            "REF" => parsed.ref_repeats = Some(value.trim()),
            "VARID" => parsed.var_id = Some(value.trim()),
            _ => (),
        }
    }

    Ok(parsed)
}

/// Map the `<STRn>` ALT alleles to their repeat counts. Other symbolic or
/// sequence alleles are not counted. Returns the offending allele if a
/// repeat count is not an integer.
pub fn parse_str_alleles(alt: &str) -> Result<AlleleMap, String> {
    alt.split(',')
        .map(str::trim)
        .filter_map(|allele| allele.strip_prefix("<STR").map(|count| (allele, count)))
        .enumerate()
        .map(|(i, (allele, count))| {
            count
                .trim_end_matches('>')
                .parse::<u64>()
                .map(|count| (i + 1, count))
                .map_err(|_| allele.to_string())
        })
        .collect()
}

/// Read every STR record of a VCF. The file is closed before returning.
pub fn read_str_vcf(path: &Path) -> Result<VcfTable> {
    let input = get_input(Some(path.to_path_buf()))?;
    let mut parser = VcfRecordParser::new(path);

    for (i, line) in BufReader::new(input).lines().enumerate() {
        let line = line.wrap_err_with(|| eyre!("Failed to read {}", path.display()))?;
        parser.parse_line(i + 1, &line)?;
    }

    Ok(parser.finish())
}

/// Read the header samples, stopping at the `#CHROM` line
pub fn read_sample_names(path: &Path) -> Result<Vec<String>> {
    let input = get_input(Some(path.to_path_buf()))?;
    let mut parser = VcfRecordParser::new(path);

    for (i, line) in BufReader::new(input).lines().enumerate() {
        let line = line.wrap_err_with(|| eyre!("Failed to read {}", path.display()))?;
        if line.starts_with('#') {
            parser.parse_line(i + 1, &line)?;
        }
        if let Some(samples) = parser.samples() {
            return Ok(samples.to_vec());
        }
    }

    Err(eyre!("No #CHROM header line found in {}", path.display()))
}
