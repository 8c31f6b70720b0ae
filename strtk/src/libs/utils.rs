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

use std::path::Path;

use crate::error::Error;

pub fn parse_u64_field(
    value: &str,
    field: &'static str,
    path: &Path,
    line: usize,
) -> Result<u64, Error> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::InvalidNumericField {
            path: path.to_path_buf(),
            line,
            field,
            value: value.to_string(),
        })
}

/// END of an STR allele: `pos + len(rep_unit) * repeats`, `None` on overflow
pub fn str_allele_end(pos: u64, rep_unit: &str, repeats: u64) -> Option<u64> {
    (rep_unit.len() as u64)
        .checked_mul(repeats)
        .and_then(|len| pos.checked_add(len))
}

// The sample ID of a per-sample VCF is the file name up to the first dot
pub fn sample_id_from_file_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

//NOTE: This should be parsed by clap automatically, but Option<String> parsing is not supported out of the box as of now
pub fn strip_prefix(prefix: Option<String>) -> Option<String> {
    if let Some(prefix) = prefix {
        match prefix.as_ref() {
            "" => None,
            "\\0" => None,
            v => Some(v.to_string()),
        }
    } else {
        None
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64_field() {
        let path = Path::new("test.vcf");
        assert_eq!(parse_u64_field("1000", "POS", path, 3).unwrap(), 1000);
        assert_eq!(parse_u64_field(" 7 ", "POS", path, 3).unwrap(), 7);

        let err = parse_u64_field("10x", "POS", path, 3).unwrap_err();
        assert_eq!(err.to_string(), "Invalid POS value \"10x\" at test.vcf:3, expected an unsigned 64-bit integer");

        assert!(parse_u64_field("-1", "POS", path, 3).is_err());
        assert!(parse_u64_field("", "POS", path, 3).is_err());
    }

    #[test]
    fn test_str_allele_end() {
        assert_eq!(str_allele_end(1000, "CA", 7), Some(1014));
        assert_eq!(str_allele_end(1000, "CAG", 0), Some(1000));
        assert_eq!(str_allele_end(1000, "CA", u64::MAX), None);
        assert_eq!(str_allele_end(u64::MAX, "A", 1), None);
    }

    #[test]
    fn test_sample_id_from_file_name() {
        assert_eq!(sample_id_from_file_name("SAMPLE1.vcf.gz"), "SAMPLE1");
        assert_eq!(sample_id_from_file_name("SAMPLE1"), "SAMPLE1");
        assert_eq!(sample_id_from_file_name("S_2.str.vcf.gz"), "S_2");
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix(Some(String::from("cases"))), Some(String::from("cases")));
        assert_eq!(strip_prefix(Some(String::new())), None);
        assert_eq!(strip_prefix(Some(String::from("\\0"))), None);
        assert_eq!(strip_prefix(None), None);
    }
}
