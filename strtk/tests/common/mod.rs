#![allow(dead_code)]
use std::path::{Path, PathBuf};

#[cfg(feature = "clap")]
use strtk::clap::LogAndVerbosity;

pub const SAMPLE_A_VCF: &str = "tests/data/sampleA.vcf";
pub const SAMPLE_B_VCF: &str = "tests/data/sampleB.vcf.gz";
pub const COHORT_DIR: &str = "tests/data/cohort";
pub const BAD_POS_VCF: &str = "tests/data/bad_pos.vcf";
pub const PHENOTYPES: &str = "tests/data/affected.txt";
pub const OUTDIR: &str = "tests/results";

pub fn cohort_files() -> Vec<PathBuf> {
    ["SAMPLE1", "SAMPLE2", "SAMPLE3"]
        .iter()
        .map(|s| PathBuf::from(format!("{COHORT_DIR}/{s}.vcf.gz")))
        .collect()
}

/// Fresh output directory per test
pub fn results_dir(name: &str) -> PathBuf {
    let dir = Path::new(OUTDIR).join(name);
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    dir
}

pub fn read_table(path: &Path) -> Vec<Vec<String>> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.split('\t').map(String::from).collect())
        .collect()
}

#[cfg(feature = "clap")]
pub fn silent_verbosity() -> LogAndVerbosity {
    LogAndVerbosity {
        verbosity: 1,
        log_file: None,
        silent: false,
    }
}
