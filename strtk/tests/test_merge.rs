mod common;

use std::path::PathBuf;

use strtk::{
    args::MergeArgs,
    error::Error,
    io::collect_input_files,
    structs::GenotypeCall,
    subcommands::merge_vcfs::{self, merge_files, merge_to_file},
};

use crate::common::{
    cohort_files, read_table, results_dir, BAD_POS_VCF, COHORT_DIR, SAMPLE_A_VCF, SAMPLE_B_VCF,
};

#[test]
fn end_to_end_two_samples() {
    let outdir = results_dir("end_to_end");
    let files = vec![PathBuf::from(SAMPLE_A_VCF), PathBuf::from(SAMPLE_B_VCF)];

    let path = merge_to_file(&files, &outdir, "merged_output.txt").unwrap();
    assert_eq!(path, outdir.join("merged_output.txt"));

    let output = std::fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(output.trim_end());

    let rows = read_table(&path);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["CHROM", "POS", "REF", "ALT", "END", "REP_UNIT", "VAR_ID", "AC", "sampleA", "sampleB"]);
    assert_eq!(rows[1], vec!["chr1", "1000", "C", "STR7", "1014", "CA", "chr1_1000_CA", "2", "1/1", "."]);
    assert_eq!(rows[2], vec!["chr1", "1000", "C", "STR9", "1018", "CA", "chr1_1000_CA", "1", ".", "0/1"]);
}

#[test]
fn input_order_does_not_change_columns() {
    let forward = merge_files(&[PathBuf::from(SAMPLE_A_VCF), PathBuf::from(SAMPLE_B_VCF)]).unwrap();
    let reverse = merge_files(&[PathBuf::from(SAMPLE_B_VCF), PathBuf::from(SAMPLE_A_VCF)]).unwrap();

    assert_eq!(forward.samples, vec!["sampleA", "sampleB"]);
    assert_eq!(forward.samples, reverse.samples);
    assert_eq!(forward.rows.len(), reverse.rows.len());
    for (f, r) in forward.rows.iter().zip(&reverse.rows) {
        assert_eq!(f.key, r.key);
        assert_eq!(f.calls, r.calls);
        assert_eq!(f.ac, r.ac);
    }
}

#[test]
fn cohort_genome_order_and_counts() {
    let merged = merge_files(&cohort_files()).unwrap();
    assert_eq!(merged.samples, vec!["SAMPLE1", "SAMPLE2", "SAMPLE3"]);

    let order: Vec<(&str, u64, &str, u32)> = merged
        .rows
        .iter()
        .map(|r| (r.key.chrom.as_str(), r.key.pos, r.key.alt.as_str(), r.ac))
        .collect();

    assert_eq!(order, vec![
        ("chr2", 9, "STR5", 1),
        ("chr2", 10, "STR6", 3),
        ("chr2", 100, "STR12", 1),
        ("chr2", 100, "STR15", 3),
        ("chr10", 9, "STR4", 1),
        ("chrX", 500, "STR20", 2),
    ]);

    use GenotypeCall::*;
    let calls: Vec<Vec<GenotypeCall>> = merged.rows.iter().map(|r| r.calls.clone()).collect();
    assert_eq!(calls, vec![
        vec![NoCall, Het, NoCall],
        vec![HomAlt, Het, NoCall],
        vec![Het, NoCall, NoCall],
        vec![Het, HomAlt, NoCall],
        vec![Het, NoCall, NoCall],
        vec![HomAlt, NoCall, NoCall],
    ]);

    let ends: Vec<u64> = merged.rows.iter().map(|r| r.key.end).collect();
    assert_eq!(ends, vec![19, 28, 136, 145, 21, 580]);

    for row in &merged.rows {
        assert!(row.ac <= 2 * merged.samples.len() as u32);
        assert_eq!(row.ac == 0, row.calls.iter().all(GenotypeCall::is_no_call));
    }
}

#[test]
fn sample_only_in_one_file_gets_sentinels() {
    let merged = merge_files(&cohort_files()).unwrap();

    // chr2:9 is only in SAMPLE2's file
    let row = merged.find_rows("chr2", 9).next().unwrap();
    assert_eq!(merged.call(row, "SAMPLE1"), Some(GenotypeCall::NoCall));
    assert_eq!(merged.call(row, "SAMPLE3"), Some(GenotypeCall::NoCall));
    assert_eq!(merged.call(row, "SAMPLE2"), Some(GenotypeCall::Het));
}

#[test]
fn folder_input_matches_file_input() {
    let from_folder = collect_input_files(&[PathBuf::from(COHORT_DIR)]).unwrap();
    assert_eq!(from_folder, cohort_files());

    let merged = merge_files(&from_folder).unwrap();
    assert_eq!(merged.rows.len(), 6);
}

#[test]
fn reruns_are_byte_identical() {
    let outdir = results_dir("rerun");
    let first = merge_to_file(&cohort_files(), &outdir, "first.txt").unwrap();
    let second = merge_to_file(&cohort_files(), &outdir, "second.txt").unwrap();

    assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
}

#[test]
fn invalid_position_is_fatal() {
    let result = merge_files(&[PathBuf::from(SAMPLE_A_VCF), PathBuf::from(BAD_POS_VCF)]);
    let report = result.unwrap_err();

    match report.downcast_ref::<Error>() {
        Some(Error::InvalidNumericField { field, line, value, .. }) => {
            assert_eq!(*field, "POS");
            assert_eq!(value, "1O00");
            assert_eq!(*line, 10);
        }
        other => panic!("expected an invalid POS error, got {other:?}"),
    }
}

#[test]
fn no_input_files() {
    let err = collect_input_files(&[PathBuf::from("tests/data/does_not_exist.vcf.gz")]).unwrap_err();
    assert!(matches!(err, Error::NoInputFiles));

    let err = collect_input_files(&[PathBuf::from("tests/data/affected.txt")]).unwrap_err();
    assert!(matches!(err, Error::NoInputFiles));

    let args = MergeArgs {
        files: vec![PathBuf::from("tests/data/does_not_exist.vcf.gz")],
        outdir: results_dir("no_inputs"),
        ..Default::default()
    };
    assert!(merge_vcfs::run(args).is_err());
}

#[test]
#[cfg(feature = "clap")]
fn merge_subcommand() {
    let outdir = results_dir("merge_subcommand");
    let cmd = strtk::clap::SubCommand::Merge {
        args: MergeArgs {
            files: vec![PathBuf::from(SAMPLE_A_VCF)],
            folder: vec![PathBuf::from(COHORT_DIR)],
            outdir: outdir.clone(),
            output: String::from("cohort.txt"),
        },
        log_and_verbosity: crate::common::silent_verbosity(),
        threads: 2,
    };
    strtk::clap::run_cmd(cmd).unwrap();

    let rows = read_table(&outdir.join("cohort.txt"));
    assert_eq!(rows[0][8..], ["SAMPLE1", "SAMPLE2", "SAMPLE3", "sampleA"]);
    assert_eq!(rows.len(), 1 + 8);
    assert_eq!(rows[1][0], "chr1");
    assert!(rows.iter().all(|r| r.len() == 12));
}
