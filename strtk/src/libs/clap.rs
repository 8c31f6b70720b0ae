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

use clap::{Args, Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::time::OffsetTime;

use crate::args::MergeArgs;
use crate::subcommands::{group_samples, list_samples, merge_vcfs};

#[derive(Parser, Debug)]
#[command(author, version, about, styles=get_styles())]
pub struct Arguments {
    #[command(subcommand)]
    cmd: SubCommand,
}

#[derive(Args, Debug, Clone)]
pub struct LogAndVerbosity {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, default_value_t = 3)]
    pub verbosity: u8,

    /// A file path to save logs to
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Silence all warning and info messages
    #[arg(long)]
    pub silent: bool,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Merge STR VCFs into a single table with one row per STR allele
    Merge {
        #[command(flatten)]
        args: MergeArgs,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,

        /// Number of threads
        #[arg(short = 't', long, default_value_t = 8)]
        threads: usize,
    },

    /// Split VCFs into controls and cases by phenotype
    Group {
        /// Phenotype file with a sample ID and 0 (control) or 1 (case) per line
        phenotypes: PathBuf,

        /// Folder of per-sample .vcf.gz files named by sample ID
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        folder: PathBuf,

        /// Merge both groups after moving the files
        #[arg(long)]
        merge: bool,

        /// Output directory
        #[arg(short = 'o', long="outdir", default_value_os_t = PathBuf::from("./output"), value_hint = clap::ValueHint::DirPath)]
        outdir: PathBuf,

        /// Output filename prefix
        #[arg(short = 'p', long)]
        prefix: Option<String>,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,

        /// Number of threads
        #[arg(short = 't', long, default_value_t = 8)]
        threads: usize,
    },

    /// Output the sample names of VCF files
    Samples {
        #[arg(num_args = 1..)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },
}

impl SubCommand {
    pub fn threads(&self) -> usize {
        match self {
            SubCommand::Merge { threads, .. } | SubCommand::Group { threads, .. } => *threads,
            SubCommand::Samples { .. } => 1,
        }
    }

    #[rustfmt::skip]
    pub fn log_and_verbosity(&self) -> (u8, &Option<PathBuf>, bool) {
        match self {
            SubCommand::Merge { log_and_verbosity, .. }
            | SubCommand::Group { log_and_verbosity, .. }
            | SubCommand::Samples { log_and_verbosity, .. }
            => (log_and_verbosity.verbosity, &log_and_verbosity.log_file, log_and_verbosity.silent),
        }
    }

    #[rustfmt::skip]
    pub fn output(&self) -> Option<PathBuf> {
        match self {
            SubCommand::Merge { args: MergeArgs { outdir, .. }, .. }
            | SubCommand::Group { outdir, .. } => Some(outdir.clone()),
            SubCommand::Samples { .. } => None,
        }
    }
}

pub fn run_args(args: Arguments) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.cmd.threads())
        .build_global()?;

    let (verbosity, log_file, is_silent) = args.cmd.log_and_verbosity();

    let (level, wrtr, _guard) = init_tracing(verbosity, log_file, is_silent)?;

    let timer = time::format_description::parse("[hour]:[minute]:[second].[subsecond digits:3]")?;
    let time_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(time_offset, timer);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(wrtr)
        .with_timer(timer)
        .init();

    if let Some(output) = args.cmd.output() {
        if std::fs::create_dir_all(&output).is_err() {
            return Err(eyre!("Error creating directory {output:?}"));
        }
    }

    run_cmd(args.cmd)?;

    Ok(())
}

#[rustfmt::skip]
pub fn run_cmd(cmd: SubCommand) -> Result<()> {
    match cmd {
        SubCommand::Merge { args, .. } => merge_vcfs::run(args)?,
        SubCommand::Group { phenotypes, folder, merge, outdir, prefix, .. }
            => group_samples::run(phenotypes, folder, merge, outdir, prefix)?,
        SubCommand::Samples { files, .. } => list_samples::run(files)?,
    };
    Ok(())
}

pub fn init_tracing(
    verbosity: u8,
    log_file: &Option<PathBuf>,
    is_silent: bool,
) -> Result<(Level, NonBlocking, WorkerGuard)> {
    let level = if is_silent {
        Level::ERROR
    } else {
        match verbosity {
            0 => unreachable!(),
            1 => Level::ERROR,
            2 => Level::WARN,
            3 => Level::INFO,
            4 => Level::DEBUG,
            5..=u8::MAX => Level::TRACE,
        }
    };

    // Write logs to stderr or file
    let (wrtr, _guard) = match log_file {
        Some(path) => {
            let file = std::fs::File::options()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    Ok((level, wrtr, _guard))
}

pub fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verbosity() -> LogAndVerbosity {
        LogAndVerbosity {
            verbosity: 0,
            log_file: None,
            silent: false,
        }
    }

    #[test]
    fn test_init_tracing() {
        let (level, _, _) = init_tracing(1, &None, false).unwrap();
        assert_eq!(Level::ERROR, level);
        let (level, _, _) = init_tracing(2, &None, false).unwrap();
        assert_eq!(Level::WARN, level);
        let (level, _, _) = init_tracing(3, &None, false).unwrap();
        assert_eq!(Level::INFO, level);
        let (level, _, _) = init_tracing(4, &None, false).unwrap();
        assert_eq!(Level::DEBUG, level);
        let (level, _, _) = init_tracing(5, &None, false).unwrap();
        assert_eq!(Level::TRACE, level);
        let (level, _, _) = init_tracing(4, &None, true).unwrap();
        assert_eq!(Level::ERROR, level);
    }

    #[test]
    fn test_threads_and_output() {
        let subcommand = SubCommand::Samples {
            files: vec![],
            log_and_verbosity: verbosity(),
        };

        assert_eq!(1, subcommand.threads());
        assert_eq!(None, subcommand.output());

        let subcommand = SubCommand::Merge {
            args: MergeArgs {
                outdir: PathBuf::from("merged"),
                ..Default::default()
            },
            log_and_verbosity: verbosity(),
            threads: 4,
        };

        assert_eq!(4, subcommand.threads());
        assert_eq!(Some(PathBuf::from("merged")), subcommand.output());
    }

    #[test]
    fn test_parse_merge_command() {
        let args = Arguments::try_parse_from([
            "strtk", "merge", "--files", "a.vcf.gz", "b.vcf.gz", "--output", "out.txt", "-t", "2",
        ])
        .unwrap();

        match args.cmd {
            SubCommand::Merge { args, threads, .. } => {
                assert_eq!(args.files, vec![PathBuf::from("a.vcf.gz"), PathBuf::from("b.vcf.gz")]);
                assert_eq!(args.output, "out.txt");
                assert_eq!(args.outdir, PathBuf::from("./output"));
                assert_eq!(threads, 2);
            }
            _ => panic!("expected the merge subcommand"),
        }
    }
}
