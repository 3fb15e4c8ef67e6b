// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use zbundler::{default_common_path, Bundler, COMMON_FILENAME, COMMON_GUARD};

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// Path to the raw library file (e.g. src/zvec_impl.h).
    pub source: PathBuf,
    /// Path to the destination file (e.g. dist/zvec.h).
    pub output: PathBuf,
    /// Path to zcommon.h, next to this executable by default.
    #[clap(long)]
    pub common: Option<PathBuf>,
    /// Name of the shared header in #include "..." lines.
    #[clap(long = "header", default_value = COMMON_FILENAME)]
    pub header_name: String,
    /// Include guard macro for the bundled shared header.
    #[clap(long = "guard", default_value = COMMON_GUARD)]
    pub guard_name: String,
    /// Log debug details.
    #[clap(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only log warnings and errors.
    #[clap(short, long)]
    pub quiet: bool,
}

fn init_logger(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let common = cli.common.clone().unwrap_or_else(default_common_path);
    let mut bundler = Bundler::new(&cli.source, &cli.output);
    bundler.common(&common);
    bundler.header_name(&cli.header_name);
    bundler.guard_name(&cli.guard_name);
    bundler
        .run()
        .with_context(|| format!("bundling {}", cli.source.display()))
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(&cli);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
