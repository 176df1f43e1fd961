// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for hookForge.

use std::process;

use clap::Parser;
use serde_json::json;

use hookforge::generator::cli::{validate_cli, Cli, OutputFormat};
use hookforge::generator::run_with_cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = validate_cli(&cli) {
        report_failure(&cli, &err);
        process::exit(2);
    }
    match run_with_cli(&cli) {
        Ok(report) => {
            if cli.quiet {
                return;
            }
            match cli.format {
                OutputFormat::Json => {
                    let summary = json!({
                        "status": if report.checked { "up-to-date" } else { "ok" },
                        "definitions": report.definitions_path.display().to_string(),
                        "redirectors": report.redirectors_path.display().to_string(),
                        "scalar_routines": report.scalar_routines,
                        "string_routines": report.string_routines,
                    });
                    println!("{summary}");
                }
                OutputFormat::Text => {
                    let verb = if report.checked { "Checked" } else { "Wrote" };
                    println!(
                        "{verb} {} and {} ({} scalar, {} string routines)",
                        report.definitions_path.display(),
                        report.redirectors_path.display(),
                        report.scalar_routines,
                        report.string_routines,
                    );
                }
            }
        }
        Err(err) => {
            report_failure(&cli, &err);
            process::exit(1);
        }
    }
}

fn report_failure(cli: &Cli, err: &hookforge::core::GenError) {
    match cli.format {
        OutputFormat::Json => {
            eprintln!("{}", json!({ "status": "error", "message": err.message() }));
        }
        OutputFormat::Text => {
            eprintln!("hookforge: {err}");
        }
    }
}
