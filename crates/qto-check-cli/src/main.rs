// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QTO-Check entry point

use clap::Parser;
use qto_check_cli::{run, Cli};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging
///
/// `--debug` forces debug output for the qto-check crates; otherwise
/// `RUST_LOG` is honoured, defaulting to warnings. Records emitted through the
/// `log` facade by the library crates are captured too.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("qto_check=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qto_check=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("qto-check starting with args: {:?}", cli);

    let mut stdout = std::io::stdout().lock();
    match run(&cli, &mut stdout) {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}
