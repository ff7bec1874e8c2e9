//! particle-upgrade - Command-line tool for converting legacy particle emitter configs

use std::process::ExitCode;

use particle_upgrade::cli;

fn main() -> ExitCode {
    cli::run()
}
