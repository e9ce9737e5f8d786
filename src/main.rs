use std::process::ExitCode;

fn main() -> ExitCode {
    bowl::cli::run(std::env::args_os())
}
