use std::process::ExitCode;

fn main() -> ExitCode {
    reciprocal::cli::run()
}
