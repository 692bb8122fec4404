use std::process::ExitCode;

fn main() -> ExitCode {
    aifr::cli::run()
}
