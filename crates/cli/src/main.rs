use std::process::ExitCode;

fn main() -> ExitCode {
    shopbot_cli::run()
}
