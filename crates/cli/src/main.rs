use std::process::ExitCode;

fn main() -> ExitCode {
    upsalg_cli::init_logging();
    upsalg_cli::run()
}
