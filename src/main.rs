use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match penguin_paradox::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
