use std::process::ExitCode;

fn main() -> ExitCode {
    match app_data_cleaner::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
