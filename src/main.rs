use std::process::ExitCode;

fn main() -> ExitCode {
    match btc_forecast_dash::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
