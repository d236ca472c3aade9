//! Binary entrypoint for the `dayflow` CLI.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // .env is optional; real environment variables win either way.
    dotenvy::dotenv().ok();
    env_logger::init();

    match dayflow::run(std::env::args()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
