use std::process::ExitCode;

use tracing::{error, info};

use board_contract::core::app::App;
use board_contract::core::config::Config;
use board_contract::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv::dotenv().ok();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    // Initialize logging; stdout is reserved for board output
    tracing_subscriber::fmt()
        .with_max_level(config.logging.level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting board checker");

    let app = App::new(config);

    if let Err(e) = app.run().await {
        error!("Application error: {}", e);
        let code = e.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
        return ExitCode::from(code as u8);
    }

    ExitCode::SUCCESS
}
