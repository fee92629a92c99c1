mod terminal;

use std::sync::Arc;

use anyhow::Result;
use snowcast_core::AppError;
use snowcast_ui::{ControllerHandle, Services, UiEvent, WidgetController};
use snowcast_weather::{ConfiguredLocator, Geocoder, WeatherProvider};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::terminal::{parse_command, TerminalView, HELP};

/// Forward typed lines to the controller until `:q` or end of input
async fn read_commands(handle: ControllerHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(line)) => parse_command(&line),
            Ok(None) => UiEvent::Shutdown,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                UiEvent::Shutdown
            }
        };
        let stop = matches!(event, UiEvent::Shutdown);
        if !handle.send(event) || stop {
            break;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    snowcast_core::init()?;

    let mut app = snowcast_core::App::new().map_err(|e| {
        let err = AppError::classify(e);
        eprintln!("{}", err.user_message());
        err
    })?;
    app.initialize()?;
    let config = app.config_handle();

    let services = Services {
        geocoder: Arc::new(Geocoder::from_config(&config)?),
        forecasts: Arc::new(WeatherProvider::from_config(&config.weather)?),
        locator: Arc::new(ConfiguredLocator::from_config(&config.location)),
    };

    println!("{}", HELP);

    let mut controller = WidgetController::new(TerminalView::new(std::io::stdout()), services, &config);
    let handle = controller.handle();
    controller.start();

    let reader = tokio::spawn(read_commands(handle));
    controller.run().await;
    reader.abort();

    app.shutdown()?;
    Ok(())
}
