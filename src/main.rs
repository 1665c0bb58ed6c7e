use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging
    hoodie_core::init()?;

    let settings_path = hoodie_core::Settings::default_path()?;
    let settings = hoodie_core::Settings::load(&settings_path);

    let runtime = tokio::runtime::Runtime::new()?;
    let provider = hoodie_weather::WeatherProvider::new()?;

    let state = hoodie_app::WidgetState::new(settings, settings_path);
    let (tx, rx) = std::sync::mpsc::channel();
    let _scheduler = hoodie_app::RefreshScheduler::start(
        runtime.handle().clone(),
        provider,
        state.clone(),
        tx,
    );

    tracing::info!("Hoodie widget started");

    // Headless display loop. A GUI event loop would drain this channel from
    // its own thread instead and repaint on each outcome.
    while let Ok(outcome) = rx.recv() {
        state.apply(outcome);
        if let Some(current) = state.current() {
            let demo_tag = if current.observation.is_demo { " (demo)" } else { "" };
            println!(
                "{}{} | {:.1}°C, {}% humidity, {:.1} m/s wind, {} | score {:.2} - {}",
                current.location.display_name,
                demo_tag,
                current.observation.temperature_c,
                current.observation.humidity_pct,
                current.observation.wind_speed_ms,
                current.observation.condition_text,
                current.comfort.score,
                current.comfort.recommendation,
            );
        }
    }

    Ok(())
}
