pub mod settings;

pub use settings::{Settings, WindowPosition};

use anyhow::Result;

/// Initialize logging for the widget process.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Hoodie widget core initialized");
    Ok(())
}
