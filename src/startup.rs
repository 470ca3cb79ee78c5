use crate::config::Config;
use crate::date::{set_global_locale_config, LocaleConfig};
use crate::error::Error;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Validate the config and install it as the process-wide default.
///
/// The returned value is meant to be passed explicitly from here on.
pub fn install_locale_config(config: &Config) -> miette::Result<LocaleConfig> {
    let locale_config = config.to_locale_config()?;
    set_global_locale_config(locale_config.clone());
    info!("Using locale {}", locale_config);
    Ok(locale_config)
}
