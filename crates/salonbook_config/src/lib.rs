// --- File: crates/salonbook_config/src/lib.rs ---

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;

pub mod models;
pub use models::*;

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is loaded at most once per process. `DOTENV_OVERRIDE` names an
/// alternative file; otherwise ".env" in the working directory is used.
pub fn ensure_dotenv_loaded() {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());
    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });
}

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. `config/default.*` (any format the config crate understands)
/// 2. `config/{RUN_ENV}.*`, with `RUN_ENV` defaulting to "debug"
/// 3. Environment variables prefixed `SALONBOOK`, `__` as the separator
///    (e.g. `SALONBOOK_SERVER__PORT=8086`)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    debug!("loading configuration for RUN_ENV={}", run_env);

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("SALONBOOK").separator("__"));

    builder.build()?.try_deserialize()
}
