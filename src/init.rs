use crate::error::InitError;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Configuration of the local diagnostic stream.
///
/// The emitter reports dropped records through `tracing`; this installs a
/// `fmt` subscriber printing those events to stderr for processes that do
/// not already have one.
///
/// **Fields**
/// - `max_level`: most verbose level printed. `DEBUG` also shows every
///   outbound ingest request.
/// - `ansi`: colorize output.
#[derive(Clone, Debug)]
pub struct DiagnosticsConfig {
    pub max_level: Level,
    pub ansi: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            max_level: Level::WARN,
            ansi: true,
        }
    }
}

/// Install a global `tracing` subscriber writing to stderr.
///
/// **Returns**
/// - `Err(InitError::AlreadyInstalled)` if the process already has a
///   global subscriber; the existing one keeps receiving the events.
pub fn init_diagnostics_with_config(config: DiagnosticsConfig) -> Result<(), InitError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi);

    let subscriber = Registry::default()
        .with(LevelFilter::from_level(config.max_level))
        .with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Equivalent to [`init_diagnostics_with_config`] with
/// [`DiagnosticsConfig::default`].
pub fn init_diagnostics() -> Result<(), InitError> {
    init_diagnostics_with_config(DiagnosticsConfig::default())
}
