//! Process-wide sink configuration.
//!
//! [`init`] installs a JSON-encoding `tracing` subscriber with a selectable
//! verbosity threshold. The subscriber is installed exactly once; later
//! `init` calls swap the active level through a reload handle instead of
//! replacing the subscriber, so reconfiguration is atomic with respect to
//! in-flight logging. Call it at startup, before concurrent use begins.

use once_cell::sync::OnceCell;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

/// Output verbosity threshold for the process-wide sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Debug,
    Info,
    Error,
}

impl Verbosity {
    fn filter(self) -> LevelFilter {
        match self {
            Verbosity::Debug => LevelFilter::DEBUG,
            Verbosity::Info => LevelFilter::INFO,
            Verbosity::Error => LevelFilter::ERROR,
        }
    }
}

static HANDLE: OnceCell<reload::Handle<LevelFilter, Registry>> = OnceCell::new();

// Serializes installation so a racing implicit ensure() cannot make an
// explicit init() misread "already installed" as a fatal install failure.
static INSTALL: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// (Re)initializes the process-wide sink at the given verbosity.
///
/// The first call installs the subscriber; records are emitted as JSON with
/// fixed message/level/timestamp fields. Subsequent calls only swap the level
/// threshold. Logging is foundational infrastructure, so failure to install
/// or reconfigure the sink panics.
pub fn init(verbosity: Verbosity) {
    let _guard = INSTALL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(handle) = HANDLE.get() {
        if let Err(err) = handle.reload(verbosity.filter()) {
            panic!("log sink reconfiguration failed: {err}");
        }
        return;
    }
    install(verbosity, true);
}

/// Installs the default Info-level sink if no explicit [`init`] ran yet.
/// Stands in for initialization at process start; a subscriber the embedding
/// application already installed is left in charge.
pub(crate) fn ensure() {
    let _guard = INSTALL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if HANDLE.get().is_none() {
        install(Verbosity::Info, false);
    }
}

fn install(verbosity: Verbosity, explicit: bool) {
    let (filter, handle) = reload::Layer::new(verbosity.filter());
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .with_current_span(false)
                .with_span_list(false),
        )
        .try_init();

    match result {
        Ok(()) => {
            let _ = HANDLE.set(handle);
        }
        Err(err) if explicit => panic!("log sink initialization failed: {err}"),
        Err(_) => {}
    }
}
