//! The only long-lived mutable state in the widget: the current
//! observation/comfort pair plus settings, behind a single accessor.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use hoodie_comfort::ComfortResult;
use hoodie_core::Settings;
use hoodie_weather::{Location, WeatherObservation};

/// Everything the display renders: where, what the sky is doing, and
/// whether a hoodie is a good idea.
#[derive(Debug, Clone)]
pub struct CurrentConditions {
    pub location: Location,
    pub observation: WeatherObservation,
    pub comfort: ComfortResult,
}

/// Outcome of one refresh cycle, posted from the fetch task over the
/// handoff channel.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub location: Location,
    pub observation: WeatherObservation,
}

#[derive(Clone)]
pub struct WidgetState {
    inner: Arc<RwLock<Inner>>,
    settings_path: Arc<PathBuf>,
}

struct Inner {
    settings: Settings,
    current: Option<CurrentConditions>,
}

impl WidgetState {
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                settings,
                current: None,
            })),
            settings_path: Arc::new(settings_path),
        }
    }

    /// Score and store a refresh outcome.
    pub fn apply(&self, outcome: RefreshOutcome) {
        let comfort = hoodie_comfort::score(Some(&outcome.observation));
        let mut inner = self.inner.write();
        inner.current = Some(CurrentConditions {
            location: outcome.location,
            observation: outcome.observation,
            comfort,
        });
    }

    /// The single accessor for everything the display needs.
    pub fn current(&self) -> Option<CurrentConditions> {
        self.inner.read().current.clone()
    }

    pub fn settings(&self) -> Settings {
        self.inner.read().settings.clone()
    }

    /// Mutate settings and persist them. A failed save is logged and
    /// otherwise ignored; the caller's operation proceeds either way.
    pub fn update_settings(&self, apply: impl FnOnce(&mut Settings)) {
        let settings = {
            let mut inner = self.inner.write();
            apply(&mut inner.settings);
            inner.settings.clone()
        };
        if let Err(e) = settings.save(&self.settings_path) {
            tracing::warn!("Failed to save settings: {:#}", e);
        }
    }

    /// Store a user-chosen location (already validated via geocoding), or
    /// `None` to return to IP auto-detection.
    pub fn set_manual_location(&self, location: Option<Location>) {
        self.update_settings(|settings| settings.manual_location = location);
    }
}
