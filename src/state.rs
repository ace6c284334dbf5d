use std::collections::BTreeSet;

use bcviz::config::DashboardConfig;
use bcviz::data::filter::{available_parameters, code_and_parameter, parameter_series, Selection};
use bcviz::data::model::{MasterTable, SampleCollection};
use bcviz::remote::Transport;
use bcviz::session::Warning;
use bcviz::synthetic::{random_points, SimpleRng};
use bcviz::Session;

use crate::color::ColorMap;

/// Points in the illustrative scatter panel.
const SYNTHETIC_POINTS: usize = 100;

// ---------------------------------------------------------------------------
// Commands emitted by the UI
// ---------------------------------------------------------------------------

/// Everything the user can do. The UI only emits these; [`AppState::apply`]
/// performs them against a [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load the master inventory and the spectra listing (memoized).
    Connect,
    ToggleSample(String),
    SetSamples(Selection),
    SetParameter(String),
    /// Change the spectra selection; the sample collection is rebuilt.
    ToggleSpectrum(String),
    SetSpectra(BTreeSet<String>),
    SetPlotNormalized(bool),
    /// Show the table of one loaded spectrum, or hide it.
    ShowTable(Option<String>),
    DismissWarnings,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub features: DashboardConfig,

    /// Master inventory (None until loaded, or if loading failed).
    pub master: Option<MasterTable>,

    /// Parameters offered in the picker: configured ones present in the master.
    pub parameters: Vec<String>,

    /// Files in the spectra folder.
    pub entries: Vec<String>,

    pub selected_codes: Selection,
    pub parameter: Option<String>,

    pub selected_files: BTreeSet<String>,

    /// Loaded and normalized spectra for `selected_files`.
    pub samples: SampleCollection,

    /// Line colours for `samples`.
    pub color_map: ColorMap,

    /// Plot normalized intensity instead of raw.
    pub plot_normalized: bool,

    pub shown_table: Option<String>,

    /// Failures shown in the top bar until dismissed.
    pub warnings: Vec<Warning>,

    /// `[x, y, z]` random points, present only with `synthetic_panel`.
    pub synthetic: Vec<[f64; 3]>,
}

impl AppState {
    pub fn new(features: DashboardConfig) -> Self {
        let synthetic = if features.synthetic_panel {
            random_points(SYNTHETIC_POINTS, &mut SimpleRng::new(7))
        } else {
            Vec::new()
        };
        Self {
            features,
            master: None,
            parameters: Vec::new(),
            entries: Vec::new(),
            selected_codes: Selection::new(),
            parameter: None,
            selected_files: BTreeSet::new(),
            samples: SampleCollection::new(),
            color_map: ColorMap::default(),
            plot_normalized: true,
            shown_table: None,
            warnings: Vec::new(),
            synthetic,
        }
    }

    pub fn apply<T: Transport>(&mut self, command: Command, session: &mut Session<T>) {
        log::debug!("apply {command:?}");
        match command {
            Command::Connect => {
                self.master = session.master();
                self.parameters = match &self.master {
                    Some(m) => available_parameters(m, &self.features.parameters),
                    None => Vec::new(),
                };
                self.entries = session.spectra_entries();
            }
            Command::ToggleSample(code) => {
                if !self.selected_codes.remove(&code) {
                    self.selected_codes.insert(code);
                }
            }
            Command::SetSamples(codes) => self.selected_codes = codes,
            Command::SetParameter(p) => self.parameter = Some(p),
            Command::ToggleSpectrum(name) => {
                if !self.selected_files.remove(&name) {
                    self.selected_files.insert(name);
                }
                self.reload(session);
            }
            Command::SetSpectra(names) => {
                self.selected_files = names;
                self.reload(session);
            }
            Command::SetPlotNormalized(on) => self.plot_normalized = on,
            Command::ShowTable(name) => self.shown_table = name,
            Command::DismissWarnings => self.warnings.clear(),
        }
        self.warnings.extend(session.take_warnings());
    }

    /// Rebuild the sample collection from scratch for the current selection.
    fn reload<T: Transport>(&mut self, session: &mut Session<T>) {
        // Listing order, so repeated loads issue requests in a stable order.
        let names: Vec<&String> = self
            .entries
            .iter()
            .filter(|e| self.selected_files.contains(*e))
            .chain(self.selected_files.iter().filter(|f| !self.entries.contains(*f)))
            .collect();
        self.samples = bcviz::batch::load_batch(session, &names);
        self.color_map = ColorMap::new(self.samples.keys());
        if let Some(shown) = &self.shown_table {
            if !self.samples.contains_key(shown) {
                self.shown_table = None;
            }
        }
    }

    /// Both a sample and a parameter are chosen.
    pub fn selection_ready(&self) -> bool {
        !self.selected_codes.is_empty() && self.parameter.is_some()
    }

    /// `Code` + parameter rows of the selected samples.
    pub fn parameter_table(&self) -> Option<MasterTable> {
        let master = self.master.as_ref()?;
        code_and_parameter(master, &self.selected_codes, self.parameter.as_deref()?)
    }

    /// Bar chart data for the selected samples.
    pub fn parameter_bars(&self) -> Vec<(String, Option<f64>)> {
        match (&self.master, &self.parameter) {
            (Some(m), Some(p)) => parameter_series(m, &self.selected_codes, p),
            _ => Vec::new(),
        }
    }

    pub fn codes(&self) -> Vec<String> {
        self.master.as_ref().map(|m| m.codes()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcviz::config::Config;
    use bcviz::remote::{MemoryTransport, Method};

    const BASE: &str = "https://cloud.example.org/dav";

    fn session() -> Session<MemoryTransport> {
        let listing = r#"<d:multistatus xmlns:d="DAV:">
            <d:response><d:href>/dav/processed/</d:href></d:response>
            <d:response><d:href>/dav/processed/BC01.dpt</d:href></d:response>
            <d:response><d:href>/dav/processed/BC02.dpt</d:href></d:response>
        </d:multistatus>"#;
        let transport = MemoryTransport::new()
            .with_response(Method::Get, &format!("{BASE}/master.csv"), 200, "Code,BET,pH\nBC01,512.4,9.1\nBC02,301,8.3\n")
            .with_response(Method::Propfind, &format!("{BASE}/processed/"), 207, listing)
            .with_response(Method::Get, &format!("{BASE}/processed/BC01.dpt"), 200, "4000,0.1\n400,0.3\n")
            .with_response(Method::Get, &format!("{BASE}/processed/BC02.dpt"), 403, "");
        let mut config = Config::default();
        config.nextcloud.url = BASE.to_string();
        Session::new(&config, transport)
    }

    fn connected() -> (AppState, Session<MemoryTransport>) {
        let mut session = session();
        let mut state = AppState::new(DashboardConfig::default());
        state.apply(Command::Connect, &mut session);
        (state, session)
    }

    #[test]
    fn connect_loads_master_and_listing() {
        let (state, _) = connected();
        assert_eq!(state.codes(), vec!["BC01", "BC02"]);
        assert_eq!(state.parameters, vec!["BET", "pH"]);
        assert_eq!(state.entries, vec!["BC01.dpt", "BC02.dpt"]);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn parameter_view_needs_samples_and_parameter() {
        let (mut state, mut session) = connected();
        state.apply(Command::ToggleSample("BC02".into()), &mut session);
        assert!(!state.selection_ready());
        state.apply(Command::SetParameter("BET".into()), &mut session);
        assert!(state.selection_ready());
        assert_eq!(state.parameter_bars(), vec![("BC02".to_string(), Some(301.0))]);
        assert_eq!(state.parameter_table().unwrap().len(), 1);

        state.apply(Command::ToggleSample("BC02".into()), &mut session);
        assert!(!state.selection_ready());
    }

    #[test]
    fn spectra_selection_rebuilds_collection() {
        let (mut state, mut session) = connected();
        let all: BTreeSet<String> = state.entries.iter().cloned().collect();
        state.apply(Command::SetSpectra(all), &mut session);
        assert_eq!(state.samples.keys().collect::<Vec<_>>(), vec!["BC01.dpt"]);
        assert_eq!(state.warnings.len(), 1);

        state.apply(Command::ShowTable(Some("BC01.dpt".into())), &mut session);
        state.apply(Command::ToggleSpectrum("BC01.dpt".into()), &mut session);
        assert!(state.samples.is_empty());
        assert_eq!(state.shown_table, None);

        state.apply(Command::DismissWarnings, &mut session);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn reselecting_does_not_refetch() {
        let (mut state, mut session) = connected();
        state.apply(Command::ToggleSpectrum("BC01.dpt".into()), &mut session);
        state.apply(Command::ToggleSpectrum("BC01.dpt".into()), &mut session);
        state.apply(Command::ToggleSpectrum("BC01.dpt".into()), &mut session);
        let url = format!("{BASE}/processed/BC01.dpt");
        assert_eq!(session.transport().count(Method::Get, &url), 1);
        assert_eq!(state.samples.len(), 1);
    }

    #[test]
    fn failed_connect_leaves_empty_state_with_warnings() {
        let mut config = Config::default();
        config.nextcloud.url = BASE.to_string();
        let mut session = Session::new(&config, MemoryTransport::new());
        let mut state = AppState::new(DashboardConfig::default());
        state.apply(Command::Connect, &mut session);
        assert!(state.master.is_none());
        assert!(state.entries.is_empty());
        assert_eq!(state.warnings.len(), 2);
    }

    #[test]
    fn synthetic_points_only_when_enabled() {
        assert!(AppState::new(DashboardConfig::default()).synthetic.is_empty());
        let features = DashboardConfig {
            synthetic_panel: true,
            ..DashboardConfig::default()
        };
        assert_eq!(AppState::new(features).synthetic.len(), SYNTHETIC_POINTS);
    }
}
