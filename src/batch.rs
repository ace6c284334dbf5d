use std::collections::BTreeSet;

use crate::data::model::SampleCollection;
use crate::data::normalize::normalize;
use crate::remote::Transport;
use crate::session::Session;

/// Selection entry that stands for every file in the spectra folder.
pub const ALL: &str = "All";

/// Expand [`ALL`] to the full listing; otherwise keep the selection as is.
pub fn resolve_selection(selection: &[String], listing: &[String]) -> Vec<String> {
    if selection.iter().any(|s| s == ALL) {
        listing.to_vec()
    } else {
        selection.to_vec()
    }
}

/// Fetch and normalize each selected spectrum, in input order.
///
/// Members whose fetch or normalization fails are recorded as session
/// warnings and left out, so the result holds exactly the names that loaded.
/// Fetches go through the session cache: a rebuild after a selection change
/// only requests files not seen before.
pub fn load_batch<T: Transport, S: AsRef<str>>(
    session: &mut Session<T>,
    file_names: &[S],
) -> SampleCollection {
    let range = session.norm_range();
    let mut seen = BTreeSet::new();
    let mut samples = SampleCollection::new();

    for name in file_names.iter().map(|n| n.as_ref()) {
        if !seen.insert(name) {
            continue;
        }
        let path = session.spectrum_path(name);
        let raw = match session.fetch_spectrum(&path) {
            Ok(raw) => raw,
            Err(e) => {
                session.warn(format!("load {name}"), &e);
                continue;
            }
        };
        match normalize(&raw, range) {
            Ok(table) => {
                samples.insert(name.to_string(), table);
            }
            Err(e) => session.warn(format!("normalize {name}"), &e),
        }
    }

    log::info!("Loaded and normalized {}/{} spectra", samples.len(), seen.len());
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{MemoryTransport, Method};
    use crate::session::tests::{config, BASE};

    fn transport() -> MemoryTransport {
        MemoryTransport::new()
            .with_response(Method::Get, &format!("{BASE}/processed/a.dpt"), 200, "100,0.5\n200,0.7\n300,0.2\n")
            .with_response(Method::Get, &format!("{BASE}/processed/b.dpt"), 500, "")
            .with_response(Method::Get, &format!("{BASE}/processed/flat.dpt"), 200, "100,1\n200,1\n")
    }

    #[test]
    fn failed_member_is_dropped() {
        let mut session = Session::new(&config(), transport());
        let samples = load_batch(&mut session, &["a.dpt", "b.dpt"]);
        assert_eq!(samples.keys().collect::<Vec<_>>(), vec!["a.dpt"]);
        let norm = samples["a.dpt"].normalized.as_ref().unwrap();
        assert_eq!(norm[1], 1.0);
        assert_eq!(norm[2], 0.0);
        assert_eq!(session.warnings().len(), 1);
        assert_eq!(session.warnings()[0].context, "load b.dpt");
    }

    #[test]
    fn degenerate_member_is_dropped_with_warning() {
        let mut session = Session::new(&config(), transport());
        let samples = load_batch(&mut session, &["flat.dpt", "a.dpt"]);
        assert_eq!(samples.len(), 1);
        assert!(session.warnings()[0].message.contains("degenerate"));
    }

    #[test]
    fn rebuild_reuses_fetched_files() {
        let mut session = Session::new(&config(), transport());
        load_batch(&mut session, &["a.dpt"]);
        load_batch(&mut session, &["a.dpt", "a.dpt"]);
        let url = format!("{BASE}/processed/a.dpt");
        assert_eq!(session.transport().count(Method::Get, &url), 1);
    }

    #[test]
    fn empty_selection() {
        let mut session = Session::new(&config(), transport());
        let none: [&str; 0] = [];
        assert!(load_batch(&mut session, &none).is_empty());
        assert!(session.transport().requests().is_empty());
    }

    #[test]
    fn all_expands_to_listing() {
        let listing = vec!["x.dpt".to_string(), "y.dpt".to_string()];
        assert_eq!(resolve_selection(&["All".to_string()], &listing), listing);
        assert_eq!(resolve_selection(&["y.dpt".to_string()], &listing), vec!["y.dpt"]);
    }
}
