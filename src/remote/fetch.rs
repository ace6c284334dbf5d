use crate::data::loader::{parse_master, parse_spectrum};
use crate::data::model::{MasterTable, SpectrumTable};
use crate::error::{Error, FetchError, Result};

use super::{join_url, Method, Transport};

pub const OK: u16 = 200;

/// GET `{base_url}{path}` and decode the body as UTF-8 text.
pub fn fetch_text<T: Transport + ?Sized>(transport: &T, base_url: &str, path: &str) -> Result<String> {
    let response = transport.send(Method::Get, &join_url(base_url, path))?;
    if response.status != OK {
        return Err(fetch_error(path, FetchError::Status(response.status)));
    }
    String::from_utf8(response.body).map_err(|e| fetch_error(path, e.into()))
}

/// Download and parse the master inventory CSV.
pub fn fetch_master<T: Transport + ?Sized>(transport: &T, base_url: &str, path: &str) -> Result<MasterTable> {
    let text = fetch_text(transport, base_url, path)?;
    parse_master(&text).map_err(|e| fetch_error(path, e))
}

/// Download and parse one two-column spectrum file.
pub fn fetch_spectrum<T: Transport + ?Sized>(
    transport: &T,
    base_url: &str,
    path: &str,
) -> Result<SpectrumTable> {
    let text = fetch_text(transport, base_url, path)?;
    parse_spectrum(&text).map_err(|e| fetch_error(path, e))
}

fn fetch_error(path: &str, reason: FetchError) -> Error {
    Error::Fetch {
        path: path.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryTransport;

    const BASE: &str = "https://cloud.example.org/dav";

    #[test]
    fn spectrum_from_body() {
        let t = MemoryTransport::new().with_response(
            Method::Get,
            "https://cloud.example.org/dav/processed/a.dpt",
            200,
            "100,0.5\n200,0.7\n300,0.2\n",
        );
        let sp = fetch_spectrum(&t, BASE, "/processed/a.dpt").unwrap();
        assert_eq!(sp.wavenumber, vec![100.0, 200.0, 300.0]);
        assert_eq!(sp.intensity, vec![0.5, 0.7, 0.2]);
    }

    #[test]
    fn master_from_body() {
        let t = MemoryTransport::new().with_response(
            Method::Get,
            "https://cloud.example.org/dav/master.csv",
            200,
            "Code,BET\nBC01,512\n",
        );
        let m = fetch_master(&t, BASE, "/master.csv").unwrap();
        assert_eq!(m.codes(), vec!["BC01"]);
    }

    #[test]
    fn non_200_is_fetch_error() {
        let t = MemoryTransport::new().with_response(Method::Get, "https://cloud.example.org/dav/x", 204, "");
        match fetch_text(&t, BASE, "/x") {
            Err(Error::Fetch { reason: FetchError::Status(204), .. }) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_fetch_error() {
        let t = MemoryTransport::new().with_bytes(Method::Get, "https://cloud.example.org/dav/x", 200, vec![0xff, 0xfe, 0x00]);
        assert!(matches!(
            fetch_text(&t, BASE, "/x"),
            Err(Error::Fetch { reason: FetchError::Utf8(_), .. })
        ));
    }

    #[test]
    fn parse_failure_names_the_path() {
        let t = MemoryTransport::new().with_response(Method::Get, "https://cloud.example.org/dav/bad.dpt", 200, "a,b\n");
        let err = fetch_spectrum(&t, BASE, "/bad.dpt").unwrap_err();
        assert!(err.to_string().starts_with("fetching /bad.dpt failed"));
    }
}
