use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::{Error, ListingError, Result};

use super::{join_url, Method, Transport};

const DAV: Namespace<'static> = Namespace(b"DAV:");

/// WebDAV `207 Multi-Status`.
pub const MULTI_STATUS: u16 = 207;

/// List the names directly under `folder_path` (one PROPFIND, no retry).
pub fn list_entries<T: Transport + ?Sized>(
    transport: &T,
    base_url: &str,
    folder_path: &str,
) -> Result<Vec<String>> {
    let url = join_url(base_url, &format!("{}/", folder_path.trim_end_matches('/')));
    let response = transport.send(Method::Propfind, &url)?;

    let fail = |reason: ListingError| Error::Listing {
        path: folder_path.to_string(),
        reason,
    };
    if response.status != MULTI_STATUS {
        return Err(fail(ListingError::Status(response.status)));
    }
    let xml = String::from_utf8(response.body).map_err(|e| fail(ListingError::Xml(e.to_string())))?;
    parse_multistatus(&xml, folder_path).map_err(fail)
}

/// Extract entry names from a multistatus document, in document order.
///
/// Folder hrefs (trailing `/`) contribute their last segment unless it is the
/// listed folder itself; file hrefs contribute their last segment. An empty
/// document yields no entries.
pub fn parse_multistatus(xml: &str, folder_path: &str) -> Result<Vec<String>, ListingError> {
    if xml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let own_name = folder_path.trim_matches('/').rsplit('/').next().unwrap_or("");

    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    // Depth of the open <d:response>, and the href text collected inside it.
    let mut response_depth: Option<usize> = None;
    let mut href: Option<String> = None;
    let mut in_href = false;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| ListingError::Xml(e.to_string()))?;
        match event {
            Event::Start(e) => {
                depth += 1;
                saw_root = true;
                let local = e.local_name();
                if is_dav(&ns) && local.as_ref() == b"response" && response_depth.is_none() {
                    response_depth = Some(depth);
                    href = None;
                } else if is_dav(&ns)
                    && local.as_ref() == b"href"
                    && response_depth.is_some()
                    && href.is_none()
                {
                    in_href = true;
                    href = Some(String::new());
                }
            }
            Event::Empty(_) => saw_root = true,
            Event::Text(t) if in_href => {
                let text = t.unescape().map_err(|e| ListingError::Xml(e.to_string()))?;
                if let Some(h) = href.as_mut() {
                    h.push_str(&text);
                }
            }
            Event::CData(c) if in_href => {
                if let Some(h) = href.as_mut() {
                    h.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                if in_href {
                    in_href = false;
                } else if response_depth == Some(depth) {
                    response_depth = None;
                    if let Some(name) = href.take().and_then(|h| entry_name(h.trim(), own_name)) {
                        entries.push(name);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(ListingError::Xml("no root element".into()));
    }
    if depth != 0 {
        return Err(ListingError::Xml("unexpected end of document".into()));
    }
    Ok(entries)
}

fn is_dav(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(n) if *n == DAV)
}

/// Name contributed by one href, or `None` for the folder's self-entry.
fn entry_name(href: &str, own_name: &str) -> Option<String> {
    let name = if href.ends_with('/') {
        let folder = href.split('/').rev().nth(1)?;
        if folder == own_name {
            return None;
        }
        folder
    } else {
        href.rsplit('/').next()?
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
