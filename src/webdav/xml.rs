// davsync/src/webdav/xml.rs
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;
use std::str;

use crate::errors::{Result, SyncError};

/// Extracts the raw (still percent-encoded) href of every `response` entry
/// in a WebDAV multistatus document. Namespace prefixes vary between
/// servers, so elements are matched by local name only.
///
/// A body with no `multistatus` element at all is rejected; listing
/// endpoints that return an HTML error page must surface as a parse
/// failure, not as an empty folder.
pub fn parse_multistatus_hrefs(xml_text: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml_text);
    reader.config_mut().trim_text(true);

    let mut hrefs = Vec::new();
    let mut saw_multistatus = false;
    let mut in_response = false;
    let mut in_href = false;
    let mut current_href = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match local_name(&e)?.as_str() {
                "multistatus" => saw_multistatus = true,
                "response" => {
                    in_response = true;
                    in_href = false;
                    current_href.clear();
                }
                "href" if in_response => in_href = true,
                _ => {}
            },
            // Self-closing elements carry no text and no matching end tag;
            // they must not leave the href flag set.
            Ok(Event::Empty(e)) => {
                if local_name(&e)?.as_str() == "multistatus" {
                    saw_multistatus = true;
                }
            }
            Ok(Event::Text(e)) if in_href => {
                let text = e
                    .unescape()
                    .map_err(|e| SyncError::Parse(format!("XML text decode error: {}", e)))?;
                current_href.push_str(&text);
            }
            Ok(Event::End(e)) => match local_name_from_end(&e)?.as_str() {
                "href" => in_href = false,
                "response" => {
                    if in_response && !current_href.trim().is_empty() {
                        hrefs.push(current_href.trim().to_string());
                    }
                    in_response = false;
                    in_href = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(SyncError::Parse(format!("XML parsing error: {}", e))),
            Ok(_) => {}
        }
    }

    if !saw_multistatus {
        return Err(SyncError::Parse(
            "no multistatus element in listing response".to_string(),
        ));
    }
    Ok(hrefs)
}

fn local_name(e: &BytesStart) -> Result<String> {
    let qname = e.name();
    let local = qname.local_name();
    str::from_utf8(local.as_ref())
        .map(|s| s.to_string())
        .map_err(|e| SyncError::Parse(format!("Invalid UTF-8 in element name: {}", e)))
}

fn local_name_from_end(e: &BytesEnd) -> Result<String> {
    let qname = e.name();
    let local = qname.local_name();
    str::from_utf8(local.as_ref())
        .map(|s| s.to_string())
        .map_err(|e| SyncError::Parse(format!("Invalid UTF-8 in element name: {}", e)))
}
