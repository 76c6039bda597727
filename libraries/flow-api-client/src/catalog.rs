//! Catalog document parser.
//!
//! The service answers every playlist method with the same XML shape:
//!
//! ```text
//! <response list="true">
//!   <count>2</count>
//!   <audio><artist>..</artist><title>..</title><duration>215</duration><url>..</url></audio>
//!   <audio>...</audio>
//! </response>
//! ```
//!
//! Every child of the root is a candidate record. A record becomes a
//! [`Track`] only when all four fields are present and non-empty and the
//! duration is a whole number of seconds; anything else is skipped.

use crate::error::{ApiClientError, Result};
use flow_core::Track;
use quick_xml::{events::Event, Reader};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Artist,
    Title,
    Duration,
    Url,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"artist" => Some(Self::Artist),
            b"title" => Some(Self::Title),
            b"duration" => Some(Self::Duration),
            b"url" => Some(Self::Url),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Record {
    artist: Option<String>,
    title: Option<String>,
    duration: Option<String>,
    url: Option<String>,
}

impl Record {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Artist => &mut self.artist,
            Field::Title => &mut self.title,
            Field::Duration => &mut self.duration,
            Field::Url => &mut self.url,
        }
    }

    fn into_track(self) -> Option<Track> {
        let artist = self.artist.filter(|v| !v.is_empty())?;
        let title = self.title.filter(|v| !v.is_empty())?;
        let url = self.url.filter(|v| !v.is_empty())?;
        let secs = self.duration?.parse::<u64>().ok()?;
        Some(Track::new(artist, title, Duration::from_secs(secs), url))
    }
}

/// Field currently collecting text
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

/// Parse a catalog document into tracks, in document order.
///
/// Malformed records are dropped silently. A document that is not
/// well-formed XML fails with [`ApiClientError::Parse`]. A service error
/// document parses to an empty list since none of its children are tracks.
pub fn parse_catalog(document: &str) -> Result<Vec<Track>> {
    let mut reader = Reader::from_reader(document.as_bytes());
    let mut buf = Vec::new();

    let mut tracks = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut record: Option<Record> = None;
    let mut capture: Option<Capture> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ApiClientError::Parse(format!("at byte {}: {}", reader.error_position(), e)))?;

        match event {
            Event::Eof => break,
            Event::Start(e) => {
                depth += 1;
                match depth {
                    1 => seen_root = true,
                    2 => record = Some(Record::default()),
                    _ => {
                        if let (Some(rec), None) = (record.as_mut(), capture.as_ref()) {
                            if let Some(field) = Field::from_tag(e.local_name().as_ref()) {
                                // First occurrence of a field wins
                                if rec.slot(field).is_none() {
                                    capture = Some(Capture {
                                        field,
                                        depth,
                                        text: String::new(),
                                    });
                                }
                            }
                        }
                    }
                }
            }
            Event::Empty(e) => match depth {
                0 => seen_root = true,
                // Self-closing record: no fields, dropped
                1 => {}
                _ => {
                    if let (Some(rec), None) = (record.as_mut(), capture.as_ref()) {
                        if let Some(field) = Field::from_tag(e.local_name().as_ref()) {
                            let slot = rec.slot(field);
                            if slot.is_none() {
                                *slot = Some(String::new());
                            }
                        }
                    }
                }
            },
            Event::Text(e) => {
                if let Some(capture) = capture.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| ApiClientError::Parse(err.to_string()))?;
                    capture.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(_) => {
                if capture.as_ref().is_some_and(|c| c.depth == depth) {
                    if let (Some(done), Some(rec)) = (capture.take(), record.as_mut()) {
                        *rec.slot(done.field) = Some(done.text.trim().to_string());
                    }
                }
                if depth == 2 {
                    if let Some(track) = record.take().and_then(Record::into_track) {
                        tracks.push(track);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(ApiClientError::Parse("document has no root element".into()));
    }
    if depth != 0 {
        return Err(ApiClientError::Parse("document ended inside an element".into()));
    }

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio(artist: &str, title: &str, duration: &str, url: &str) -> String {
        format!(
            "<audio><artist>{}</artist><title>{}</title><duration>{}</duration><url>{}</url></audio>",
            artist, title, duration, url
        )
    }

    fn response(items: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<response list=\"true\">{}</response>",
            items.concat()
        )
    }

    #[test]
    fn parses_complete_records_in_order() {
        let doc = response(&[
            audio("A", "One", "120", "https://cdn/1.mp3"),
            audio("B", "Two", "240", "https://cdn/2.mp3"),
        ]);

        let tracks = parse_catalog(&doc).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].artist, "A");
        assert_eq!(tracks[0].duration_secs(), 120);
        assert_eq!(tracks[1].source_url, "https://cdn/2.mp3");
    }

    #[test]
    fn drops_records_with_empty_or_missing_fields() {
        let doc = response(&[
            audio("A", "One", "120", "https://cdn/1.mp3"),
            audio("", "No artist", "100", "https://cdn/2.mp3"),
            "<audio><artist>C</artist><title>No url</title><duration>5</duration></audio>".into(),
            audio("D", "Four", "60", "https://cdn/4.mp3"),
            audio("E", "Bad duration", "abc", "https://cdn/5.mp3"),
            audio("F", "Negative", "-3", "https://cdn/6.mp3"),
        ]);

        let tracks = parse_catalog(&doc).unwrap();
        let titles: Vec<_> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Four"]);
    }

    #[test]
    fn skips_count_element_and_self_closing_records() {
        let doc = format!(
            "<response list=\"true\"><count>2</count><audio/>{}</response>",
            audio("A", "One", "1", "u1")
        );
        assert_eq!(parse_catalog(&doc).unwrap().len(), 1);
    }

    #[test]
    fn fields_in_any_order_and_nested() {
        let doc = "<response><audio>\
                   <url>https://cdn/x.mp3</url>\
                   <meta><duration>77</duration></meta>\
                   <title>Title</title><artist>Artist</artist>\
                   <artist>Ignored</artist>\
                   </audio></response>";
        let tracks = parse_catalog(doc).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].artist, "Artist");
        assert_eq!(tracks[0].duration_secs(), 77);
    }

    #[test]
    fn unescapes_entities() {
        let doc = response(&[audio("Simon &amp; Garfunkel", "The Boxer", "308", "u?a=1&amp;b=2")]);
        let tracks = parse_catalog(&doc).unwrap();
        assert_eq!(tracks[0].artist, "Simon & Garfunkel");
        assert_eq!(tracks[0].source_url, "u?a=1&b=2");
    }

    #[test]
    fn error_document_is_empty() {
        let doc = "<error><error_code>5</error_code><error_msg>User authorization failed</error_msg></error>";
        assert!(parse_catalog(doc).unwrap().is_empty());
    }

    #[test]
    fn malformed_document_fails() {
        assert!(matches!(
            parse_catalog("<response><audio></response>"),
            Err(ApiClientError::Parse(_))
        ));
        assert!(matches!(
            parse_catalog("<response><audio>"),
            Err(ApiClientError::Parse(_))
        ));
        assert!(matches!(parse_catalog(""), Err(ApiClientError::Parse(_))));
    }
}
