//! Sitemap document parsing
//!
//! Handles both sitemap flavors defined by sitemaps.org:
//! - `<sitemapindex>` listing child sitemaps under `sitemap/loc`
//! - `<urlset>` listing pages under `url/loc`
//!
//! Element names are compared by local name, so any namespace prefix is
//! ignored.

use crate::sitemap::SitemapError;
use flate2::read::GzDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// Child sitemap locations, in document order
    Index(Vec<String>),
    /// Page locations, in document order
    UrlSet(Vec<String>),
    /// Well-formed XML with some other root element
    Other,
}

impl SitemapDocument {
    fn for_root(local_name: &[u8]) -> Self {
        match local_name {
            b"sitemapindex" => SitemapDocument::Index(Vec::new()),
            b"urlset" => SitemapDocument::UrlSet(Vec::new()),
            _ => SitemapDocument::Other,
        }
    }

    /// The element a `<loc>` must sit in to be collected
    fn entry_element(&self) -> Option<&'static [u8]> {
        match self {
            SitemapDocument::Index(_) => Some(b"sitemap"),
            SitemapDocument::UrlSet(_) => Some(b"url"),
            SitemapDocument::Other => None,
        }
    }

    fn push(&mut self, loc: String) {
        match self {
            SitemapDocument::Index(locs) | SitemapDocument::UrlSet(locs) => locs.push(loc),
            SitemapDocument::Other => {}
        }
    }
}

/// Decompresses a gzip-encoded sitemap body
pub fn decompress_gzip(bytes: &[u8]) -> Result<Vec<u8>, SitemapError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(SitemapError::Gzip)?;
    Ok(out)
}

/// Parses sitemap XML into its locations
///
/// `<loc>` text is trimmed; entity references and CDATA sections are
/// decoded. Empty locations are skipped.
///
/// # Errors
///
/// Malformed XML, including a document that ends with open elements or has
/// no root element at all.
///
/// # Examples
///
/// ```
/// use rival_watch::sitemap::{parse_sitemap_document, SitemapDocument};
///
/// let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://a.example/one</loc></url>
/// </urlset>"#;
/// assert_eq!(
///     parse_sitemap_document(xml).unwrap(),
///     SitemapDocument::UrlSet(vec!["https://a.example/one".to_string()])
/// );
/// ```
pub fn parse_sitemap_document(bytes: &[u8]) -> Result<SitemapDocument, SitemapError> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut document: Option<SitemapDocument> = None;
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut current_loc: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match &document {
                    None => document = Some(SitemapDocument::for_root(&name)),
                    Some(doc) => {
                        let in_entry = doc
                            .entry_element()
                            .is_some_and(|entry| open.last().is_some_and(|p| p == entry));
                        if name == b"loc" && in_entry {
                            current_loc = Some(String::new());
                        }
                    }
                }
                open.push(name);
            }
            Event::Empty(e) => {
                if document.is_none() {
                    document = Some(SitemapDocument::for_root(e.local_name().as_ref()));
                }
            }
            Event::End(_) => {
                let closed = open.pop();
                if closed.as_deref() == Some(b"loc".as_slice()) {
                    if let (Some(loc), Some(doc)) = (current_loc.take(), document.as_mut()) {
                        let loc = loc.trim();
                        if !loc.is_empty() {
                            doc.push(loc.to_string());
                        }
                    }
                }
            }
            Event::Text(t) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !open.is_empty() {
        return Err(SitemapError::Truncated);
    }

    document.ok_or(SitemapError::NoRootElement)
}
