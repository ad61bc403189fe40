//! HTML parsing into an index-addressed arena.
//!
//! Pages are parsed once with html5ever and never mutated afterwards; the
//! converter walks the resulting [`ArenaDom`] by [`ArenaNodeId`].

mod arena;
mod tree_sink;

pub use arena::{
    ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter, Descendants,
};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse an HTML document into an [`ArenaDom`].
///
/// Parsing never fails: malformed markup is repaired the way browsers do it,
/// and fragments get the implied `html`/`head`/`body` scaffolding.
pub fn parse_html(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse raw HTML bytes, detecting the character encoding first.
///
/// See [`crate::util::decode_text`] for the detection order.
pub fn parse_html_bytes(html: &[u8]) -> ArenaDom {
    let hint = crate::util::sniff_charset(html);
    let text = crate::util::decode_text(html, hint);
    parse_html(&text)
}

/// Text of the document's `<title>`, trimmed; `None` when absent or blank.
pub fn document_title(dom: &ArenaDom) -> Option<String> {
    let title = dom.find_by_tag("title")?;
    let text = dom.collect_text(title);
    (!text.is_empty()).then_some(text)
}
