// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Plain-text excerpts of item content.
//!
//! The stored document keeps a readable version of the item body for result
//! snippets. Content is rendered to HTML first (so markdown syntax like `#`
//! or `*` disappears), then parsed as an HTML fragment. The text nodes are
//! kept and line breaks collapse to single spaces.

use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_fragment, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use pulldown_cmark::{html, Options, Parser};

/// Converts an item's raw markup into HTML.
pub trait ContentRenderer: Sync {
    fn to_html(&self, markup: &str) -> String;
}

/// CommonMark with the usual site extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl ContentRenderer for MarkdownRenderer {
    fn to_html(&self, markup: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markup, options);
        let mut out = String::with_capacity(markup.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Render `markup` and reduce it to one line of plain text.
pub fn excerpt(renderer: &dyn ContentRenderer, markup: &str) -> String {
    collapse_newlines(&strip_markup(&renderer.to_html(markup)))
}

/// Text content of an HTML fragment: tags and comments dropped, entities
/// decoded.
pub fn strip_markup(html: &str) -> String {
    let context = QualName::new(None, ns!(html), "body".into());
    let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, vec![], false)
        .one(html);

    let mut out = String::with_capacity(html.len());
    push_text(&dom.document, &mut out);
    out
}

/// Append every text node under `handle`, in document order.
fn push_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Document | NodeData::Element { .. } => {
            for child in handle.children.borrow().iter() {
                push_text(child, out);
            }
        }
        NodeData::Comment { .. } | NodeData::Doctype { .. } => {}
        NodeData::ProcessingInstruction { .. } => {}
    }
}

fn collapse_newlines(text: &str) -> String {
    text.split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
