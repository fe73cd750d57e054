//! Rendering of an article's content region.
//!
//! The parsed document is never edited. Each output mode walks the same
//! immutable tree and writes a fresh string, skipping stripped subtrees and
//! rewriting URLs on the way out.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node, Selector};

use crate::scrapers::utils::selector;

/// Subtrees that never reach any rendered output.
static STRIPPED: Lazy<Selector> = Lazy::new(|| selector("script, style, .sns-unit"));

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static STAFF_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Staff[ \t]*\n").expect("valid regex"));
static SOURCE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^Source:").expect("valid regex"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

// Children of these are written verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["iframe", "noembed", "noframes", "noscript", "xmp"];

/// Makes a root-relative link absolute against `origin`.
///
/// Absolute and protocol-relative links are returned untouched.
pub fn absolutize_href<'a>(href: &'a str, origin: &str) -> Cow<'a, str> {
    if href.starts_with('/') && !href.starts_with("//") {
        Cow::Owned(format!("{}{}", origin, href))
    } else {
        Cow::Borrowed(href)
    }
}

/// Makes an image source absolute: `//host/x` gets `https:`, `/x` gets `origin`.
pub fn absolutize_src<'a>(src: &'a str, origin: &str) -> Cow<'a, str> {
    if src.starts_with("//") {
        Cow::Owned(format!("https:{}", src))
    } else if src.starts_with('/') {
        Cow::Owned(format!("{}{}", origin, src))
    } else {
        Cow::Borrowed(src)
    }
}

/// Serializes the cleaned inner markup of `region`.
pub fn render_html(region: ElementRef, origin: &str) -> String {
    let mut out = String::new();
    write_html_children(region, origin, &mut out);
    out
}

fn write_html_children(parent: ElementRef, origin: &str, out: &mut String) {
    let raw = RAW_TEXT_ELEMENTS.contains(&parent.value().name());

    for child in parent.children() {
        match child.value() {
            Node::Text(text) if raw => out.push_str(text),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    write_html_element(element, origin, out);
                }
            }
            _ => {}
        }
    }
}

fn write_html_element(element: ElementRef, origin: &str, out: &mut String) {
    if STRIPPED.matches(&element) {
        return;
    }

    let el = element.value();
    let name = el.name();

    out.push('<');
    out.push_str(name);
    for (key, value) in el.attrs() {
        let value = match (name, key) {
            ("a", "href") => absolutize_href(value, origin),
            ("img", "src") => absolutize_src(value, origin),
            _ => Cow::Borrowed(value),
        };
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(&value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    write_html_children(element, origin, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Renders `region` as plain text with Markdown links.
///
/// Images are dropped, anchors become `[text](href)` (or bare text when either
/// half is empty), and every `<br>` becomes a paragraph break.
pub fn render_text(region: ElementRef, origin: &str) -> String {
    let mut raw = String::new();
    write_text_children(region, origin, &mut raw);
    tidy_text(&raw)
}

fn write_text_children(parent: ElementRef, origin: &str, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    write_text_element(element, origin, out);
                }
            }
            _ => {}
        }
    }
}

fn write_text_element(element: ElementRef, origin: &str, out: &mut String) {
    if is_dropped_in_text(element) {
        return;
    }

    match element.value().name() {
        "br" => out.push_str("\n\n"),
        "a" => {
            let mut label = String::new();
            collect_plain_text(element, &mut label);
            let label = label.trim();
            let href = element
                .value()
                .attr("href")
                .map(|href| absolutize_href(href, origin))
                .unwrap_or_default();

            if !label.is_empty() && !href.is_empty() {
                out.push_str(&format!("[{}]({})", label, href));
            } else {
                out.push_str(label);
            }
        }
        _ => write_text_children(element, origin, out),
    }
}

/// Text content of an anchor, ignoring whatever the text mode drops.
fn collect_plain_text(parent: ElementRef, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    if !is_dropped_in_text(element) {
                        collect_plain_text(element, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn is_dropped_in_text(element: ElementRef) -> bool {
    element.value().name() == "img" || STRIPPED.matches(&element)
}

/// Final pass over extracted text: trim, squeeze blank lines, bold the
/// `Staff` line and the `Source:` label.
pub fn tidy_text(raw: &str) -> String {
    let text = EXCESS_NEWLINES.replace_all(raw.trim(), "\n\n");
    let text = STAFF_LINE.replace(&text, "**Staff**\n");
    SOURCE_LABEL.replace(&text, "**Source:**").into_owned()
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
