use reqwest::Url;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

static SEL_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static SEL_FRAMES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("frame[src], iframe[src]").unwrap());

pub const CANCELED_TITLE_MARKER: &str = "Navigation Canceled";

// Never rendered as page text
const HIDDEN_ELEMENTS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "iframe", "frame", "object",
];

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "center", "dd",
    "details", "dialog", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "legend", "li", "main",
    "menu", "nav", "ol", "optgroup", "option", "p", "pre", "section", "summary", "table",
    "tbody", "tfoot", "thead", "tr", "ul",
];

const CELL_ELEMENTS: &[&str] = &["td", "th"];

/// What the fetcher keeps from one HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParts {
    pub title: Option<String>,
    pub text: String,
    pub frames: Vec<Url>,
}

impl PageParts {
    pub fn is_canceled(&self) -> bool {
        self.title
            .as_deref()
            .is_some_and(|t| t.contains(CANCELED_TITLE_MARKER))
    }
}

fn separator(name: &str) -> Option<char> {
    if BLOCK_ELEMENTS.contains(&name) {
        Some('\n')
    } else if CELL_ELEMENTS.contains(&name) {
        Some('\t')
    } else {
        None
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child_el.value().name();
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                let sep = separator(name);
                if let Some(c) = sep {
                    out.push(c);
                }
                collect_text(child_el, out);
                if let Some(c) = sep {
                    out.push(c);
                }
            }
            _ => {}
        }
    }
}

/// Text a reader would see on the page, roughly as a select-all copy gives it.
///
/// Block elements are separated by line breaks and table cells by tabs;
/// whitespace is left for the normalizer.
pub fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    collect_text(document.root_element(), &mut out);
    out
}

pub fn title(document: &Html) -> Option<String> {
    document
        .select(&SEL_TITLE)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
}

/// Absolute http(s) URLs of the document's frames and iframes, in document order.
pub fn frame_sources(document: &Html, base: &Url) -> Vec<Url> {
    document
        .select(&SEL_FRAMES)
        .filter_map(|el| el.value().attr("src"))
        .filter_map(|src| base.join(src.trim()).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .collect()
}

pub fn parse_page(html: &str, base: &Url) -> PageParts {
    let document = Html::parse_document(html);
    PageParts {
        title: title(&document),
        text: visible_text(&document),
        frames: frame_sources(&document, base),
    }
}
