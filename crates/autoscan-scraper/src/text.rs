//! Visible-text extraction from marketplace result pages.
//!
//! Listing-like elements are preferred over whole-page text. A cookie-consent
//! container, if present, is left out of the extracted text; script-like
//! elements never contribute.

use std::sync::LazyLock;

use autoscan_core::truncate_chars;
use scraper::{ElementRef, Html, Selector};

const ITEM_SEPARATOR: &str = "\n\n---\n\n";

/// Consent containers and accept buttons, most specific first. Only the
/// first selector with a match is used.
const CONSENT_SELECTORS: [&str; 8] = [
    "#usercentrics-root",
    "#onetrust-consent-sdk",
    "[data-testid=\"uc-accept-all-button\"]",
    "#onetrust-accept-btn-handler",
    ".cookie-banner",
    ".cookie-banner-accept",
    "[id*=\"consent\"]",
    "[id*=\"accept\"]",
];

const LISTING_SELECTOR: &str = "article, [data-testid*=\"listing\"], .listing-item, \
     .result-item, .vehicle-card, .ad-listitem";

const IGNORED_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "template", "svg"];

const BLOCK_ELEMENTS: [&str; 33] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "tr", "ul",
];

static CONSENT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONSENT_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("valid consent selector"))
        .collect()
});
static LISTING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(LISTING_SELECTOR).expect("valid listing selector"));
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));

/// Caps applied to the text of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLimits {
    /// Listing elements kept, in document order.
    pub max_items: usize,
    /// Characters kept from the final text.
    pub max_chars: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_items: 20,
            max_chars: 50_000,
        }
    }
}

/// Reduces an HTML page to the text a reader would see in its result list.
///
/// When listing-like elements exist, up to `max_items` of them are joined with
/// a `---` separator; otherwise the body text is used. Either way the result is
/// cut to `max_chars` characters.
#[must_use]
pub fn page_text(html: &str, limits: ContentLimits) -> String {
    let document = Html::parse_document(html);
    let consent = consent_banner(&document);

    let items: Vec<String> = document
        .select(&LISTING)
        .filter(|item| !is_nested_listing(*item))
        .filter(|item| !consent.is_some_and(|c| *item == c || is_within(*item, c)))
        .map(|item| element_text(item, consent))
        .filter(|text| !text.is_empty())
        .take(limits.max_items)
        .collect();

    let text = if items.is_empty() {
        document
            .select(&BODY)
            .next()
            .map(|body| element_text(body, consent))
            .unwrap_or_default()
    } else {
        items.join(ITEM_SEPARATOR)
    };

    truncate_chars(&text, limits.max_chars)
}

fn consent_banner(document: &Html) -> Option<ElementRef<'_>> {
    CONSENT
        .iter()
        .find_map(|selector| document.select(selector).next())
}

fn is_nested_listing(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| LISTING.matches(&ancestor))
}

fn is_within<'a>(element: ElementRef<'a>, container: ElementRef<'a>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor == container)
}

fn element_text<'a>(element: ElementRef<'a>, skip: Option<ElementRef<'a>>) -> String {
    let mut raw = String::new();
    collect_text(element, skip, &mut raw);
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text<'a>(element: ElementRef<'a>, skip: Option<ElementRef<'a>>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            push_words(out, text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        if skip == Some(child) {
            continue;
        }
        let name = child.value().name();
        if IGNORED_ELEMENTS.contains(&name) {
            continue;
        }
        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            line_break(out);
        }
        collect_text(child, skip, out);
        if block {
            line_break(out);
        }
    }
}

fn push_words(out: &mut String, text: &str) {
    let mut words = text.split_whitespace().peekable();
    if words.peek().is_none() {
        return;
    }
    if !out.is_empty() && !out.ends_with(['\n', ' ']) {
        out.push(' ');
    }
    for (i, word) in words.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(word);
    }
}

fn line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
