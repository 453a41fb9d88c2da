//! Parsed page content
//!
//! Thin wrapper over `scraper` that reduces an HTML document to the pieces
//! the extraction stages care about: title, meta description, headings,
//! links, element-level text blocks, and the flattened page text. Tolerant
//! of malformed markup (the parser recovers like a browser does).

use scraper::{Html, Selector};

/// A single anchor from the page.
#[derive(Debug, Clone)]
pub struct PageLink {
    pub href: String,
    pub text: String,
}

/// The parts of a fetched page that extraction operates on.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub headings: Vec<String>,
    pub links: Vec<PageLink>,
    /// Per-element text blocks, used to find digit-bearing fragments
    pub blocks: Vec<String>,
    /// Full flattened document text
    pub text: String,
}

/// Parse an HTML document into `PageContent`.
pub fn parse_html(html: &str) -> PageContent {
    let document = Html::parse_document(html);

    let title = select_first_text(&document, "title");

    let meta_description = Selector::parse(r#"meta[name="description"]"#)
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        });

    let mut headings = Vec::new();
    if let Ok(sel) = Selector::parse("h1, h2, h3") {
        for el in document.select(&sel) {
            let text = collapse(&el.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                headings.push(text);
            }
        }
    }

    let mut links = Vec::new();
    if let Ok(sel) = Selector::parse("a[href]") {
        for el in document.select(&sel) {
            if let Some(href) = el.value().attr("href") {
                let text = collapse(&el.text().collect::<Vec<_>>().join(" "));
                links.push(PageLink {
                    href: href.to_string(),
                    text,
                });
            }
        }
    }

    let mut blocks = Vec::new();
    if let Ok(sel) =
        Selector::parse("p, li, td, h1, h2, h3, h4, h5, h6, span, figcaption, blockquote")
    {
        for el in document.select(&sel) {
            let text = collapse(&el.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                blocks.push(text);
            }
        }
    }

    let text = collapse(
        &document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" "),
    );

    PageContent {
        title,
        meta_description,
        headings,
        links,
        blocks,
        text,
    }
}

fn select_first_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|el| collapse(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|s| !s.is_empty())
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
