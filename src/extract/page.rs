// src/extract/page.rs

use scraper::{Html, Node, Selector};

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// A listing page parsed once and shared by every field cascade.
pub struct Page {
    document: Html,
    text: String,
}

impl Page {
    pub fn parse(raw: &str) -> Self {
        let document = Html::parse_document(raw);
        let text = visible_text(&document);
        Self { document, text }
    }

    /// Visible text of the `<body>`, one space between text nodes.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text content of the first element matching `selector`, trimmed.
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.document
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }
}

fn visible_text(document: &Html) -> String {
    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    let mut parts: Vec<&str> = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            parts.push(text);
        }
    }
    parts.join(" ")
}
