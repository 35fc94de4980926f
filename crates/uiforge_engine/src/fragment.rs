use scraper::{Html, Selector};

/// An inline `<script>` found in a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineScript {
    /// Document-order index among the fragment's inline scripts.
    pub position: usize,
    pub source: String,
}

/// A fragment parsed as markup: the serialized subtree that goes on the
/// surface plus its inline scripts, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MountedFragment {
    pub markup: String,
    pub scripts: Vec<InlineScript>,
}

/// Parses `fragment_html` in body context and collects every `<script>`
/// without a `src` attribute. No sanitization happens here.
pub fn mount_fragment(fragment_html: &str) -> MountedFragment {
    let fragment = Html::parse_fragment(fragment_html);
    let markup = fragment.root_element().inner_html();

    let scripts = match Selector::parse("script") {
        Ok(selector) => fragment
            .select(&selector)
            .filter(|script| script.value().attr("src").is_none())
            .enumerate()
            .map(|(position, script)| InlineScript {
                position,
                source: script.text().collect(),
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    MountedFragment { markup, scripts }
}

/// Text content of every element matching `css` in `markup`.
pub fn select_text(markup: &str, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    Html::parse_fragment(markup)
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .collect()
}
