pub mod myanimelist;

/// Common utilities for scrapers
pub(crate) mod utils {
    use mal_core::{Error, Result};
    use scraper::{ElementRef, Selector};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("Failed to parse URL: {}", e)))
    }

    /// Compiles one of the crate's built-in selectors.
    pub fn selector(css: &'static str) -> Selector {
        Selector::parse(css).unwrap_or_else(|e| panic!("built-in selector {:?} is invalid: {:?}", css, e))
    }

    /// Concatenated text of every element under `scope` matching `selector`.
    pub fn select_text(scope: ElementRef, selector: &Selector) -> String {
        scope
            .select(selector)
            .flat_map(|el| el.text())
            .collect()
    }

    /// Text of the first element under `scope` matching `selector`.
    pub fn select_first_text(scope: ElementRef, selector: &Selector) -> String {
        scope
            .select(selector)
            .next()
            .map(|el| el.text().collect())
            .unwrap_or_default()
    }

    /// `attr` of the first element under `scope` matching `selector`.
    pub fn select_attr(scope: ElementRef, selector: &Selector, attr: &str) -> Option<String> {
        scope
            .select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::utils;
    use scraper::Html;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://myanimelist.net").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_select_text_concatenates_matches() {
        let html = r#"
            <div class="title"><a>Test</a> <a>Title</a></div>
            <div class="content">Test Content</div>
        "#;
        let document = Html::parse_document(html);
        let root = document.root_element();

        assert_eq!(utils::select_text(root, &utils::selector(".title a")), "TestTitle");
        assert_eq!(utils::select_first_text(root, &utils::selector(".title a")), "Test");
        assert_eq!(utils::select_text(root, &utils::selector(".invalid")), "");
    }

    #[test]
    fn test_select_attr() {
        let html = r#"<a class="x" href="/one">1</a><a class="x" href="/two">2</a><a class="y">3</a>"#;
        let document = Html::parse_document(html);
        let root = document.root_element();

        assert_eq!(
            utils::select_attr(root, &utils::selector("a.x"), "href").as_deref(),
            Some("/one")
        );
        assert_eq!(utils::select_attr(root, &utils::selector("a.y"), "href"), None);
        assert_eq!(utils::select_attr(root, &utils::selector("a.z"), "href"), None);
    }
}
