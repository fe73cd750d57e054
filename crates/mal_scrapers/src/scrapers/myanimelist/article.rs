use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use mal_core::{ArticleRecord, ContentMode, ContentType};

use super::markup::{render_html, render_text};
use super::ORIGIN;
use crate::scrapers::utils::{select_attr, select_first_text, select_text, selector};

static TITLE: Lazy<Selector> = Lazy::new(|| selector(".news-container h1.title a"));
static INFO: Lazy<Selector> = Lazy::new(|| selector(".news-info-block .information"));
static INFO_LINK: Lazy<Selector> = Lazy::new(|| selector(".news-info-block .information a"));
static PROFILE_IMAGE: Lazy<Selector> = Lazy::new(|| selector(".content img.userimg"));
static CONTENT: Lazy<Selector> = Lazy::new(|| selector(".content"));

static TRAILING_PIPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\|\s*$").expect("valid regex"));

/// Builds the detail record of an article page.
///
/// `id` is echoed back as given. The body comes from the first `.content`
/// region and is rendered according to `mode`; a page without one yields an
/// empty body.
pub fn extract_article(html: &str, id: &str, mode: ContentMode) -> ArticleRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = select_text(root, &TITLE).trim().to_string();
    let author = select_first_text(root, &INFO_LINK).trim().to_string();
    let time = derive_article_time(&select_text(root, &INFO), &author);
    let image = select_attr(root, &PROFILE_IMAGE, "src").filter(|src| !src.is_empty());

    let content = root
        .select(&CONTENT)
        .next()
        .map(|region| match mode {
            ContentMode::Html => render_html(region, ORIGIN),
            ContentMode::Text => render_text(region, ORIGIN),
        })
        .unwrap_or_default();

    let content_type = match mode {
        ContentMode::Html => Some(ContentType::Html),
        ContentMode::Text => None,
    };

    ArticleRecord {
        id: id.to_string(),
        title,
        author,
        time,
        image,
        content,
        content_type,
    }
}

/// Pulls the timestamp out of an article's info block.
///
/// The steps run in a fixed order, and reordering them changes the result on
/// malformed input:
///
/// 1. take the text between the first and second `"by"` (`None` without any `"by"`)
/// 2. keep what precedes the first `|` (`None` without any `|`)
/// 3. drop the first occurrence of `author`
/// 4. trim, then strip a trailing `|`
///
/// A partially matching line can therefore produce `Some("")`.
pub fn derive_article_time(info_text: &str, author: &str) -> Option<String> {
    let after_by = info_text.split("by").nth(1)?;
    let (head, _) = after_by.split_once('|')?;
    let without_author = head.replacen(author, "", 1);
    Some(TRAILING_PIPE.replace(without_author.trim(), "").into_owned())
}
