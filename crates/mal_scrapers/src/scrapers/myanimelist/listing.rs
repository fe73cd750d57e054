use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use mal_core::SummaryRecord;

use crate::scrapers::utils::{select_attr, select_first_text, select_text, selector};

static NEWS_UNIT: Lazy<Selector> = Lazy::new(|| selector(".news-unit.clearfix.rect"));
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| selector(".title a"));
static THUMBNAIL: Lazy<Selector> = Lazy::new(|| selector("a.image-link img"));
static EXCERPT: Lazy<Selector> = Lazy::new(|| selector(".text"));
static INFO: Lazy<Selector> = Lazy::new(|| selector(".info.di-ib"));
static INFO_LINK: Lazy<Selector> = Lazy::new(|| selector(".info.di-ib a"));

// Leftmost, non-greedy: with several "by"s only the text before the first one is kept.
static TIME_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?) by").expect("valid regex"));

/// Extracts one summary per listing unit, in document order.
///
/// Missing parts of a unit only blank out the matching field.
pub fn extract_listing(html: &str) -> Vec<SummaryRecord> {
    let document = Html::parse_document(html);
    document.select(&NEWS_UNIT).map(extract_summary).collect()
}

fn extract_summary(unit: ElementRef) -> SummaryRecord {
    let link = select_attr(unit, &TITLE_LINK, "href");
    let info_text = select_text(unit, &INFO);

    SummaryRecord {
        id: link.as_deref().filter(|l| !l.is_empty()).map(id_from_link),
        title: select_text(unit, &TITLE_LINK).trim().to_string(),
        image: select_attr(unit, &THUMBNAIL, "src"),
        text: select_text(unit, &EXCERPT).trim().to_string(),
        time: derive_listing_time(info_text.trim()),
        author: select_first_text(unit, &INFO_LINK).trim().to_string(),
        link,
    }
}

/// Takes the timestamp in front of "by" in an info line such as
/// `"Oct 18, 9:12 AM by someone | Discuss (3 comments)"`.
pub fn derive_listing_time(info_text: &str) -> Option<String> {
    TIME_PREFIX
        .captures(info_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Everything after the last `/` of `link`.
pub fn id_from_link(link: &str) -> String {
    link.rsplit('/').next().unwrap_or(link).to_string()
}
