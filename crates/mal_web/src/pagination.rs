use serde::Serialize;
use mal_core::SummaryRecord;

use crate::error::AppError;

pub const DEFAULT_MAX_PAGE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub has_next: bool,
    pub next_page: Option<u32>,
    pub max_page: u32,
}

impl Pagination {
    pub fn new(current_page: u32, record_count: usize, max_page: u32) -> Self {
        let below_ceiling = current_page < max_page;
        Self {
            current_page,
            has_next: record_count > 0 && below_ceiling,
            next_page: below_ceiling.then(|| current_page + 1),
            max_page,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewsPage {
    pub data: Vec<SummaryRecord>,
    pub pagination: Pagination,
}

/// Reads the leading integer of `raw` the way a lenient query parser would:
/// leading whitespace and a sign are allowed, trailing garbage is ignored.
/// Anything that is not a positive number becomes page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 1;
    };

    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];

    if negative || digits.is_empty() {
        return 1;
    }
    // Too many digits for a u32 is still "a very large page".
    digits.parse::<u32>().unwrap_or(u32::MAX).max(1)
}

/// Resolves the requested page, rejecting pages above the ceiling instead of clamping.
pub fn resolve_page(raw: Option<&str>, max_page: u32) -> Result<u32, AppError> {
    let page = parse_page(raw);
    if page > max_page {
        return Err(AppError::PageOutOfRange { max_page });
    }
    Ok(page)
}
