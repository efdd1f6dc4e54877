pub mod category;
pub mod customer;
pub mod order;
pub mod payment;
pub mod product;
pub mod supplier;
pub mod user;

use serde::Serialize;

pub const PER_PAGE: i64 = 15;

/// Pagination envelope attached to every list response.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub last_page: i64,
}

impl PageMeta {
    pub fn new(total: i64, page: i64) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            (total + PER_PAGE - 1) / PER_PAGE
        };
        Self {
            total,
            page,
            per_page: PER_PAGE,
            last_page,
        }
    }
}

/// Clamp a requested page number to something usable in OFFSET math.
pub fn normalize_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}
