//! Page-based pagination envelope for list results.
//!
//! Pages are 1-based on the wire. A list request without pagination arguments
//! returns every item and omits the `pagination` block.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Pagination arguments supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateArgs {
    /// 1-based page number.
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_results: u64,
    pub total_page_count: u64,
}

/// A page of results, optionally carrying pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedData<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> PaginatedData<T> {
    /// Unpaginated result.
    pub fn all(data: T) -> Self {
        Self {
            data,
            pagination: None,
        }
    }
}

/// Slice `items` into the requested page.
///
/// A page past the end yields an empty `data` with accurate totals.
pub fn paginate<T>(items: Vec<T>, args: Option<PaginateArgs>) -> DomainResult<PaginatedData<Vec<T>>> {
    let Some(args) = args else {
        return Ok(PaginatedData::all(items));
    };

    if args.page == 0 {
        return Err(DomainError::validation("page must be >= 1"));
    }
    if args.page_size == 0 {
        return Err(DomainError::validation("pageSize must be >= 1"));
    }

    let total_results = items.len() as u64;
    let page_size = u64::from(args.page_size);
    let total_page_count = total_results.div_ceil(page_size);

    let start = (u64::from(args.page) - 1).saturating_mul(page_size);
    let data: Vec<T> = items
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(args.page_size as usize)
        .collect();

    Ok(PaginatedData {
        data,
        pagination: Some(Pagination {
            page: args.page,
            page_size: args.page_size,
            total_results,
            total_page_count,
        }),
    })
}
