//! Route handlers

pub mod groups;
pub mod health;
pub mod measurements;
pub mod sensors;
pub mod stations;

use crate::api::error::{ApiError, ApiResult};
use crate::resolution::{Frequency, GroupFormat};
use crate::store::SortOrder;

/// Parse a resolution slug from a path segment
pub(crate) fn parse_resolution(slug: &str) -> ApiResult<Frequency> {
    slug.parse::<Frequency>()
        .map_err(|e| ApiError::Validation(e.to_string()))
}

/// Parse an optional `order_by` query value; defaults to DESC
pub(crate) fn parse_order(raw: Option<&str>) -> ApiResult<SortOrder> {
    match raw {
        None => Ok(SortOrder::Desc),
        Some(value) => value
            .parse::<SortOrder>()
            .map_err(|e| ApiError::Validation(e.to_string())),
    }
}

/// Parse an optional `format` query value; defaults to rows
pub(crate) fn parse_format(raw: Option<&str>) -> ApiResult<GroupFormat> {
    match raw {
        None => Ok(GroupFormat::Rows),
        Some("rows") => Ok(GroupFormat::Rows),
        Some("chart") => Ok(GroupFormat::Chart),
        Some(other) => Err(ApiError::Validation(format!(
            "invalid format: {other} (expected rows or chart)"
        ))),
    }
}
