//! Page selection over a point-in-time snapshot.
//!
//! # Invariants
//! - `offset` is a 1-based page number.
//! - An empty snapshot with `limit == 1, offset == 1` is an empty page, not
//!   an error.
//! - Any other request on an empty snapshot is `NotFound`, including page 1
//!   with a larger `limit`.
//! - A page is rejected once `len / limit <= page_index` (real division).

use crate::service::error::{ServiceError, ServiceResult};

/// Hard upper bound on `limit`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Rejects page sizes above [`MAX_PAGE_SIZE`].
pub fn check_page_size(limit: i64) -> ServiceResult<()> {
    if limit > MAX_PAGE_SIZE {
        return Err(ServiceError::BadRequest(format!(
            "page size {limit} exceeds maximum {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

/// Returns page `offset` of `snapshot` holding at most `limit` records.
pub fn paginate<T>(snapshot: Vec<T>, limit: i64, offset: i64) -> ServiceResult<Vec<T>> {
    if snapshot.is_empty() && offset == 1 && limit == 1 {
        return Ok(Vec::new());
    }

    let len = snapshot.len();
    let page_index = offset.saturating_sub(1);
    let out_of_range = || {
        ServiceError::NotFound(format!(
            "page {offset} with size {limit} over {len} records"
        ))
    };

    if limit < 1 || page_index < 0 {
        return Err(out_of_range());
    }
    if len as f64 / limit as f64 <= page_index as f64 {
        return Err(out_of_range());
    }

    // `len / limit > page_index` keeps `start` below `len`.
    let start = usize::try_from(limit * page_index).map_err(|_| out_of_range())?;
    let take = usize::try_from(limit).map_err(|_| out_of_range())?;
    Ok(snapshot.into_iter().skip(start).take(take).collect())
}
