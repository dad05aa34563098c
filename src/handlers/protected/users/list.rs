use axum::extract::{rejection::QueryRejection, Query, State};

use crate::error::ApiError;
use crate::filter::ListQuery;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserPage;
use crate::state::AppState;

/// GET /users - paginated, filterable, sortable listing
///
/// Query parameters: `page`, `order_by`, `order_dir`, `filter_by`,
/// `filter_pred`, `filter_value`. Page size is fixed.
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<UserPage> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let page = state.users.list(&query).await?;
    tracing::debug!(
        "Listed page {}/{} ({} items)",
        page.page_current,
        page.pages_total,
        page.items_here
    );

    Ok(ApiResponse::success(page))
}
