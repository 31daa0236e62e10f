//! Table listing and faceted query endpoints

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::types::ApiError;
use crate::data::DatasetService;
use crate::domain::table::{FacetOption, Record, SortDirection, execute_query, parse_query};

/// Shared state for table endpoints
#[derive(Clone)]
pub struct TablesApiState {
    pub datasets: Arc<DatasetService>,
}

/// Build table API routes
pub fn routes(datasets: Arc<DatasetService>) -> Router<()> {
    let state = TablesApiState { datasets };

    Router::new()
        .route("/", get(list_tables))
        .route("/{table}", get(get_table))
        .with_state(state)
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableInfoDto {
    pub name: String,
    pub exact_columns: Vec<String>,
    pub default_sort: String,
}

#[derive(Serialize, ToSchema)]
pub struct TablesResponse {
    pub tables: Vec<TableInfoDto>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginationDto {
    pub page: usize,
    pub size: usize,
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct SortingDto {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Serialize, ToSchema)]
pub struct TableDataDto {
    /// Rows of the requested page, in sorted order
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Record>,
    pub pagination: PaginationDto,
    pub sorting: SortingDto,
    /// Filter parameters exactly as given in the request
    pub filters: BTreeMap<String, String>,
}

#[derive(Serialize, ToSchema)]
pub struct TableDataResponse {
    pub data: TableDataDto,
    /// Facet options per exact-match column
    #[serde(rename = "filterOptions")]
    pub filter_options: BTreeMap<String, Vec<FacetOption>>,
}

/// List registered tables
#[utoipa::path(
    get,
    path = "/api/v1/tables",
    tag = "tables",
    responses(
        (status = 200, description = "Registered tables", body = TablesResponse)
    )
)]
pub async fn list_tables(State(state): State<TablesApiState>) -> Json<TablesResponse> {
    let tables = state
        .datasets
        .handles()
        .map(|handle| TableInfoDto {
            name: handle.name.clone(),
            exact_columns: handle.settings.exact_columns.clone(),
            default_sort: handle.settings.default_sort.clone(),
        })
        .collect();

    Json(TablesResponse { tables })
}

/// Query a table with filtering, sorting, pagination, and facet counts
///
/// Reserved parameters: `page`, `size`, `sort`, `order`. Every other
/// parameter filters by the column of the same name. Columns configured as
/// exact-match accept comma-separated value sets; all other columns match by
/// case-insensitive substring. The token `__empty__` selects rows where the
/// column is empty or missing.
#[utoipa::path(
    get,
    path = "/api/v1/tables/{table}",
    tag = "tables",
    params(
        ("table" = String, Path, description = "Table name"),
        ("page" = Option<u32>, Query, description = "Page number (1-based, default 1)"),
        ("size" = Option<u32>, Query, description = "Items per page (default 10)"),
        ("sort" = Option<String>, Query, description = "Sort column"),
        ("order" = Option<String>, Query, description = "Sort direction: asc or desc")
    ),
    responses(
        (status = 200, description = "Filtered page with facet options", body = TableDataResponse),
        (status = 404, description = "Unknown table")
    )
)]
pub async fn get_table(
    State(state): State<TablesApiState>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<TableDataResponse>, ApiError> {
    let handle = state.datasets.table(&table).map_err(ApiError::from_data)?;

    let query = parse_query(
        &params,
        &handle.settings.exact_columns,
        &handle.settings.default_sort,
    );

    let items = handle.load().await.map_err(ApiError::from_data)?;
    let output = execute_query(items, &query, &handle.settings.exact_columns);

    Ok(Json(TableDataResponse {
        data: TableDataDto {
            items: output.items,
            pagination: PaginationDto {
                page: query.page,
                size: query.size,
                total: output.total,
            },
            sorting: SortingDto {
                field: query.sort.clone(),
                direction: query.order,
            },
            filters: query.raw_filters,
        },
        filter_options: output.facets,
    }))
}
