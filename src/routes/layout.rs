use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{
    compute_grid_offset, group_hits_by_location, group_service_locations, FilterBuilder,
    LayoutError, MarkerLayout,
};
use crate::models::{
    BuildFilterRequest, BuildFilterResponse, ErrorResponse, GridOffsetRequest, GroupHitsRequest,
    GroupServiceLocationsRequest, HealthResponse, LayoutMarkersRequest, LayoutMarkersResponse,
};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub filters: FilterBuilder,
    pub layout: MarkerLayout,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            filters: FilterBuilder::default(),
            layout: MarkerLayout::with_default_spacing(),
        }
    }
}

/// Configure the filter and layout routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/filters", web::post().to(build_filters))
        .route("/locations/group", web::post().to(group_hits))
        .route("/locations/service", web::post().to(group_locations))
        .route("/markers/layout", web::post().to(layout_markers))
        .route("/grid/offset", web::post().to(grid_offset));
}

fn invalid_argument(err: LayoutError) -> HttpResponse {
    tracing::warn!("Rejected layout input: {}", err);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_argument".to_string(),
        message: err.to_string(),
        status_code: 400,
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Build filter string endpoint
///
/// POST /api/v1/filters
///
/// Request body:
/// ```json
/// {
///   "pageFilter": "category:food",
///   "eligibilities": ["veteran", "senior"]
/// }
/// ```
async fn build_filters(
    state: web::Data<AppState>,
    req: web::Json<BuildFilterRequest>,
) -> impl Responder {
    let filters = state
        .filters
        .build(req.page_filter.as_deref(), &req.eligibilities);

    tracing::debug!(
        "Built filter from {} facet values: {}",
        req.eligibilities.len(),
        filters
    );

    let encoded = urlencoding::encode(&filters).into_owned();
    HttpResponse::Ok().json(BuildFilterResponse { filters, encoded })
}

/// Group hits by exact coordinate
///
/// POST /api/v1/locations/group
async fn group_hits(req: web::Json<GroupHitsRequest>) -> impl Responder {
    let groups = group_hits_by_location(&req.hits);
    tracing::debug!("Grouped {} hits into {} clusters", req.hits.len(), groups.len());
    HttpResponse::Ok().json(groups)
}

/// Group a service's locations by exact coordinate
///
/// POST /api/v1/locations/service
async fn group_locations(req: web::Json<GroupServiceLocationsRequest>) -> impl Responder {
    let groups = group_service_locations(&req.locations);
    HttpResponse::Ok().json(groups)
}

/// Lay out map markers for a page of hits
///
/// POST /api/v1/markers/layout
///
/// Request body:
/// ```json
/// {
///   "hits": [{"objectID": "1", "locations": [{"id": "a", "lat": "34.05", "lng": "-118.25"}]}],
///   "spacing": 0.00004
/// }
/// ```
async fn layout_markers(
    state: web::Data<AppState>,
    req: web::Json<LayoutMarkersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let layout = match req.spacing {
        Some(spacing) => match MarkerLayout::new(spacing) {
            Ok(layout) => layout,
            Err(e) => return invalid_argument(e),
        },
        None => state.layout,
    };

    match layout.layout_hits(&req.hits) {
        Ok(markers) => {
            // Every cluster has exactly one member at index 0
            let cluster_count = markers.iter().filter(|m| m.cluster_index == 0).count();
            tracing::info!(
                "Placed {} markers in {} clusters for {} hits",
                markers.len(),
                cluster_count,
                req.hits.len()
            );
            HttpResponse::Ok().json(LayoutMarkersResponse {
                cluster_count,
                markers,
            })
        }
        Err(e) => invalid_argument(e),
    }
}

/// Compute one grid position
///
/// POST /api/v1/grid/offset
async fn grid_offset(
    state: web::Data<AppState>,
    req: web::Json<GridOffsetRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let spacing = req.spacing.unwrap_or_else(|| state.layout.spacing());

    match compute_grid_offset(req.index, req.total, req.epicenter_lat, req.epicenter_lng, spacing) {
        Ok(offset) => HttpResponse::Ok().json(offset),
        Err(e) => invalid_argument(e),
    }
}
