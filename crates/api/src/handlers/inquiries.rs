//! Contact inquiry handlers: public submission and staff triage.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use folio_core::error::CoreError;
use folio_core::status::{parse_status, INQUIRY_STATUSES};
use folio_core::types::DbId;
use folio_db::models::inquiry::{ContactInquiry, CreateInquiry, UpdateInquiry};
use folio_db::repositories::InquiryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/contact
///
/// Public inquiry submission for the front-end script. Mirrors the HTML
/// contact form, returning 201 with the stored record.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateInquiry>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactInquiry>>)> {
    input.validate()?;

    let inquiry = InquiryRepo::create(&state.pool, &input).await?;
    tracing::info!(inquiry_id = inquiry.id, "Contact inquiry submitted via API");

    if let Some(mailer) = state.mailer.clone() {
        let notify = inquiry.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_new_inquiry(&notify).await {
                tracing::warn!(error = %e, "Failed to send inquiry notification");
            }
        });
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: inquiry })))
}

/// Query parameters for the staff inquiry list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Optional workflow status filter (`NEW`, `READ`, `RESPONDED`, `ARCHIVED`).
    pub status: Option<String>,
}

/// GET /api/v1/staff/inquiries
pub async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<ContactInquiry>>>> {
    let status = match params.status.as_deref() {
        Some(raw) => Some(parse_status(raw, &INQUIRY_STATUSES).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown status '{raw}'")))
        })?),
        None => None,
    };

    let inquiries = InquiryRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse { data: inquiries }))
}

/// GET /api/v1/staff/inquiries/{id}
pub async fn get_by_id(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ContactInquiry>> {
    let inquiry = InquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inquiry",
            id,
        }))?;
    Ok(Json(inquiry))
}

/// PUT /api/v1/staff/inquiries/{id}
///
/// Staff triage: workflow status and internal notes only.
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInquiry>,
) -> AppResult<Json<ContactInquiry>> {
    if let Some(raw) = input.status.as_deref() {
        parse_status(raw, &INQUIRY_STATUSES).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown status '{raw}'")))
        })?;
    }

    let inquiry = InquiryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inquiry",
            id,
        }))?;
    Ok(Json(inquiry))
}

/// DELETE /api/v1/staff/inquiries/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = InquiryRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Inquiry",
            id,
        }))
    }
}
