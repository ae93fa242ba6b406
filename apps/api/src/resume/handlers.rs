use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::completeness::{compute_completeness_report, CompletenessReport};
use crate::resume::input::{SkillCategory, SUGGESTED_SKILLS};
use crate::resume::models::{
    CertificationDraft, CertificationPatch, ContactPatch, CustomSectionItemDraft,
    CustomSectionItemPatch, EducationDraft, EducationPatch, ProjectDraft, ProjectPatch,
    ResumeState, SectionOrderEntry, SectionType, SkillDraft, SkillPatch, WorkExperienceDraft,
    WorkExperiencePatch,
};
use crate::resume::projection::{project, RenderedDocument};
use crate::resume::validation::{validate_title, Validate};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

fn created(id: Uuid) -> (StatusCode, Json<CreatedResponse>) {
    (StatusCode::CREATED, Json(CreatedResponse { id }))
}

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillNameRequest {
    #[serde(default)]
    pub name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Whole document
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeState> {
    Json(state.session.current().await.as_ref().clone())
}

/// DELETE /api/v1/resume
pub async fn handle_reset(State(state): State<AppState>) -> StatusCode {
    state.session.apply("reset_all", |s| s.reset_all()).await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/resume/preview
pub async fn handle_preview(State(state): State<AppState>) -> Json<RenderedDocument> {
    let current = state.session.current().await;
    Json(project(&current))
}

/// GET /api/v1/resume/completeness
pub async fn handle_completeness(State(state): State<AppState>) -> Json<CompletenessReport> {
    let current = state.session.current().await;
    Json(compute_completeness_report(&current))
}

/// PATCH /api/v1/resume/contact
pub async fn handle_update_contact(
    State(state): State<AppState>,
    Json(patch): Json<ContactPatch>,
) -> Result<StatusCode, AppError> {
    patch.validate()?;
    state
        .session
        .apply("update_contact", |s| s.update_contact(&patch))
        .await;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Work experience
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/work-experience
pub async fn handle_add_work_experience(
    State(state): State<AppState>,
    Json(draft): Json<WorkExperienceDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    draft.validate()?;
    let id = state
        .session
        .apply("add_work_experience", |s| s.add_work_experience(draft))
        .await;
    Ok(created(id))
}

/// PATCH /api/v1/resume/work-experience/:id
pub async fn handle_update_work_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<WorkExperiencePatch>,
) -> Result<StatusCode, AppError> {
    patch.validate()?;
    state
        .session
        .apply("update_work_experience", |s| {
            s.update_work_experience(id, &patch)
        })
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resume/work-experience/:id
pub async fn handle_remove_work_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state
        .session
        .apply("remove_work_experience", |s| s.remove_work_experience(id))
        .await;
    StatusCode::NO_CONTENT
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Json(draft): Json<EducationDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    draft.validate()?;
    let id = state
        .session
        .apply("add_education", |s| s.add_education(draft))
        .await;
    Ok(created(id))
}

/// PATCH /api/v1/resume/education/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EducationPatch>,
) -> Result<StatusCode, AppError> {
    patch.validate()?;
    state
        .session
        .apply("update_education", |s| s.update_education(id, &patch))
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resume/education/:id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state
        .session
        .apply("remove_education", |s| s.remove_education(id))
        .await;
    StatusCode::NO_CONTENT
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(draft): Json<SkillDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    draft.validate()?;
    let id = state
        .session
        .apply("add_skill", |s| s.add_skill(draft))
        .await;
    Ok(created(id))
}

/// POST /api/v1/resume/skills/suggested
///
/// Adds the skill unless one with the same name (ignoring case) already exists.
/// Either way responds with the id of the matching skill.
pub async fn handle_add_suggested_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillNameRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    SkillDraft {
        name: req.name.clone(),
    }
    .validate()?;
    let id = state
        .session
        .apply("add_skill_if_absent", |s| s.add_skill_if_absent(&req.name))
        .await;
    Ok(Json(CreatedResponse { id }))
}

/// PATCH /api/v1/resume/skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SkillPatch>,
) -> Result<StatusCode, AppError> {
    patch.validate()?;
    state
        .session
        .apply("update_skill", |s| s.update_skill(id, &patch))
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resume/skills/:id
pub async fn handle_remove_skill(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    state
        .session
        .apply("remove_skill", |s| s.remove_skill(id))
        .await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/skills/suggestions
pub async fn handle_skill_suggestions() -> Json<&'static [SkillCategory]> {
    Json(SUGGESTED_SKILLS)
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/projects
pub async fn handle_add_project(
    State(state): State<AppState>,
    Json(draft): Json<ProjectDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    draft.validate()?;
    let id = state
        .session
        .apply("add_project", |s| s.add_project(draft))
        .await;
    Ok(created(id))
}

/// PATCH /api/v1/resume/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProjectPatch>,
) -> Result<StatusCode, AppError> {
    patch.validate()?;
    state
        .session
        .apply("update_project", |s| s.update_project(id, &patch))
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resume/projects/:id
pub async fn handle_remove_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state
        .session
        .apply("remove_project", |s| s.remove_project(id))
        .await;
    StatusCode::NO_CONTENT
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/certifications
pub async fn handle_add_certification(
    State(state): State<AppState>,
    Json(draft): Json<CertificationDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    draft.validate()?;
    let id = state
        .session
        .apply("add_certification", |s| s.add_certification(draft))
        .await;
    Ok(created(id))
}

/// PATCH /api/v1/resume/certifications/:id
pub async fn handle_update_certification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CertificationPatch>,
) -> Result<StatusCode, AppError> {
    patch.validate()?;
    state
        .session
        .apply("update_certification", |s| {
            s.update_certification(id, &patch)
        })
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resume/certifications/:id
pub async fn handle_remove_certification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state
        .session
        .apply("remove_certification", |s| s.remove_certification(id))
        .await;
    StatusCode::NO_CONTENT
}

// ────────────────────────────────────────────────────────────────────────────
// Custom sections
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/custom-sections
pub async fn handle_add_custom_section(
    State(state): State<AppState>,
    Json(req): Json<TitleRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    validate_title(&req.title)?;
    let id = state
        .session
        .apply("add_custom_section", |s| s.add_custom_section(&req.title))
        .await;
    Ok(created(id))
}

/// PATCH /api/v1/resume/custom-sections/:id
pub async fn handle_rename_custom_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TitleRequest>,
) -> Result<StatusCode, AppError> {
    validate_title(&req.title)?;
    state
        .session
        .apply("update_custom_section", |s| {
            s.update_custom_section(id, &req.title)
        })
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resume/custom-sections/:id
pub async fn handle_remove_custom_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state
        .session
        .apply("remove_custom_section", |s| s.remove_custom_section(id))
        .await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/resume/custom-sections/:id/items
pub async fn handle_add_custom_section_item(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    Json(draft): Json<CustomSectionItemDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    draft.validate()?;
    let id = state
        .session
        .apply("add_custom_section_item", |s| {
            s.add_custom_section_item(section_id, draft)
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("Custom section {section_id} not found")))?;
    Ok(created(id))
}

/// PATCH /api/v1/resume/custom-sections/:id/items/:item_id
pub async fn handle_update_custom_section_item(
    State(state): State<AppState>,
    Path((section_id, item_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<CustomSectionItemPatch>,
) -> Result<StatusCode, AppError> {
    patch.validate()?;
    state
        .session
        .apply("update_custom_section_item", |s| {
            s.update_custom_section_item(section_id, item_id, &patch)
        })
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resume/custom-sections/:id/items/:item_id
pub async fn handle_remove_custom_section_item(
    State(state): State<AppState>,
    Path((section_id, item_id)): Path<(Uuid, Uuid)>,
) -> StatusCode {
    state
        .session
        .apply("remove_custom_section_item", |s| {
            s.remove_custom_section_item(section_id, item_id)
        })
        .await;
    StatusCode::NO_CONTENT
}

// ────────────────────────────────────────────────────────────────────────────
// Section order
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume/section-order
pub async fn handle_get_section_order(
    State(state): State<AppState>,
) -> Json<Vec<SectionOrderEntry>> {
    Json(state.session.current().await.section_order.clone())
}

/// PUT /api/v1/resume/section-order
pub async fn handle_update_section_order(
    State(state): State<AppState>,
    Json(order): Json<Vec<SectionOrderEntry>>,
) -> StatusCode {
    state
        .session
        .apply("update_section_order", |s| s.update_section_order(order))
        .await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/resume/section-order/:section_type/toggle
pub async fn handle_toggle_section(
    State(state): State<AppState>,
    Path(section): Path<SectionType>,
) -> StatusCode {
    state
        .session
        .apply("toggle_section_enabled", |s| {
            s.toggle_section_enabled(section)
        })
        .await;
    debug!(section = section.as_str(), "Toggled section visibility");
    StatusCode::NO_CONTENT
}
