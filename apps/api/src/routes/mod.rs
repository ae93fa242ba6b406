pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::export::handlers as export;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Whole document
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).delete(resume::handle_reset),
        )
        .route("/api/v1/resume/preview", get(resume::handle_preview))
        .route(
            "/api/v1/resume/completeness",
            get(resume::handle_completeness),
        )
        .route(
            "/api/v1/resume/contact",
            patch(resume::handle_update_contact),
        )
        // Collections
        .route(
            "/api/v1/resume/work-experience",
            post(resume::handle_add_work_experience),
        )
        .route(
            "/api/v1/resume/work-experience/:id",
            patch(resume::handle_update_work_experience)
                .delete(resume::handle_remove_work_experience),
        )
        .route(
            "/api/v1/resume/education",
            post(resume::handle_add_education),
        )
        .route(
            "/api/v1/resume/education/:id",
            patch(resume::handle_update_education).delete(resume::handle_remove_education),
        )
        .route("/api/v1/resume/skills", post(resume::handle_add_skill))
        .route(
            "/api/v1/resume/skills/suggested",
            post(resume::handle_add_suggested_skill),
        )
        .route(
            "/api/v1/resume/skills/:id",
            patch(resume::handle_update_skill).delete(resume::handle_remove_skill),
        )
        .route("/api/v1/resume/projects", post(resume::handle_add_project))
        .route(
            "/api/v1/resume/projects/:id",
            patch(resume::handle_update_project).delete(resume::handle_remove_project),
        )
        .route(
            "/api/v1/resume/certifications",
            post(resume::handle_add_certification),
        )
        .route(
            "/api/v1/resume/certifications/:id",
            patch(resume::handle_update_certification)
                .delete(resume::handle_remove_certification),
        )
        // Custom sections
        .route(
            "/api/v1/resume/custom-sections",
            post(resume::handle_add_custom_section),
        )
        .route(
            "/api/v1/resume/custom-sections/:id",
            patch(resume::handle_rename_custom_section)
                .delete(resume::handle_remove_custom_section),
        )
        .route(
            "/api/v1/resume/custom-sections/:id/items",
            post(resume::handle_add_custom_section_item),
        )
        .route(
            "/api/v1/resume/custom-sections/:id/items/:item_id",
            patch(resume::handle_update_custom_section_item)
                .delete(resume::handle_remove_custom_section_item),
        )
        // Section order
        .route(
            "/api/v1/resume/section-order",
            get(resume::handle_get_section_order).put(resume::handle_update_section_order),
        )
        .route(
            "/api/v1/resume/section-order/:section_type/toggle",
            post(resume::handle_toggle_section),
        )
        .route(
            "/api/v1/skills/suggestions",
            get(resume::handle_skill_suggestions),
        )
        // Export
        .route("/api/v1/export/html", get(export::handle_export_html))
        .route(
            "/api/v1/export/print",
            get(export::handle_print_layout).post(export::handle_write_print),
        )
        .with_state(state)
}
