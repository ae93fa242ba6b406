// Résumé document: data model, immutable store, projection and the HTTP handlers over them.
// Every mutation goes through ResumeSession so the snapshot writer sees it.

pub mod completeness;
pub mod handlers;
pub mod input;
pub mod models;
pub mod projection;
pub mod session;
pub mod store;
pub mod validation;
