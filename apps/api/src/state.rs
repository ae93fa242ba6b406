use std::sync::Arc;

use crate::config::Config;
use crate::export::PageConfig;
use crate::resume::session::ResumeSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ResumeSession>,
    pub config: Config,
    /// Print page geometry and font metrics used by the export layout.
    pub page_config: PageConfig,
}

#[cfg(test)]
impl AppState {
    /// State with persistence disabled and exports going to `export_dir`.
    pub fn for_tests(export_dir: std::path::PathBuf) -> Self {
        use crate::export::{letter_page_config, FontFamily};
        use crate::resume::models::ResumeState;
        use crate::snapshot::SnapshotWriter;

        let config = Config {
            port: 0,
            rust_log: "debug".to_string(),
            data_dir: export_dir.join("data"),
            export_dir,
            export_font: FontFamily::Inter,
        };
        AppState {
            session: Arc::new(ResumeSession::new(
                ResumeState::default(),
                SnapshotWriter::disabled(),
            )),
            page_config: letter_page_config(config.export_font),
            config,
        }
    }
}
