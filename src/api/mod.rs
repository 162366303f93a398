mod drag_controller;
mod json_contract;
mod line_controller;
mod plugin_dispatch;
mod render_frame_builder;
mod session;
mod session_config;

pub use json_contract::{
    ExportedLine, SESSION_EXPORT_JSON_SCHEMA_V1, SessionExport, SessionExportJsonContractV1,
};
pub use session::DrawSession;
pub use session_config::{PointsDisplay, SessionConfig};
