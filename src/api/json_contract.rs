use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, GridPoint, ProgressStatus, Series};
use crate::error::{DrawError, DrawResult};
use crate::render::Color;

use super::DrawSession;

pub const SESSION_EXPORT_JSON_SCHEMA_V1: u32 = 1;

/// One frozen multi-line entry of an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedLine {
    pub color: Color,
    pub points: Vec<DataPoint>,
    #[serde(default)]
    pub committed_at: Option<DateTime<Utc>>,
}

/// Downloadable snapshot of everything the user has drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    pub status: ProgressStatus,
    /// Full grid, unset entries carry `y: null`.
    pub drawn_line: Vec<GridPoint>,
    #[serde(default)]
    pub lines: Vec<ExportedLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExportJsonContractV1 {
    pub schema_version: u32,
    pub export: SessionExport,
}

impl SessionExport {
    pub fn to_json_contract_v1_pretty(&self) -> DrawResult<String> {
        let payload = SessionExportJsonContractV1 {
            schema_version: SESSION_EXPORT_JSON_SCHEMA_V1,
            export: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DrawError::InvalidData(format!("failed to serialize session export contract v1: {e}"))
        })
    }

    /// Accepts both the bare export and the versioned envelope.
    pub fn from_json_compat_str(input: &str) -> DrawResult<Self> {
        if let Ok(export) = serde_json::from_str::<SessionExport>(input) {
            return Ok(export);
        }
        let payload: SessionExportJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DrawError::InvalidData(format!("failed to parse session export json payload: {e}"))
        })?;
        if payload.schema_version != SESSION_EXPORT_JSON_SCHEMA_V1 {
            return Err(DrawError::InvalidData(format!(
                "unsupported session export schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.export)
    }

    /// Filled drawn-line points as a series, e.g. to seed a free-draw session.
    pub fn drawn_series(&self) -> DrawResult<Series> {
        Series::new(
            self.drawn_line
                .iter()
                .filter_map(|point| point.to_data_point())
                .collect(),
        )
    }

    /// Plain-text rendition: one `x,y` row per point, `#` headers per block.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# drawn_line status={:?}", self.status);
        for point in &self.drawn_line {
            match point.y {
                Some(y) => {
                    let _ = writeln!(out, "{},{}", point.x, y);
                }
                None => {
                    let _ = writeln!(out, "{},", point.x);
                }
            }
        }
        for (index, line) in self.lines.iter().enumerate() {
            let _ = write!(out, "# line {index} color={}", line.color.to_hex());
            if let Some(at) = line.committed_at {
                let _ = write!(out, " committed_at={}", at.to_rfc3339());
            }
            out.push('\n');
            for point in &line.points {
                let _ = writeln!(out, "{},{}", point.x, point.y);
            }
        }
        out
    }
}

impl DrawSession {
    #[must_use]
    pub fn export(&self) -> SessionExport {
        SessionExport {
            status: self.status(),
            drawn_line: self.grid.points().to_vec(),
            lines: self
                .lines
                .completed()
                .iter()
                .map(|line| ExportedLine {
                    color: line.style.color,
                    points: line.points.clone(),
                    committed_at: line.committed_at,
                })
                .collect(),
        }
    }

    pub fn export_json_contract_v1_pretty(&self) -> DrawResult<String> {
        self.export().to_json_contract_v1_pretty()
    }
}
