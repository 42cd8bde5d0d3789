//! Chart image export.
//!
//! Export is a pure function of the last-drawn chart (its legend data and
//! geometry), never of live engine state: the retained model must reproduce
//! arcs and legend even if verdicts changed since the draw. The raster
//! encode step is the one asynchronous boundary; it either completes or the
//! whole operation is abandoned with no partial file.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::chart::ChartModel;

/// Fixed artifact name offered for download.
pub const CHART_EXPORT_FILE_NAME: &str = "rgaa-audit-chart.png";
pub const CHART_EXPORT_MEDIA_TYPE: &str = "image/png";

/// How long the triggering control stays in its visible error state before
/// auto-restoring.
pub const EXPORT_ERROR_RESTORE_MS: u64 = 3_000;

const ERROR_NOTHING_RENDERED: &str = "RG-EXP-0001";
const ERROR_ENCODE: &str = "RG-EXP-0002";
const ERROR_TIMESTAMP: &str = "RG-EXP-0003";

// ---------------------------------------------------------------------------
// Encoder capability
// ---------------------------------------------------------------------------

/// Everything the encoder needs: the retained chart plus the transparent
/// background requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRender {
    pub chart: ChartModel,
    pub transparent_background: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("raster encode failed: {detail}")]
pub struct RasterEncodeError {
    pub detail: String,
}

/// Image decode/encode boundary. The concrete implementation lives with the
/// panel (canvas, offscreen bitmap, test stub); the engine only sees bytes
/// or a failure.
pub trait RasterEncoder {
    fn encode(&mut self, render: &ChartRender) -> Result<Vec<u8>, RasterEncodeError>;
}

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// The downloadable file plus its integrity metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    pub content_sha256: String,
    /// RFC3339 UTC, derived from the caller-supplied timestamp.
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("no chart has been rendered yet")]
    NothingRendered,
    #[error(transparent)]
    Encode(#[from] RasterEncodeError),
    #[error("invalid export timestamp: {unix_ms} ms")]
    InvalidTimestamp { unix_ms: i64 },
}

impl ExportError {
    pub fn stable_code(&self) -> &'static str {
        match self {
            Self::NothingRendered => ERROR_NOTHING_RENDERED,
            Self::Encode(_) => ERROR_ENCODE,
            Self::InvalidTimestamp { .. } => ERROR_TIMESTAMP,
        }
    }
}

/// Produce the export artifact from a retained chart. Pure apart from the
/// encoder call; the chart model is not re-derived from session state.
pub fn export_chart(
    retained: &ChartModel,
    encoder: &mut dyn RasterEncoder,
    generated_at_unix_ms: i64,
) -> Result<ExportArtifact, ExportError> {
    let generated_at = DateTime::<Utc>::from_timestamp_millis(generated_at_unix_ms)
        .ok_or(ExportError::InvalidTimestamp {
            unix_ms: generated_at_unix_ms,
        })?
        .to_rfc3339_opts(SecondsFormat::Millis, true);

    let render = ChartRender {
        chart: retained.clone(),
        transparent_background: true,
    };
    let bytes = encoder.encode(&render)?;
    let content_sha256 = sha256_hex(&bytes);

    Ok(ExportArtifact {
        file_name: CHART_EXPORT_FILE_NAME.to_string(),
        media_type: CHART_EXPORT_MEDIA_TYPE.to_string(),
        bytes,
        content_sha256,
        generated_at,
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

// ---------------------------------------------------------------------------
// Export control state
// ---------------------------------------------------------------------------

/// Visual state of the export button. On failure the control shows a
/// transient error and auto-restores after [`EXPORT_ERROR_RESTORE_MS`];
/// the engine owns no clock, so elapsed time is ticked in by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportControlState {
    Idle,
    Busy,
    Error { remaining_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportControl {
    state: ExportControlState,
}

impl Default for ExportControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportControl {
    pub fn new() -> Self {
        Self {
            state: ExportControlState::Idle,
        }
    }

    pub fn state(&self) -> ExportControlState {
        self.state
    }

    pub fn begin(&mut self) {
        self.state = ExportControlState::Busy;
    }

    pub fn succeed(&mut self) {
        self.state = ExportControlState::Idle;
    }

    pub fn fail(&mut self) {
        self.state = ExportControlState::Error {
            remaining_ms: EXPORT_ERROR_RESTORE_MS,
        };
    }

    /// Advance the error countdown; restores to idle once it runs out.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if let ExportControlState::Error { remaining_ms } = self.state {
            let remaining = remaining_ms.saturating_sub(elapsed_ms);
            self.state = if remaining == 0 {
                ExportControlState::Idle
            } else {
                ExportControlState::Error {
                    remaining_ms: remaining,
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localize::StaticLocalizer;
    use crate::snapshot::Snapshot;

    struct FixedEncoder(Result<Vec<u8>, RasterEncodeError>);

    impl RasterEncoder for FixedEncoder {
        fn encode(&mut self, _render: &ChartRender) -> Result<Vec<u8>, RasterEncodeError> {
            self.0.clone()
        }
    }

    fn placeholder_chart() -> ChartModel {
        let snapshot = Snapshot::compute(&Default::default());
        ChartModel::build(&snapshot, &StaticLocalizer::new())
    }

    #[test]
    fn successful_export_hashes_and_names_the_artifact() {
        let mut encoder = FixedEncoder(Ok(vec![1, 2, 3]));
        let artifact = export_chart(&placeholder_chart(), &mut encoder, 1_700_000_000_000)
            .expect("export");
        assert_eq!(artifact.file_name, CHART_EXPORT_FILE_NAME);
        assert_eq!(artifact.media_type, CHART_EXPORT_MEDIA_TYPE);
        assert_eq!(artifact.content_sha256.len(), 64);
        assert!(artifact.generated_at.starts_with("2023-11-14T"));
    }

    #[test]
    fn encode_failure_produces_no_artifact() {
        let mut encoder = FixedEncoder(Err(RasterEncodeError {
            detail: "decode aborted".to_string(),
        }));
        let err = export_chart(&placeholder_chart(), &mut encoder, 0).unwrap_err();
        assert_eq!(err.stable_code(), "RG-EXP-0002");
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        let mut encoder = FixedEncoder(Ok(Vec::new()));
        let err = export_chart(&placeholder_chart(), &mut encoder, i64::MAX).unwrap_err();
        assert_eq!(err.stable_code(), "RG-EXP-0003");
    }

    #[test]
    fn error_state_auto_restores_after_fixed_delay() {
        let mut control = ExportControl::new();
        control.begin();
        assert_eq!(control.state(), ExportControlState::Busy);
        control.fail();
        control.tick(1_000);
        assert_eq!(
            control.state(),
            ExportControlState::Error {
                remaining_ms: EXPORT_ERROR_RESTORE_MS - 1_000
            }
        );
        control.tick(EXPORT_ERROR_RESTORE_MS);
        assert_eq!(control.state(), ExportControlState::Idle);
    }
}
