//! The per-volume processing driver.

use tracing::{info, warn};

use boreas_dealias::{dealias, DealiasError, DealiasSummary};
use boreas_odim::OdimWriter;
use boreas_superob::{superob, SuperobError, SuperobSummary};
use boreas_volume::PolarVolume;

use crate::settings::Settings;

/// Error type of the per-volume driver.
///
/// A stage error is fatal for the current volume only; the host moves on
/// to the next file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// The dealiasing stage failed.
    #[error("dealiasing: {0}")]
    Dealias(#[from] DealiasError),

    /// The super-observation stage failed.
    #[error("superobing: {0}")]
    Superob(#[from] SuperobError),
}

/// What the pipeline did to one volume.
#[derive(Debug, Clone, Default)]
pub struct ProcessSummary {
    /// Dealiasing summary, when that stage ran.
    pub dealias: Option<DealiasSummary>,
    /// Super-observation summary, when that stage ran.
    pub superob: Option<SuperobSummary>,
}

/// Runs the enabled stages on one volume, in order, writing results
/// through `out`.
///
/// Stage warnings are drained to the logger as they arrive. The first
/// stage error aborts the volume: a dealiasing failure means superobing
/// is not attempted either.
pub fn process_volume(
    volume: &mut PolarVolume,
    settings: &Settings,
    out: &mut dyn OdimWriter,
) -> Result<ProcessSummary, PipelineError> {
    let mut summary = ProcessSummary::default();

    if settings.dealiasing.enabled {
        info!(site = %volume.site, "dealiasing");
        let stage = dealias(volume, &settings.dealiasing.to_config(), out)?;
        drain_warnings("dealiasing", &stage.warnings);
        summary.dealias = Some(stage);
    }

    if settings.superobing.enabled {
        info!(site = %volume.site, "superobing");
        let stage = superob(volume, &settings.superobing.to_config(), out)?;
        drain_warnings("superobing", &stage.warnings);
        summary.superob = Some(stage);
    }

    Ok(summary)
}

fn drain_warnings(stage: &str, warnings: &[String]) {
    for warning in warnings {
        warn!(stage, "{warning}");
    }
}
