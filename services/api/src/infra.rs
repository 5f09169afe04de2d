use clap::Args;
use hiring_funnel::config::{AppConfig, ConfigError, FunnelConfig};
use hiring_funnel::error::AppError;
use hiring_funnel::funnel::{AlignmentMode, FunnelAnalysis, HiringReport};
use hiring_funnel::harvest::{HarvestClient, HarvestSnapshot, SnapshotLoader};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) report: Arc<HiringReport>,
}

/// Analysis overrides shared by every subcommand.
#[derive(Args, Debug, Default)]
pub(crate) struct AnalysisArgs {
    /// Department to analyze (case-insensitive)
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// JSON file mapping interview names to funnel stages
    #[arg(long)]
    pub(crate) stage_map: Option<PathBuf>,
    /// Directory holding the cached Harvest collections
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Ignore the cache and fetch every collection from Harvest
    #[arg(long)]
    pub(crate) refresh: bool,
    /// Measure interviewer alignment on their last stage only, like the historical report
    #[arg(long)]
    pub(crate) last_stage_alignment: bool,
}

impl AnalysisArgs {
    pub(crate) fn apply(self, config: &mut AppConfig) -> Result<(), ConfigError> {
        if let Some(department) = self.department {
            config.funnel.department = department;
        }
        if let Some(path) = self.stage_map {
            config.funnel.stage_map = FunnelConfig::stage_map_from_path(path)?;
        }
        if let Some(data_dir) = self.data_dir {
            config.harvest.data_dir = data_dir;
        }
        if self.refresh {
            config.harvest.refresh = true;
        }
        if self.last_stage_alignment {
            config.funnel.alignment = AlignmentMode::LastStageOnly;
        }
        Ok(())
    }
}

pub(crate) async fn load_snapshot(config: &AppConfig) -> Result<HarvestSnapshot, AppError> {
    let loader = SnapshotLoader::<HarvestClient>::from_config(&config.harvest)?;
    Ok(loader.load().await?)
}

pub(crate) async fn build_report(config: &AppConfig) -> Result<HiringReport, AppError> {
    let snapshot = load_snapshot(config).await?;
    Ok(FunnelAnalysis::run(&snapshot, &config.funnel)?)
}
