use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use thiserror::Error;

use crate::scalar::{scalar_from_f64, Scalar};

pub const BUILTIN_INTELLECT_CONFIG: &str = include_str!("data/intellect_config.json");
pub const INTELLECT_CONFIG_PATH_ENV: &str = "INTELLECT_CONFIG_PATH";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntellectConfig {
    selection: SelectionConfig,
    recall: RecallConfig,
    contracting: ContractingConfig,
    deployment: DeploymentConfig,
    investigation: InvestigationConfig,
    training: TrainingConfig,
    ratings: RatingConfig,
}

impl IntellectConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_INTELLECT_CONFIG)
                .expect("builtin intellect config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, IntellectConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|source| IntellectConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let config = IntellectConfig::from_json_str(&contents)?;
        Ok(config)
    }

    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    pub fn recall(&self) -> &RecallConfig {
        &self.recall
    }

    pub fn contracting(&self) -> &ContractingConfig {
        &self.contracting
    }

    pub fn deployment(&self) -> &DeploymentConfig {
        &self.deployment
    }

    pub fn investigation(&self) -> &InvestigationConfig {
        &self.investigation
    }

    pub fn training(&self) -> &TrainingConfig {
        &self.training
    }

    pub fn ratings(&self) -> &RatingConfig {
        &self.ratings
    }
}

#[derive(Debug, Error)]
pub enum IntellectConfigError {
    #[error("failed to parse intellect config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read intellect config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    max_exhaustion_pct: f64,
    reserve_fraction: f64,
}

impl SelectionConfig {
    pub fn max_exhaustion_pct(&self) -> f64 {
        self.max_exhaustion_pct
    }

    pub fn reserve_fraction(&self) -> f64 {
        self.reserve_fraction.clamp(0.0, 1.0)
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_exhaustion_pct: 5.0,
            reserve_fraction: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    exhaustion_threshold_pct: f64,
}

impl RecallConfig {
    pub fn exhaustion_threshold_pct(&self) -> Scalar {
        scalar_from_f64(self.exhaustion_threshold_pct)
    }
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            exhaustion_threshold_pct: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContractingConfig {
    urgent_max_exhaustion_pct: f64,
    baseline_income_multiplier: f64,
    base_income: f64,
}

impl ContractingConfig {
    pub fn urgent_max_exhaustion_pct(&self) -> f64 {
        self.urgent_max_exhaustion_pct
    }

    pub fn baseline_income_multiplier(&self) -> Scalar {
        scalar_from_f64(self.baseline_income_multiplier)
    }

    pub fn base_income(&self) -> Scalar {
        scalar_from_f64(self.base_income)
    }
}

impl Default for ContractingConfig {
    fn default() -> Self {
        Self {
            urgent_max_exhaustion_pct: 25.0,
            baseline_income_multiplier: 1.2,
            base_income: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    threat_multiplier: f64,
}

impl DeploymentConfig {
    pub fn threat_multiplier(&self) -> f64 {
        self.threat_multiplier
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            threat_multiplier: 1.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InvestigationConfig {
    agents_per_investigator: u32,
    difficulty_divisor: u32,
}

impl InvestigationConfig {
    pub fn agents_per_investigator(&self) -> usize {
        self.agents_per_investigator.max(1) as usize
    }

    pub fn difficulty_divisor(&self) -> u32 {
        self.difficulty_divisor.max(1)
    }
}

impl Default for InvestigationConfig {
    fn default() -> Self {
        Self {
            agents_per_investigator: 10,
            difficulty_divisor: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    max_exhaustion_pct: f64,
}

impl TrainingConfig {
    pub fn max_exhaustion_pct(&self) -> f64 {
        self.max_exhaustion_pct
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_exhaustion_pct: 5.0,
        }
    }
}

/// Stats of the freshly hired agent every rating is normalized against.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    reference_skill: f64,
    reference_hit_points: f64,
    reference_weapon_damage: f64,
}

impl RatingConfig {
    pub fn reference_skill(&self) -> f64 {
        self.reference_skill
    }

    pub fn reference_hit_points(&self) -> f64 {
        self.reference_hit_points
    }

    pub fn reference_weapon_damage(&self) -> f64 {
        self.reference_weapon_damage
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            reference_skill: 100.0,
            reference_hit_points: 30.0,
            reference_weapon_damage: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntellectConfigMetadata {
    path: Option<PathBuf>,
}

impl IntellectConfigMetadata {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

pub fn load_intellect_config_from_env() -> (Arc<IntellectConfig>, IntellectConfigMetadata) {
    if let Some(path) = env::var(INTELLECT_CONFIG_PATH_ENV).ok().map(PathBuf::from) {
        match IntellectConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!(
                    target: "basic_intellect::config",
                    path = %path.display(),
                    "intellect_config.loaded=file"
                );
                return (Arc::new(config), IntellectConfigMetadata::new(Some(path)));
            }
            Err(err) => {
                tracing::warn!(
                    target: "basic_intellect::config",
                    path = %path.display(),
                    error = %err,
                    "intellect_config.load_failed"
                );
            }
        }
    }

    let config = IntellectConfig::builtin();
    tracing::info!(
        target: "basic_intellect::config",
        "intellect_config.loaded=builtin"
    );
    (config, IntellectConfigMetadata::new(None))
}
