use crate::core::models::library::DEFAULT_DILUENT_NAME;
use crate::core::models::transfer::PlateMetadata;
use crate::core::models::well::{PlateFormat, WellId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_GRANULARITY_NL: u32 = 25;
pub const DEFAULT_TARGET_TOTAL_NL: u32 = 4000;
pub const DEFAULT_TARGET_CONCENTRATION_NM: f64 = 4.0;
pub const DEFAULT_MIN_RESIDUAL_UL: f64 = 15.0;
pub const DEFAULT_SAFETY_BUFFER_UL: f64 = 2.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How raw volumes are snapped to the device's droplet granularity.
///
/// Only exact halfway cases differ: with a 25 nL step, a raw 62.5 nL becomes
/// 75 nL under `HalfUp` and 50 nL under `HalfEven`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Ties round away from zero (upwards, since volumes are positive).
    #[default]
    HalfUp,
    /// Ties round to the even multiple.
    HalfEven,
}

/// Physical limits of the acoustic dispenser and its source plate.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    pub granularity_nl: u32,
    /// Dead volume below which the source well can no longer be addressed.
    pub min_residual_ul: f64,
    /// Extra stock kept above the dead volume.
    pub safety_buffer_ul: f64,
}

impl DeviceConfig {
    pub fn required_residual_ul(&self) -> f64 {
        self.min_residual_ul + self.safety_buffer_ul
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            granularity_nl: DEFAULT_GRANULARITY_NL,
            min_residual_ul: DEFAULT_MIN_RESIDUAL_UL,
            safety_buffer_ul: DEFAULT_SAFETY_BUFFER_UL,
        }
    }
}

/// Desired final state of every destination well.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetConfig {
    pub concentration_nm: f64,
    pub total_volume_nl: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            concentration_nm: DEFAULT_TARGET_CONCENTRATION_NM,
            total_volume_nl: DEFAULT_TARGET_TOTAL_NL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanConfig {
    pub device: DeviceConfig,
    pub target: TargetConfig,
    pub diluent_name: String,
    pub rounding: RoundingMode,
    pub plate: PlateMetadata,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            target: TargetConfig::default(),
            diluent_name: DEFAULT_DILUENT_NAME.to_string(),
            rounding: RoundingMode::default(),
            plate: PlateMetadata::default(),
        }
    }
}

#[derive(Default)]
pub struct PlanConfigBuilder {
    granularity_nl: Option<u32>,
    min_residual_ul: Option<f64>,
    safety_buffer_ul: Option<f64>,
    target_concentration_nm: Option<f64>,
    target_total_nl: Option<u32>,
    diluent_name: Option<String>,
    rounding: Option<RoundingMode>,
    plate: Option<PlateMetadata>,
}

impl PlanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn granularity_nl(mut self, granularity: u32) -> Self {
        self.granularity_nl = Some(granularity);
        self
    }
    pub fn min_residual_ul(mut self, volume: f64) -> Self {
        self.min_residual_ul = Some(volume);
        self
    }
    pub fn safety_buffer_ul(mut self, volume: f64) -> Self {
        self.safety_buffer_ul = Some(volume);
        self
    }
    pub fn target_concentration_nm(mut self, concentration: f64) -> Self {
        self.target_concentration_nm = Some(concentration);
        self
    }
    pub fn target_total_nl(mut self, volume: u32) -> Self {
        self.target_total_nl = Some(volume);
        self
    }
    pub fn diluent_name(mut self, name: impl Into<String>) -> Self {
        self.diluent_name = Some(name.into());
        self
    }
    pub fn rounding(mut self, mode: RoundingMode) -> Self {
        self.rounding = Some(mode);
        self
    }
    pub fn plate(mut self, plate: PlateMetadata) -> Self {
        self.plate = Some(plate);
        self
    }

    pub fn build(self) -> Result<PlanConfig, ConfigError> {
        let device = build_device(
            self.granularity_nl,
            self.min_residual_ul,
            self.safety_buffer_ul,
        )?;

        let total_volume_nl = self.target_total_nl.unwrap_or(DEFAULT_TARGET_TOTAL_NL);
        if total_volume_nl == 0 || total_volume_nl % device.granularity_nl != 0 {
            return Err(ConfigError::InvalidParameter {
                name: "target_total_nl",
                reason: format!(
                    "must be a positive multiple of the {} nL granularity, got {}",
                    device.granularity_nl, total_volume_nl
                ),
            });
        }

        let concentration_nm = self
            .target_concentration_nm
            .unwrap_or(DEFAULT_TARGET_CONCENTRATION_NM);
        if !(concentration_nm.is_finite() && concentration_nm > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "target_concentration_nm",
                reason: format!("must be positive, got {}", concentration_nm),
            });
        }

        let diluent_name = self
            .diluent_name
            .unwrap_or_else(|| DEFAULT_DILUENT_NAME.to_string());
        if diluent_name.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "diluent_name",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(PlanConfig {
            device,
            target: TargetConfig {
                concentration_nm,
                total_volume_nl,
            },
            diluent_name,
            rounding: self.rounding.unwrap_or_default(),
            plate: self.plate.unwrap_or_default(),
        })
    }
}

fn build_device(
    granularity_nl: Option<u32>,
    min_residual_ul: Option<f64>,
    safety_buffer_ul: Option<f64>,
) -> Result<DeviceConfig, ConfigError> {
    let granularity_nl = granularity_nl.unwrap_or(DEFAULT_GRANULARITY_NL);
    if granularity_nl == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "granularity_nl",
            reason: "must be greater than zero".to_string(),
        });
    }

    let non_negative = |name: &'static str, value: f64| {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::InvalidParameter {
                name,
                reason: format!("must be a non-negative volume, got {}", value),
            })
        }
    };

    Ok(DeviceConfig {
        granularity_nl,
        min_residual_ul: non_negative(
            "min_residual_ul",
            min_residual_ul.unwrap_or(DEFAULT_MIN_RESIDUAL_UL),
        )?,
        safety_buffer_ul: non_negative(
            "safety_buffer_ul",
            safety_buffer_ul.unwrap_or(DEFAULT_SAFETY_BUFFER_UL),
        )?,
    })
}

/// A rectangular destination region shot from a single source well.
#[derive(Debug, Clone, PartialEq)]
pub struct SpottingRegion {
    pub top_left: WellId,
    pub bottom_right: WellId,
    /// Number of empty wells left between neighbouring spots, in both directions.
    pub spacing: u32,
    pub source_well: String,
    pub volume_nl: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpottingConfig {
    pub granularity_nl: u32,
    pub plate_format: PlateFormat,
    pub plate: PlateMetadata,
    pub regions: Vec<SpottingRegion>,
}

#[derive(Default)]
pub struct SpottingConfigBuilder {
    granularity_nl: Option<u32>,
    plate_format: Option<PlateFormat>,
    plate: Option<PlateMetadata>,
    regions: Option<Vec<SpottingRegion>>,
}

impl SpottingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn granularity_nl(mut self, granularity: u32) -> Self {
        self.granularity_nl = Some(granularity);
        self
    }
    pub fn plate_format(mut self, format: PlateFormat) -> Self {
        self.plate_format = Some(format);
        self
    }
    pub fn plate(mut self, plate: PlateMetadata) -> Self {
        self.plate = Some(plate);
        self
    }
    pub fn region(mut self, region: SpottingRegion) -> Self {
        self.regions.get_or_insert_with(Vec::new).push(region);
        self
    }
    pub fn regions(mut self, regions: Vec<SpottingRegion>) -> Self {
        self.regions = Some(regions);
        self
    }

    pub fn build(self) -> Result<SpottingConfig, ConfigError> {
        let granularity_nl = self.granularity_nl.unwrap_or(DEFAULT_GRANULARITY_NL);
        if granularity_nl == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "granularity_nl",
                reason: "must be greater than zero".to_string(),
            });
        }
        let regions = self
            .regions
            .filter(|r| !r.is_empty())
            .ok_or(ConfigError::MissingParameter("regions"))?;

        Ok(SpottingConfig {
            granularity_nl,
            plate_format: self.plate_format.unwrap_or_default(),
            plate: self.plate.unwrap_or_default(),
            regions,
        })
    }
}
