use crate::cli::{PlanArgs, SpotArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use echoplan::core::models::transfer::PlateMetadata;
use echoplan::core::models::well::PlateFormat;
use echoplan::engine::config as core_config;
use echoplan::engine::config::RoundingMode;
use echoplan::engine::tasks::spotting;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDeviceConfig {
    #[serde(rename = "granularity-nl")]
    granularity_nl: Option<u32>,
    #[serde(rename = "min-residual-ul")]
    min_residual_ul: Option<f64>,
    #[serde(rename = "safety-buffer-ul")]
    safety_buffer_ul: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTargetConfig {
    #[serde(rename = "concentration-nm")]
    concentration_nm: Option<f64>,
    #[serde(rename = "total-volume-nl")]
    total_volume_nl: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPlanningConfig {
    #[serde(rename = "diluent-name")]
    diluent_name: Option<String>,
    rounding: Option<RoundingMode>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPlateConfig {
    #[serde(rename = "source-plate-name")]
    source_plate_name: Option<String>,
    #[serde(rename = "source-plate-type")]
    source_plate_type: Option<String>,
    #[serde(rename = "destination-plate-name")]
    destination_plate_name: Option<String>,
}

impl PartialPlateConfig {
    fn into_metadata(self) -> PlateMetadata {
        let defaults = PlateMetadata::default();
        PlateMetadata {
            source_plate_name: self.source_plate_name.unwrap_or(defaults.source_plate_name),
            source_plate_type: self.source_plate_type.unwrap_or(defaults.source_plate_type),
            destination_plate_name: self
                .destination_plate_name
                .unwrap_or(defaults.destination_plate_name),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct PartialRegion {
    #[serde(rename = "top-left")]
    top_left: String,
    #[serde(rename = "bottom-right")]
    bottom_right: String,
    #[serde(default)]
    spacing: u32,
    #[serde(rename = "source-well")]
    source_well: String,
    #[serde(rename = "volume-nl")]
    volume_nl: u32,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSpottingConfig {
    #[serde(rename = "plate-format")]
    plate_format: Option<PlateFormat>,
    regions: Option<Vec<PartialRegion>>,
}

/// Settings from an optional TOML file, before CLI flags are layered on top.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    device: Option<PartialDeviceConfig>,
    target: Option<PartialTargetConfig>,
    planning: Option<PartialPlanningConfig>,
    plate: Option<PartialPlateConfig>,
    spotting: Option<PartialSpottingConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn parse_rounding(key: &str, value: &str) -> Result<RoundingMode> {
    match value {
        "half-up" => Ok(RoundingMode::HalfUp),
        "half-even" => Ok(RoundingMode::HalfEven),
        _ => Err(CliError::Config(format!(
            "Invalid rounding mode for {}: {} (expected 'half-up' or 'half-even')",
            key, value
        ))),
    }
}

fn parse_plate_format(key: &str, value: &str) -> Result<PlateFormat> {
    match value {
        "96" => Ok(PlateFormat::Wells96),
        "384" => Ok(PlateFormat::Wells384),
        "1536" => Ok(PlateFormat::Wells1536),
        _ => Err(CliError::Config(format!(
            "Invalid plate format for {}: {} (expected 96, 384 or 1536)",
            key, value
        ))),
    }
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_plan_args(mut self, args: &PlanArgs) -> Result<core_config::PlanConfig> {
        self.apply_set_values(&args.set_values)?;

        let device = self.device.take().unwrap_or_default();
        let target = self.target.take().unwrap_or_default();
        let planning = self.planning.take().unwrap_or_default();
        let plate = self.plate.take().unwrap_or_default();

        let mut builder = core_config::PlanConfigBuilder::new().plate(plate.into_metadata());
        if let Some(granularity) = device.granularity_nl {
            builder = builder.granularity_nl(granularity);
        }
        if let Some(residual) = device.min_residual_ul {
            builder = builder.min_residual_ul(residual);
        }
        if let Some(buffer) = device.safety_buffer_ul {
            builder = builder.safety_buffer_ul(buffer);
        }
        if let Some(concentration) = args.target_concentration.or(target.concentration_nm) {
            builder = builder.target_concentration_nm(concentration);
        }
        if let Some(total) = args.total_volume.or(target.total_volume_nl) {
            builder = builder.target_total_nl(total);
        }
        if let Some(name) = args.diluent.clone().or(planning.diluent_name) {
            builder = builder.diluent_name(name);
        }
        if let Some(mode) = args.rounding.map(Into::into).or(planning.rounding) {
            builder = builder.rounding(mode);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_spot_args(mut self, args: &SpotArgs) -> Result<core_config::SpottingConfig> {
        self.apply_set_values(&args.set_values)?;

        let device = self.device.take().unwrap_or_default();
        let plate = self.plate.take().unwrap_or_default();
        let spotting = self.spotting.take().unwrap_or_default();

        let mut regions = Vec::new();
        for region in spotting.regions.unwrap_or_default() {
            regions.push(spotting::parse_region(
                &region.top_left,
                &region.bottom_right,
                region.spacing,
                region.source_well,
                region.volume_nl,
            )?);
        }
        if !args.regions.is_empty() {
            let source_well = args.source_well.as_deref().ok_or_else(|| {
                CliError::Argument("--source-well is required with --region".to_string())
            })?;
            let volume_nl = args.volume.ok_or_else(|| {
                CliError::Argument("--volume is required with --region".to_string())
            })?;
            for span in &args.regions {
                let (top_left, bottom_right) = parser::parse_region_span(span)
                    .map_err(|e| CliError::Argument(e.to_string()))?;
                regions.push(spotting::parse_region(
                    top_left,
                    bottom_right,
                    args.spacing,
                    source_well,
                    volume_nl,
                )?);
            }
        }

        let mut builder = core_config::SpottingConfigBuilder::new()
            .plate(plate.into_metadata())
            .regions(regions);
        if let Some(granularity) = device.granularity_nl {
            builder = builder.granularity_nl(granularity);
        }
        if let Some(format) = args.plate_format.map(Into::into).or(spotting.plate_format) {
            builder = builder.plate_format(format);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

            match key {
                "device.granularity-nl" => {
                    self.device.get_or_insert_with(Default::default).granularity_nl =
                        Some(parse_value(key, value, "integer")?);
                }
                "device.min-residual-ul" => {
                    self.device.get_or_insert_with(Default::default).min_residual_ul =
                        Some(parse_value(key, value, "float")?);
                }
                "device.safety-buffer-ul" => {
                    self.device.get_or_insert_with(Default::default).safety_buffer_ul =
                        Some(parse_value(key, value, "float")?);
                }
                "target.concentration-nm" => {
                    self.target.get_or_insert_with(Default::default).concentration_nm =
                        Some(parse_value(key, value, "float")?);
                }
                "target.total-volume-nl" => {
                    self.target.get_or_insert_with(Default::default).total_volume_nl =
                        Some(parse_value(key, value, "integer")?);
                }
                "planning.diluent-name" => {
                    self.planning.get_or_insert_with(Default::default).diluent_name =
                        Some(value.to_string());
                }
                "planning.rounding" => {
                    self.planning.get_or_insert_with(Default::default).rounding =
                        Some(parse_rounding(key, value)?);
                }
                "plate.source-plate-name" => {
                    self.plate.get_or_insert_with(Default::default).source_plate_name =
                        Some(value.to_string());
                }
                "plate.source-plate-type" => {
                    self.plate.get_or_insert_with(Default::default).source_plate_type =
                        Some(value.to_string());
                }
                "plate.destination-plate-name" => {
                    self.plate
                        .get_or_insert_with(Default::default)
                        .destination_plate_name = Some(value.to_string());
                }
                "spotting.plate-format" => {
                    self.spotting.get_or_insert_with(Default::default).plate_format =
                        Some(parse_plate_format(key, value)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
