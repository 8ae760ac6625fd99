use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigBuilder, ConfigError, Environment, FileFormat, Source};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use brake_model::{BrakeModelError, HydraulicConfig, Sweep, VehicleConfig};
use utils::units::lbf_to_newtons;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SweepSettings {
    pub pedal_force_n: Sweep,
    pub deceleration_g: Sweep,
    /// Mark every nth deceleration sample on the ideal curve
    pub marker_interval: usize,
}

impl Default for SweepSettings {
    fn default() -> Self {
        SweepSettings {
            // 70lbf of pedal effort
            pedal_force_n: Sweep::new(0.0, lbf_to_newtons(70.0).round(), 100),
            deceleration_g: Sweep::new(0.0, 1.5, 50),
            marker_interval: 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct InjectorSettings {
    /// Bench results to analyse instead of the built in data set
    pub bench_data_csv: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputSettings {
    pub directory: String,
    pub brake_chart: String,
    pub injector_chart: String,
    pub curve_export: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            directory: ".".to_string(),
            brake_chart: "brake-bias.svg".to_string(),
            injector_chart: "injector-flow.svg".to_string(),
            curve_export: "brake-curves.json".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Settings {
    pub vehicle: VehicleConfig,
    pub hydraulics: HydraulicConfig,
    pub sweeps: SweepSettings,
    pub injector: InjectorSettings,
    pub output: OutputSettings,
}

impl Settings {
    const CONFIG_FILENAME: &'static str = "brake-bench-conf";
    const ENV_PREFIX: &'static str = "BRAKE_BENCH";
    const ENV_SEPARATOR: &'static str = "__";

    /// Load the settings from `brake-bench-conf.toml` in the working directory with any
    /// `BRAKE_BENCH__SECTION__KEY` environment variables layered on top.
    ///
    /// If no settings file exists one is written out containing the defaults.
    /// A file or variable that can't be understood drops everything back to the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = PathBuf::from(format!("{}.toml", Settings::CONFIG_FILENAME));
        if !config_path.is_file() {
            info!("No settings found at {}. Writing defaults", config_path.display());
            Settings::default().write(&config_path).unwrap_or_else(|e| {
                error!("Failed to write settings. {}", e.to_string())
            });
        }

        let settings = Settings::load_from(
            config::File::with_name(Settings::CONFIG_FILENAME).required(false),
            Settings::environment(None)
        )?;
        info!("Loaded settings from {}", config_path.display());
        Ok(settings)
    }

    fn load_from<S>(file: S, environment: Environment) -> Result<Self, ConfigError>
        where S: Source + Send + Sync + 'static
    {
        match Settings::builder()?
            .add_source(file)
            .add_source(environment)
            .build()
            .and_then(|settings| settings.try_deserialize::<Settings>()) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("Failed to load settings. {}. Falling back to defaults", e.to_string());
                eprintln!("Warning: failed to load settings ({}). Using the default vehicle and hydraulics", e);
                Settings::builder()?.build()?.try_deserialize()
            }
        }
    }

    /// `BRAKE_BENCH__SECTION__KEY` overrides, read from `variables` instead of the process
    /// environment when given
    fn environment(variables: Option<HashMap<String, String>>) -> Environment {
        Environment::with_prefix(Settings::ENV_PREFIX)
            .separator(Settings::ENV_SEPARATOR)
            .source(variables)
    }

    /// Settings from a TOML document, with anything it doesn't mention left at the default
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Settings::builder()?
            .add_source(config::File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder().add_source(Config::try_from(&Settings::default())?))
    }

    pub fn validate(&self) -> Result<(), BrakeModelError> {
        self.vehicle.validate()?;
        self.hydraulics.validate()?;
        self.sweeps.pedal_force_n.validate_non_negative("sweeps.pedal_force_n")?;
        self.sweeps.deceleration_g.validate_non_negative("sweeps.deceleration_g")?;
        if self.sweeps.marker_interval == 0 {
            return Err(BrakeModelError::InvalidInput {
                parameter: "sweeps.marker_interval", reason: "must be at least 1".to_string()
            });
        }
        Ok(())
    }

    pub fn output_directory(&self) -> PathBuf {
        PathBuf::from(&self.output.directory)
    }

    pub fn brake_chart_path(&self) -> PathBuf {
        self.output_directory().join(&self.output.brake_chart)
    }

    pub fn injector_chart_path(&self) -> PathBuf {
        self.output_directory().join(&self.output.injector_chart)
    }

    pub fn curve_export_path(&self) -> PathBuf {
        self.output_directory().join(&self.output.curve_export)
    }

    pub fn bench_data_csv(&self) -> Option<PathBuf> {
        self.injector.bench_data_csv.as_ref().map(PathBuf::from)
    }

    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })?)
    }
}
