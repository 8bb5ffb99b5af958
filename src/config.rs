use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldRadarConfig {
    pub display: DisplayConfig,
    pub radar: RadarConfig,
    pub geocode: GeocodeConfig,
    pub sensor: SensorConfig,
    pub input: InputConfig,
    pub export: ExportConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    /// Framebuffer device path
    #[serde(default = "default_framebuffer_device")]
    pub framebuffer_device: String,

    /// Screen size used when the framebuffer cannot report its own geometry
    #[serde(default = "default_display_resolution")]
    pub resolution: (u32, u32),

    /// Target frame rate of the render loop
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Preferred TrueType font, sized relative to screen width
    #[serde(default = "default_font_path")]
    pub font_path: String,

    /// Fonts tried at fixed sizes when the preferred font fails to load
    #[serde(default = "default_fallback_font_paths")]
    pub fallback_font_paths: Vec<String>,

    /// Render without touching the framebuffer
    #[serde(default)]
    pub headless: bool,

    /// PNG file refreshed with the latest frame in headless mode
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RadarConfig {
    #[serde(default = "default_splash_seconds")]
    pub splash_seconds: u64,

    /// Radar frames between pulse spawns
    #[serde(default = "default_pulse_interval_frames")]
    pub pulse_interval_frames: u64,

    #[serde(default = "default_pulse_max_radius")]
    pub pulse_max_radius: f32,

    /// Radius growth per frame
    #[serde(default = "default_pulse_speed")]
    pub pulse_speed: f32,

    /// Distance of the cardinal labels from the radar origin
    #[serde(default = "default_label_radius")]
    pub label_radius: f32,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_attribution")]
    pub attribution: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeocodeConfig {
    /// Reverse geocoding endpoint queried with lat, lon and format=json
    #[serde(default = "default_geocode_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_geocode_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SensorSourceKind {
    Gpsd,
    Mock,
    None,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SensorConfig {
    #[serde(default = "default_sensor_source")]
    pub source: SensorSourceKind,

    /// gpsd JSON socket
    #[serde(default = "default_gpsd_address")]
    pub gpsd_address: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InputConfig {
    /// Touch input device path
    #[serde(default = "default_touch_device")]
    pub touch_device: String,

    #[serde(default = "default_touch_enabled")]
    pub touch_enabled: bool,

    /// Enable the bench keyboard (q quits, c captures, e exports)
    #[serde(default)]
    pub keyboard: bool,

    /// Raw axis maxima of the touch controller; the device's own ranges are
    /// used when unset
    #[serde(default)]
    pub touch_max: Option<(i32, i32)>,

    /// Raw axis minima paired with `touch_max`; zero when unset
    #[serde(default)]
    pub touch_min: Option<(i32, i32)>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportConfig {
    /// Directory receiving GA_REPORT_<HHMM>.csv files
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// IANA zone for row and file timestamps; local time when unset
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemConfig {
    /// Event bus capacity
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

impl FieldRadarConfig {
    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            .set_default("display.framebuffer_device", default_framebuffer_device())?
            .set_default(
                "display.resolution",
                vec![
                    default_display_resolution().0,
                    default_display_resolution().1,
                ],
            )?
            .set_default("display.fps", default_fps())?
            .set_default("display.font_path", default_font_path())?
            .set_default("display.fallback_font_paths", default_fallback_font_paths())?
            .set_default("display.headless", false)?
            .set_default("radar.splash_seconds", default_splash_seconds())?
            .set_default("radar.pulse_interval_frames", default_pulse_interval_frames())?
            .set_default("radar.pulse_max_radius", default_pulse_max_radius() as f64)?
            .set_default("radar.pulse_speed", default_pulse_speed() as f64)?
            .set_default("radar.label_radius", default_label_radius() as f64)?
            .set_default("radar.title", default_title())?
            .set_default("radar.attribution", default_attribution())?
            .set_default("geocode.endpoint", default_geocode_endpoint())?
            .set_default("geocode.timeout_seconds", default_geocode_timeout())?
            .set_default("geocode.user_agent", default_user_agent())?
            .set_default("sensor.source", "gpsd")?
            .set_default("sensor.gpsd_address", default_gpsd_address())?
            .set_default("input.touch_device", default_touch_device())?
            .set_default("input.touch_enabled", default_touch_enabled())?
            .set_default("input.keyboard", false)?
            .set_default("export.directory", default_export_directory())?
            .set_default(
                "system.event_bus_capacity",
                default_event_bus_capacity() as i64,
            )?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables with FIELD_RADAR_ prefix
            .add_source(
                Environment::with_prefix("FIELD_RADAR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: FieldRadarConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.resolution.0 == 0 || self.display.resolution.1 == 0 {
            return Err(ConfigError::Message(
                "Display resolution must be greater than 0".to_string(),
            ));
        }

        if self.display.fps == 0 {
            return Err(ConfigError::Message(
                "Display fps must be greater than 0".to_string(),
            ));
        }

        if self.radar.pulse_interval_frames == 0 {
            return Err(ConfigError::Message(
                "Radar pulse_interval_frames must be greater than 0".to_string(),
            ));
        }

        if self.radar.pulse_speed <= 0.0 || self.radar.pulse_max_radius <= 0.0 {
            return Err(ConfigError::Message(
                "Radar pulse speed and max radius must be positive".to_string(),
            ));
        }

        if self.geocode.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Geocode timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.system.event_bus_capacity == 0 {
            return Err(ConfigError::Message(
                "Event bus capacity must be greater than 0".to_string(),
            ));
        }

        if let Some(tz) = &self.export.timezone {
            if tz.parse::<chrono_tz::Tz>().is_err() {
                return Err(ConfigError::Message(format!(
                    "Unknown export timezone '{}'",
                    tz
                )));
            }
        }

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for FieldRadarConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                framebuffer_device: default_framebuffer_device(),
                resolution: default_display_resolution(),
                fps: default_fps(),
                font_path: default_font_path(),
                fallback_font_paths: default_fallback_font_paths(),
                headless: false,
                snapshot_path: None,
            },
            radar: RadarConfig {
                splash_seconds: default_splash_seconds(),
                pulse_interval_frames: default_pulse_interval_frames(),
                pulse_max_radius: default_pulse_max_radius(),
                pulse_speed: default_pulse_speed(),
                label_radius: default_label_radius(),
                title: default_title(),
                attribution: default_attribution(),
            },
            geocode: GeocodeConfig {
                endpoint: default_geocode_endpoint(),
                timeout_seconds: default_geocode_timeout(),
                user_agent: default_user_agent(),
            },
            sensor: SensorConfig {
                source: default_sensor_source(),
                gpsd_address: default_gpsd_address(),
            },
            input: InputConfig {
                touch_device: default_touch_device(),
                touch_enabled: default_touch_enabled(),
                keyboard: false,
                touch_max: None,
                touch_min: None,
            },
            export: ExportConfig {
                directory: default_export_directory(),
                timezone: None,
            },
            system: SystemConfig {
                event_bus_capacity: default_event_bus_capacity(),
            },
        }
    }
}

// Default value functions
fn default_framebuffer_device() -> String {
    "/dev/fb0".to_string()
}
fn default_display_resolution() -> (u32, u32) {
    (800, 480)
}
fn default_fps() -> u32 {
    30
}
fn default_font_path() -> String {
    "font.ttf".to_string()
}
fn default_fallback_font_paths() -> Vec<String> {
    vec![
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf".to_string(),
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string(),
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf".to_string(),
        "/system/fonts/Roboto-Regular.ttf".to_string(),
    ]
}

fn default_splash_seconds() -> u64 {
    3
}
fn default_pulse_interval_frames() -> u64 {
    15
} // Twice a second at 30 fps
fn default_pulse_max_radius() -> f32 {
    250.0
}
fn default_pulse_speed() -> f32 {
    4.0
}
fn default_label_radius() -> f32 {
    220.0
}
fn default_title() -> String {
    "GA RADAR".to_string()
}
fn default_attribution() -> String {
    "github.com/arshsyst".to_string()
}

fn default_geocode_endpoint() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}
fn default_geocode_timeout() -> u64 {
    5
}
fn default_user_agent() -> String {
    format!("field-radar/{}", env!("CARGO_PKG_VERSION"))
}

fn default_sensor_source() -> SensorSourceKind {
    SensorSourceKind::Gpsd
}
fn default_gpsd_address() -> String {
    "127.0.0.1:2947".to_string()
}

fn default_touch_device() -> String {
    "/dev/input/event0".to_string()
}
fn default_touch_enabled() -> bool {
    true
}

fn default_export_directory() -> String {
    ".".to_string()
}

fn default_event_bus_capacity() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FieldRadarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.radar.splash_seconds, 3);
        assert_eq!(config.geocode.timeout_seconds, 5);
        assert_eq!(config.display.fps, 30);
    }

    #[test]
    fn test_config_validation() {
        let mut config = FieldRadarConfig::default();

        config.display.resolution = (0, 0);
        assert!(config.validate().is_err());

        config.display.resolution = (800, 480);
        assert!(config.validate().is_ok());

        config.radar.pulse_interval_frames = 0;
        assert!(config.validate().is_err());

        config.radar.pulse_interval_frames = 15;
        config.export.timezone = Some("Mars/Olympus".to_string());
        assert!(config.validate().is_err());

        config.export.timezone = Some("Asia/Tehran".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FieldRadarConfig::load_from_file(dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.display.framebuffer_device, "/dev/fb0");
        assert_eq!(config.sensor.source, SensorSourceKind::Gpsd);
        assert_eq!(config.radar.title, "GA RADAR");
    }

    #[test]
    fn test_load_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radar.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[radar]\nsplash_seconds = 1\n\n[sensor]\nsource = \"mock\"\n\n[export]\ndirectory = \"/tmp/reports\""
        )
        .unwrap();

        let config = FieldRadarConfig::load_from_file(&path).unwrap();
        assert_eq!(config.radar.splash_seconds, 1);
        assert_eq!(config.sensor.source, SensorSourceKind::Mock);
        assert_eq!(config.export.directory, "/tmp/reports");
        assert_eq!(config.radar.pulse_speed, 4.0);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = FieldRadarConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[radar]"));
        assert!(rendered.contains("GA RADAR"));
    }
}
