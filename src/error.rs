use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldRadarError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    #[error("Touch error: {0}")]
    Touch(#[from] TouchError),

    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Event bus error: {0}")]
    EventBus(#[from] EventBusError),

    #[error("Component error in {component}: {message}")]
    Component { component: String, message: String },
}

impl FieldRadarError {
    pub fn component<S: Into<String>>(component: S, message: S) -> Self {
        Self::Component {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Location/orientation service failures. The bridge stays inert on any of these.
#[derive(Error, Debug)]
pub enum SensorError {
    #[error("Sensor service unavailable at {address}: {details}")]
    Unavailable { address: String, details: String },

    #[error("Sensor stream closed")]
    StreamClosed,

    #[error("Sensor stream read failed: {details}")]
    Read { details: String },
}

/// Reverse geocoding failures. All of them collapse to `PlaceLabel::Offline`.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Geocoding request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Geocoding service returned status {status}")]
    Status { status: u16 },

    #[error("Malformed geocoding response: {details}")]
    Malformed { details: String },
}

/// Font asset failures. Rendering falls back to system fonts, then to text-less frames.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse font file '{path}'")]
    Parse { path: String },

    #[error("No usable font found")]
    NoneAvailable,
}

/// Report export failures. Captured rows are untouched when these occur.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create report '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    Write(#[from] std::io::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to open framebuffer {device}: {source}")]
    FramebufferOpen {
        device: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Framebuffer error: {details}")]
    Framebuffer { details: String },

    #[error("Unsupported framebuffer depth: {bits} bits per pixel")]
    UnsupportedDepth { bits: u32 },

    #[error("Frame conversion failed: {details}")]
    FormatConversion { details: String },

    #[error("Snapshot write failed: {details}")]
    Snapshot { details: String },
}

#[derive(Error, Debug)]
pub enum TouchError {
    #[error("Failed to open touch device {device}: {details}")]
    DeviceOpen { device: String, details: String },

    #[error("Touch device read error: {details}")]
    DeviceRead { details: String },

    #[error("Touch device not found: {0}")]
    DeviceNotFound(String),

    #[error("Permission denied for touch device: {0}")]
    PermissionDenied(String),

    #[error("Unsupported touch device: {0}")]
    UnsupportedDevice(String),
}

#[derive(Error, Debug)]
pub enum EventBusError {
    #[error("Failed to publish event: {details}")]
    PublishFailed { details: String },

    #[error("Event receiver lagged by {skipped} events")]
    Lagged { skipped: u64 },

    #[error("Event bus closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, FieldRadarError>;
