use super::{SensorBridge, SensorSource};
use crate::error::SensorError;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info, trace};

const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true};\n";

/// The gpsd reports the bridge cares about
#[derive(Debug, Clone, PartialEq)]
pub enum GpsdReport {
    /// TPV report with a position fix
    Location { latitude: f64, longitude: f64 },
    /// ATT report; heading first, then pitch and roll when present
    Attitude { axes: Vec<f64> },
}

#[derive(Debug, Deserialize)]
struct RawReport {
    class: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    heading: Option<f64>,
    #[serde(default)]
    pitch: Option<f64>,
    #[serde(default)]
    roll: Option<f64>,
}

/// Parse one line of gpsd JSON output.
///
/// Lines of other classes, TPV reports without a fix and unparsable lines yield `None`.
pub fn parse_report(line: &str) -> Option<GpsdReport> {
    let raw: RawReport = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => {
            trace!("Skipping unparsable gpsd line: {}", e);
            return None;
        }
    };

    match raw.class.as_str() {
        "TPV" => match (raw.lat, raw.lon) {
            (Some(latitude), Some(longitude)) => Some(GpsdReport::Location {
                latitude,
                longitude,
            }),
            _ => None,
        },
        "ATT" => {
            let axes = match raw.heading {
                Some(heading) => std::iter::once(heading)
                    .chain(raw.pitch)
                    .chain(raw.roll)
                    .collect(),
                None => Vec::new(),
            };
            Some(GpsdReport::Attitude { axes })
        }
        _ => None,
    }
}

/// Location and orientation from a gpsd daemon over its JSON socket
pub struct GpsdSource {
    address: String,
}

impl GpsdSource {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[async_trait]
impl SensorSource for GpsdSource {
    fn name(&self) -> &'static str {
        "gpsd"
    }

    async fn run(&mut self, bridge: SensorBridge) -> Result<(), SensorError> {
        let unavailable = |e: std::io::Error| SensorError::Unavailable {
            address: self.address.clone(),
            details: e.to_string(),
        };

        let mut stream = TcpStream::connect(&self.address)
            .await
            .map_err(unavailable)?;
        stream.write_all(WATCH_COMMAND).await.map_err(unavailable)?;
        info!("Connected to gpsd at {}", self.address);

        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => return Err(SensorError::StreamClosed),
                Ok(_) => {}
                Err(e) => {
                    return Err(SensorError::Read {
                        details: e.to_string(),
                    })
                }
            }

            // A garbled line is skipped like any other unparsable report.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\r', '\n']);

            match parse_report(line) {
                Some(GpsdReport::Location {
                    latitude,
                    longitude,
                }) => {
                    bridge.on_location(latitude, longitude);
                }
                Some(GpsdReport::Attitude { axes }) => bridge.on_orientation(&axes),
                None => debug!("Ignoring gpsd line: {}", line),
            }
        }
    }
}
