use crate::error::TouchError;

pub trait TouchErrorExt {
    fn is_recoverable(&self) -> bool;
    fn user_message(&self) -> String;
}

impl TouchErrorExt for TouchError {
    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TouchError::DeviceOpen { .. }
                | TouchError::DeviceRead { .. }
                | TouchError::DeviceNotFound(_)
        )
    }

    fn user_message(&self) -> String {
        match self {
            TouchError::DeviceOpen { device, details } => {
                format!("Touch device {} could not be opened: {}", device, details)
            }
            TouchError::DeviceRead { details } => format!("Touch device read error: {}", details),
            TouchError::DeviceNotFound(device) => format!("Touch device not found: {}", device),
            TouchError::PermissionDenied(device) => {
                format!("Permission denied for touch device: {} (is the user in the input group?)", device)
            }
            TouchError::UnsupportedDevice(device) => {
                format!("Unsupported touch device: {}", device)
            }
        }
    }
}

/// Classify a failure to open an input device
pub fn open_error(device_path: &str, error: &std::io::Error) -> TouchError {
    match error.kind() {
        std::io::ErrorKind::NotFound => TouchError::DeviceNotFound(device_path.to_string()),
        std::io::ErrorKind::PermissionDenied => {
            TouchError::PermissionDenied(device_path.to_string())
        }
        _ => TouchError::DeviceOpen {
            device: device_path.to_string(),
            details: error.to_string(),
        },
    }
}
