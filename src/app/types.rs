/// Component lifecycle states
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Failed,
}

/// Why the render loop ended
#[derive(Debug, Clone, PartialEq)]
pub enum ShutdownReason {
    /// A quit event from the keyboard, a signal or another producer
    Requested(String),
    Error(String),
}

impl ShutdownReason {
    pub fn exit_code(&self) -> i32 {
        match self {
            ShutdownReason::Requested(_) => 0,
            ShutdownReason::Error(_) => 1,
        }
    }
}
