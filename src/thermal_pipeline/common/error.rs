use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThermalError {
    #[error("thermal camera {vid:04x}:{pid:04x} not found on any video4linux node")]
    DeviceNotFound { vid: u16, pid: u16 },

    #[error("failed to read frame: {0}")]
    ReadFailed(String),

    #[error("USB reset failed: {0}")]
    ResetFailed(String),

    #[error("device did not recover after {0} reset attempts")]
    Unrecoverable(u32),

    #[error("failed to write snapshot: {0}")]
    SnapshotWrite(String),

    #[error("failed to encode snapshot: {0}")]
    EncodeError(String),

    #[error("display error: {0}")]
    DisplayError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ThermalError>;
