#[derive(Debug)]
pub enum SettingsError {
    NonPositive(String),
    RingRadiusOutOfRange(String),
    RingRadiiNotDescending(String),
    ImportFailed(String),
    Other(String),
}

impl From<&str> for SettingsError {
    fn from(error: &str) -> Self {
        SettingsError::Other(error.to_string())
    }
}
