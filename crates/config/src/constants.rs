//! Environment variable names and built-in defaults

pub const ENV_DOMAIN_URL: &str = "ITPAM_DOMAIN_URL";
pub const ENV_USERNAME: &str = "ITPAM_USERNAME";
pub const ENV_PASSWORD: &str = "ITPAM_PASSWORD";
pub const ENV_OUTPUT: &str = "ITPAM_OUTPUT";
pub const ENV_POLLING_SECONDS: &str = "ITPAM_POLLING_SECONDS";
pub const ENV_TIMEOUT_SECONDS: &str = "ITPAM_TIMEOUT_SECONDS";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_POLLING_SECONDS: u64 = 30;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 600;
