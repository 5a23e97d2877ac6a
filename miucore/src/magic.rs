/// Name of the environment variable containing the path to the configuration file.
/// If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/miu/config.toml` or `$HOME/.config/miu/config.toml`
///  (2) on Windows: `%APPDATA%\miu\config.toml`
pub const ENV_CONFIG_PATH: &str = "MIU_CONFIG_PATH";

/// Default ceiling on the number of rule applications explored from the axiom.
pub const DEFAULT_MAX_STEPS: usize = 32;

/// Default ceiling on the length of any string kept by the search.
///
/// At 18 symbols every derivable string of length 8 or less is reachable.
pub const DEFAULT_MAX_LENGTH: usize = 18;
