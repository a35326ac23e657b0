// modflowrs/src/constants.rs

pub const DEFAULT_CONFIG_NAME: &str = "modflowrs.yml";
