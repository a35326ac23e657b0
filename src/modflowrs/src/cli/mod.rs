// modflowrs/src/cli/mod.rs

pub mod array;
pub mod format;
pub mod options;
pub mod packages;

pub use array::{write_array, ArrayArgs};
pub use format::{describe_format, FormatArgs};
pub use options::{show_options, OptionsArgs};
pub use packages::list_packages;
