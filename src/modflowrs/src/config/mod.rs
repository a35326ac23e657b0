// modflowrs/src/config/mod.rs

pub mod array;
pub mod tool;

pub use array::ArrayConfig;
pub use tool::ToolConfig;
