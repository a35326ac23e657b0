// modflowrs-options/src/lib.rs

//! Option blocks for MODFLOW-NWT package files.
//!
//! Packages such as UZF, SFR, WEL and AG take optional keywords either as a
//! multi-line block
//!
//! ```text
//! OPTIONS
//! NOSURFLEAK
//! ETSQUARE 0.2
//! END
//! ```
//!
//! or as a single option line (`NOSURFLEAK ETSQUARE 0.2`). This crate parses
//! both forms against a package's option grammar ([`OptionsSpec`]), gives
//! typed access to the options, and renders them back in either form.
//!
//! # Examples
//!
//! ```
//! use modflowrs_options::{packages, OptionBlock, RepresentationMode};
//!
//! # fn main() -> Result<(), modflowrs_options::OptionBlockError> {
//! let spec = packages::wel();
//! let mut options = OptionBlock::from_line("specify 0.1 20", &spec, true)?;
//! assert_eq!(options.render(), "OPTIONS\nSPECIFY 0.1 20\nEND");
//!
//! options.set_flag("noprint", true)?;
//! options.set_mode(RepresentationMode::Line);
//! assert_eq!(options.render(), "NOPRINT SPECIFY 0.1 20");
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod error;
pub mod packages;
pub mod spec;
pub mod value;

pub use block::{split_options, OptionBlock, OptionState, ParseMode, RepresentationMode};
pub use error::{OptionBlockError, Result, SpecError};
pub use spec::{Arity, OptionSpec, OptionsSpec, OptionsSpecBuilder, ValueKind, ValueSpec};
pub use value::{FromOptionValue, FromOptionValues, OptionValue};
