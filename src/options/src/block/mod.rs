// modflowrs-options/src/block/mod.rs

//! The option block: a typed, spec-validated view of a package's options.
//!
//! Every option of the spec owns a slot. A slot is either enabled or
//! disabled and keeps the last sub-values it was given, so a disabled option
//! can be switched back on without restating them.

mod parse;
mod render;


pub use parse::split_options;

use crate::error::{OptionBlockError, Result};
use crate::spec::{Arity, OptionsSpec, ValueKind};
use crate::value::{FromOptionValue, FromOptionValues, OptionValue};
use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Textual form of an option block.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RepresentationMode {
    /// `OPTIONS`, one option per line, `END`
    #[default]
    Block,
    /// All options on a single line
    Line,
}

/// How parsing treats entries that are not in the spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Unknown options and stray tokens are errors
    #[default]
    Strict,
    /// Unknown entries are kept verbatim, stray tokens dropped
    Tolerant,
}

/// Current setting of an option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionState<'a> {
    Disabled,
    /// Enabled keyword-only option
    Flag,
    /// Enabled option with its sub-values
    Values(&'a [OptionValue]),
}

impl OptionState<'_> {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, OptionState::Disabled)
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    enabled: bool,
    values: Vec<OptionValue>,
}

/// Options of one package, bound to the package's spec.
#[derive(Debug, Clone)]
pub struct OptionBlock {
    spec: OptionsSpec,
    slots: Vec<Slot>,
    mode: RepresentationMode,
    unrecognized: Vec<String>,
}

/// A variadic list ends at the next option keyword, so its text values
/// cannot be option names.
fn reject_keywords(spec: &OptionsSpec, index: usize, values: &[OptionValue]) -> Result<()> {
    let option = &spec.options()[index];
    if !matches!(option.arity(), Arity::Variadic(_)) {
        return Ok(());
    }
    for value in values {
        if let Some(text) = value.as_text() {
            if spec.position(text).is_some() {
                return Err(OptionBlockError::type_mismatch(
                    option.name().to_string(),
                    text.to_string(),
                    ValueKind::Text,
                ));
            }
        }
    }
    Ok(())
}

impl OptionBlock {
    /// An empty block: every option disabled.
    pub fn new(spec: OptionsSpec, mode: RepresentationMode) -> Self {
        let slots = vec![Slot::default(); spec.len()];
        Self {
            spec,
            slots,
            mode,
            unrecognized: Vec::new(),
        }
    }

    pub fn spec(&self) -> &OptionsSpec {
        &self.spec
    }

    pub fn package(&self) -> &str {
        self.spec.package()
    }

    pub fn mode(&self) -> RepresentationMode {
        self.mode
    }

    /// Switch between block and line form. Options are untouched.
    pub fn set_mode(&mut self, mode: RepresentationMode) {
        self.mode = mode;
    }

    pub fn is_block(&self) -> bool {
        self.mode == RepresentationMode::Block
    }

    /// Entries kept verbatim by a tolerant parse.
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.spec
            .position(name)
            .ok_or_else(|| OptionBlockError::unknown_option(self.spec.package(), name))
    }

    pub fn get(&self, name: &str) -> Result<OptionState<'_>> {
        let index = self.index_of(name)?;
        let slot = &self.slots[index];
        Ok(match (slot.enabled, self.spec.options()[index].arity()) {
            (false, _) => OptionState::Disabled,
            (true, Arity::Flag) => OptionState::Flag,
            (true, _) => OptionState::Values(&slot.values),
        })
    }

    pub fn is_enabled(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_enabled())
    }

    /// Sub-values of an enabled option; `None` when disabled.
    pub fn values(&self, name: &str) -> Result<Option<&[OptionValue]>> {
        Ok(match self.get(name)? {
            OptionState::Disabled => None,
            OptionState::Flag => Some(&[] as &[OptionValue]),
            OptionState::Values(values) => Some(values),
        })
    }

    /// Boolean view of any option: enabled or not.
    pub fn flag(&self, name: &str) -> Result<bool> {
        self.is_enabled(name)
    }

    /// First sub-value of an enabled option as `T`.
    pub fn value<T: FromOptionValue>(&self, name: &str) -> Result<Option<T>> {
        let Some(values) = self.values(name)? else {
            return Ok(None);
        };
        match values.first() {
            None => Ok(None),
            Some(value) => T::from_option_value(value).map(Some).ok_or_else(|| {
                OptionBlockError::type_mismatch(name.to_string(), value.to_string(), T::KIND)
            }),
        }
    }

    /// All sub-values of an enabled option as `T`, e.g. `(f64, i64)` or
    /// `Vec<String>`.
    pub fn values_as<T: FromOptionValues>(&self, name: &str) -> Result<Option<T>> {
        let Some(values) = self.values(name)? else {
            return Ok(None);
        };
        T::from_option_values(values)
            .map(Some)
            .ok_or_else(|| OptionBlockError::Arity {
                option: name.to_lowercase(),
                expected: std::any::type_name::<T>().to_string(),
                found: values.len(),
            })
    }

    /// Switch an option on or off.
    ///
    /// Turning a valued option on restores its cached values.
    pub fn set_flag(&mut self, name: &str, enabled: bool) -> Result<()> {
        if enabled {
            self.enable(name)
        } else {
            self.disable(name)
        }
    }

    /// Enable an option with new sub-values, checked against the spec.
    pub fn set_values<I, V>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<OptionValue>,
    {
        let index = self.index_of(name)?;
        let option = &self.spec.options()[index];
        let values: Vec<OptionValue> = values.into_iter().map(Into::into).collect();
        if !option.arity().accepts_count(values.len()) {
            return Err(OptionBlockError::Arity {
                option: option.name().to_string(),
                expected: option.arity().describe(),
                found: values.len(),
            });
        }
        let values = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let kind = option.arity().kind_at(i).ok_or_else(|| OptionBlockError::Arity {
                    option: option.name().to_string(),
                    expected: option.arity().describe(),
                    found: i + 1,
                })?;
                value.conform(option.name(), kind)
            })
            .collect::<Result<Vec<_>>>()?;
        reject_keywords(&self.spec, index, &values)?;
        debug!("{}: set {} = {:?}", self.spec.package(), option.name(), values);
        let slot = &mut self.slots[index];
        slot.enabled = true;
        slot.values = values;
        Ok(())
    }

    /// Enable an option from its textual sub-values, e.g. `"0.1 20"`.
    pub fn set_str(&mut self, name: &str, text: &str) -> Result<()> {
        let index = self.index_of(name)?;
        let option = &self.spec.options()[index];
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if !option.arity().accepts_count(tokens.len()) {
            return Err(OptionBlockError::Arity {
                option: option.name().to_string(),
                expected: option.arity().describe(),
                found: tokens.len(),
            });
        }
        let mut values = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if let Some(kind) = option.arity().kind_at(i) {
                values.push(OptionValue::from_token(option.name(), token, kind)?);
            }
        }
        reject_keywords(&self.spec, index, &values)?;
        let slot = &mut self.slots[index];
        slot.enabled = true;
        slot.values = values;
        Ok(())
    }

    /// Enable an option, reusing cached sub-values.
    pub fn enable(&mut self, name: &str) -> Result<()> {
        let index = self.index_of(name)?;
        let option = &self.spec.options()[index];
        let slot = &mut self.slots[index];
        if !option.arity().accepts_count(slot.values.len()) {
            return Err(OptionBlockError::MissingValues {
                option: option.name().to_string(),
            });
        }
        slot.enabled = true;
        Ok(())
    }

    /// Disable an option. Its sub-values stay cached.
    pub fn disable(&mut self, name: &str) -> Result<()> {
        let index = self.index_of(name)?;
        self.slots[index].enabled = false;
        Ok(())
    }

    /// Enabled options in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &[OptionValue])> {
        self.spec
            .options()
            .iter()
            .zip(&self.slots)
            .filter(|(_, slot)| slot.enabled)
            .map(|(option, slot)| (option.name(), slot.values.as_slice()))
    }

    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.enabled).count()
    }

    /// True when nothing would be rendered between `OPTIONS` and `END`.
    pub fn is_empty(&self) -> bool {
        self.enabled_count() == 0 && self.unrecognized.is_empty()
    }
}

impl PartialEq for OptionBlock {
    fn eq(&self, other: &Self) -> bool {
        self.spec.package() == other.spec.package()
            && self.mode == other.mode
            && self.unrecognized == other.unrecognized
            && self.enabled().eq(other.enabled())
    }
}
