// modflowrs-options/src/spec.rs

//! Option grammars, one per package type.
//!
//! A spec lists the recognized option names of a package in declaration
//! order together with the sub-values each option takes. Specs are always
//! passed explicitly to the codec; see [`crate::packages`] for the built-in
//! MODFLOW-NWT tables.

use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Declared type of an option sub-value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ValueKind {
    Integer,
    Real,
    Text,
}

/// A named positional sub-value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub name: String,
    pub kind: ValueKind,
}

impl ValueSpec {
    pub fn new<S: Into<String>>(name: S, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// How many sub-values follow an option keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arity {
    /// Keyword only
    Flag,
    /// Exactly these values, in order
    Fixed(Vec<ValueSpec>),
    /// One or more values of the same kind
    Variadic(ValueSpec),
}

impl Arity {
    pub fn is_flag(&self) -> bool {
        matches!(self, Arity::Flag)
    }

    /// Kind expected at sub-value position `index`.
    pub fn kind_at(&self, index: usize) -> Option<ValueKind> {
        match self {
            Arity::Flag => None,
            Arity::Fixed(values) => values.get(index).map(|v| v.kind),
            Arity::Variadic(value) => Some(value.kind),
        }
    }

    /// Check a sub-value count against the arity.
    pub fn accepts_count(&self, count: usize) -> bool {
        match self {
            Arity::Flag => count == 0,
            Arity::Fixed(values) => count == values.len(),
            Arity::Variadic(_) => count > 0,
        }
    }

    /// Human readable count, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Arity::Flag => "no values".to_string(),
            Arity::Fixed(values) if values.len() == 1 => "1 value".to_string(),
            Arity::Fixed(values) => format!("{} values", values.len()),
            Arity::Variadic(_) => "at least 1 value".to_string(),
        }
    }
}

/// One recognized option of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OptionSpecDef", into = "OptionSpecDef")]
pub struct OptionSpec {
    name: String,
    arity: Arity,
}

impl OptionSpec {
    pub fn new<S: AsRef<str>>(name: S, arity: Arity) -> Self {
        // A fixed list with no values is a flag
        let arity = match arity {
            Arity::Fixed(values) if values.is_empty() => Arity::Flag,
            other => other,
        };
        Self {
            name: name.as_ref().trim().to_lowercase(),
            arity,
        }
    }

    /// Canonical (lower-case) option name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> &Arity {
        &self.arity
    }

    /// Case-insensitive comparison against an option token.
    pub fn matches(&self, token: &str) -> bool {
        self.name.eq_ignore_ascii_case(token)
    }
}

#[derive(Serialize, Deserialize)]
struct OptionSpecDef {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    values: Vec<ValueSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variadic: Option<ValueSpec>,
}

impl TryFrom<OptionSpecDef> for OptionSpec {
    type Error = SpecError;

    fn try_from(def: OptionSpecDef) -> Result<Self, Self::Error> {
        let arity = match (def.values.is_empty(), def.variadic) {
            (true, None) => Arity::Flag,
            (false, None) => Arity::Fixed(def.values),
            (true, Some(value)) => Arity::Variadic(value),
            (false, Some(_)) => return Err(SpecError::ConflictingArity { name: def.name }),
        };
        Ok(OptionSpec::new(def.name, arity))
    }
}

impl From<OptionSpec> for OptionSpecDef {
    fn from(spec: OptionSpec) -> Self {
        let (values, variadic) = match spec.arity {
            Arity::Flag => (Vec::new(), None),
            Arity::Fixed(values) => (values, None),
            Arity::Variadic(value) => (Vec::new(), Some(value)),
        };
        OptionSpecDef {
            name: spec.name,
            values,
            variadic,
        }
    }
}

/// The ordered option grammar of one package type.
///
/// Declaration order drives rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OptionsSpecDef", into = "OptionsSpecDef")]
pub struct OptionsSpec {
    package: String,
    options: Vec<OptionSpec>,
}

impl OptionsSpec {
    /// Start building a spec for `package`.
    pub fn builder<S: Into<String>>(package: S) -> OptionsSpecBuilder {
        OptionsSpecBuilder {
            package: package.into(),
            options: Vec::new(),
        }
    }

    /// Build a spec from already validated parts.
    pub(crate) fn from_parts_unchecked(package: String, options: Vec<OptionSpec>) -> Self {
        Self { package, options }
    }

    fn validated(package: String, options: Vec<OptionSpec>) -> Result<Self, SpecError> {
        for (i, option) in options.iter().enumerate() {
            if option.name.is_empty() {
                return Err(SpecError::EmptyName { package });
            }
            if options[..i].iter().any(|other| other.name == option.name) {
                return Err(SpecError::DuplicateName {
                    package,
                    name: option.name.clone(),
                });
            }
        }
        Ok(Self { package, options })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Declaration index of an option token, matched case-insensitively.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.options.iter().position(|option| option.matches(token))
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.position(name).map(|index| &self.options[index])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(OptionSpec::name)
    }
}

/// Incremental builder for [`OptionsSpec`].
#[derive(Debug, Clone)]
pub struct OptionsSpecBuilder {
    package: String,
    options: Vec<OptionSpec>,
}

impl OptionsSpecBuilder {
    pub fn flag(&mut self, name: &str) -> &mut Self {
        self.options.push(OptionSpec::new(name, Arity::Flag));
        self
    }

    pub fn fixed(&mut self, name: &str, values: &[(&str, ValueKind)]) -> &mut Self {
        let values = values
            .iter()
            .map(|(value_name, kind)| ValueSpec::new(*value_name, *kind))
            .collect();
        self.options.push(OptionSpec::new(name, Arity::Fixed(values)));
        self
    }

    pub fn variadic(&mut self, name: &str, value_name: &str, kind: ValueKind) -> &mut Self {
        self.options.push(OptionSpec::new(
            name,
            Arity::Variadic(ValueSpec::new(value_name, kind)),
        ));
        self
    }

    pub fn option(&mut self, option: OptionSpec) -> &mut Self {
        self.options.push(option);
        self
    }

    pub fn build(&self) -> Result<OptionsSpec, SpecError> {
        OptionsSpec::validated(self.package.clone(), self.options.clone())
    }
}

#[derive(Serialize, Deserialize)]
struct OptionsSpecDef {
    package: String,
    options: Vec<OptionSpec>,
}

impl TryFrom<OptionsSpecDef> for OptionsSpec {
    type Error = SpecError;

    fn try_from(def: OptionsSpecDef) -> Result<Self, Self::Error> {
        OptionsSpec::validated(def.package, def.options)
    }
}

impl From<OptionsSpec> for OptionsSpecDef {
    fn from(spec: OptionsSpec) -> Self {
        OptionsSpecDef {
            package: spec.package,
            options: spec.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wel_like() -> OptionsSpec {
        OptionsSpec::builder("WEL")
            .variadic("auxiliary", "auxname", ValueKind::Text)
            .flag("noprint")
            .fixed(
                "specify",
                &[("phiramp", ValueKind::Real), ("iunitramp", ValueKind::Integer)],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_position_is_case_insensitive() {
        let spec = wel_like();
        assert_eq!(spec.position("SPECIFY"), Some(2));
        assert_eq!(spec.position("NoPrint"), Some(1));
        assert_eq!(spec.position("tabfiles"), None);
        assert_eq!(spec.names().collect::<Vec<_>>(), ["auxiliary", "noprint", "specify"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = OptionsSpec::builder("UZF")
            .flag("nosurfleak")
            .flag("NOSURFLEAK")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SpecError::DuplicateName {
                package: "UZF".to_string(),
                name: "nosurfleak".to_string()
            }
        );
    }

    #[test]
    fn test_empty_fixed_is_flag() {
        let option = OptionSpec::new("savefinf", Arity::Fixed(Vec::new()));
        assert!(option.arity().is_flag());
    }

    #[test]
    fn test_arity_counts() {
        let spec = wel_like();
        let specify = spec.get("specify").unwrap().arity();
        assert!(specify.accepts_count(2));
        assert!(!specify.accepts_count(1));
        assert_eq!(specify.kind_at(1), Some(ValueKind::Integer));
        assert_eq!(specify.describe(), "2 values");

        let aux = spec.get("auxiliary").unwrap().arity();
        assert!(!aux.accepts_count(0));
        assert!(aux.accepts_count(3));
        assert_eq!(aux.kind_at(5), Some(ValueKind::Text));
    }

    #[test]
    fn test_spec_serde_roundtrip() {
        let spec = wel_like();
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"variadic\""));
        let back: OptionsSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_spec_deserialize_rejects_conflicts() {
        let json = r#"{"package": "X", "options": [
            {"name": "a", "values": [{"name": "v", "kind": "real"}],
             "variadic": {"name": "w", "kind": "text"}}]}"#;
        assert!(serde_json::from_str::<OptionsSpec>(json).is_err());

        let json = r#"{"package": "X", "options": [{"name": "a"}, {"name": "A"}]}"#;
        assert!(serde_json::from_str::<OptionsSpec>(json).is_err());
    }
}
