// modflowrs-options/src/packages.rs

//! Option grammars of the MODFLOW-NWT packages that carry option blocks.

use crate::spec::{Arity, OptionSpec, OptionsSpec, ValueKind, ValueSpec};

use ValueKind::{Integer, Real, Text};

enum Entry {
    Flag(&'static str),
    Fixed(&'static str, &'static [(&'static str, ValueKind)]),
    Variadic(&'static str, &'static str, ValueKind),
}

use Entry::{Fixed, Flag, Variadic};

const UZF: &[Entry] = &[
    Flag("specifythtr"),
    Flag("specifythti"),
    Flag("nosurfleak"),
    Flag("specifysurfk"),
    Flag("rejectsurfk"),
    Flag("seepsurfk"),
    Flag("capillaryuzet"),
    Fixed("etsquare", &[("smoothfact", Real)]),
    Fixed("netflux", &[("unitrech", Integer), ("unitdis", Integer)]),
    Flag("savefinf"),
];

const SFR: &[Entry] = &[
    Flag("reachinput"),
    Flag("transroute"),
    Fixed("tabfiles", &[("numtab", Integer), ("maxval", Integer)]),
    Fixed("lossfactor", &[("factor", Real)]),
    Fixed("strhc1kh", &[("factorkh", Real)]),
    Fixed("strhc1kv", &[("factorkv", Real)]),
];

const WEL: &[Entry] = &[
    Variadic("auxiliary", "auxname", Text),
    Flag("noprint"),
    Fixed("specify", &[("phiramp", Real), ("iunitramp", Integer)]),
    Fixed("tabfiles", &[("numtab", Integer), ("maxval", Integer)]),
];

const AG: &[Entry] = &[
    Flag("noprint"),
    Fixed(
        "irrigation_diversion",
        &[("numirrdiversions", Integer), ("maxcellsdiversion", Integer)],
    ),
    Fixed(
        "irrigation_well",
        &[("numirrwells", Integer), ("maxcellswell", Integer)],
    ),
    Fixed(
        "supplemental_well",
        &[("numsupwells", Integer), ("maxdiversions", Integer)],
    ),
    Fixed("maxwells", &[("nummaxwell", Integer)]),
    Fixed("tabfiles", &[("numtab", Integer), ("maxval", Integer)]),
    Fixed("phiramp", &[("phirampval", Real)]),
    Flag("etdemand"),
    Flag("trigger"),
    Flag("timeseries_diversion"),
    Flag("timeseries_well"),
    Flag("timeseries_diversionet"),
    Flag("timeseries_wellet"),
    Fixed("diversionlist", &[("unit_diversionlist", Integer)]),
    Fixed("welllist", &[("unit_welllist", Integer)]),
    Fixed("wellirrlist", &[("unit_wellirrlist", Integer)]),
    Fixed("diversionirrlist", &[("unit_diversionirrlist", Integer)]),
    Fixed("wellcbc", &[("unitcbc", Integer)]),
];

/// Names of the built-in package grammars.
pub const PACKAGE_NAMES: &[&str] = &["UZF", "SFR", "WEL", "AG"];

fn build(package: &str, entries: &[Entry]) -> OptionsSpec {
    let options = entries
        .iter()
        .map(|entry| match entry {
            Flag(name) => OptionSpec::new(name, Arity::Flag),
            Fixed(name, values) => OptionSpec::new(
                name,
                Arity::Fixed(
                    values
                        .iter()
                        .map(|(value_name, kind)| ValueSpec::new(*value_name, *kind))
                        .collect(),
                ),
            ),
            Variadic(name, value_name, kind) => {
                OptionSpec::new(name, Arity::Variadic(ValueSpec::new(*value_name, *kind)))
            }
        })
        .collect();
    OptionsSpec::from_parts_unchecked(package.to_string(), options)
}

/// Unsaturated-Zone Flow (UZF1).
pub fn uzf() -> OptionsSpec {
    build("UZF", UZF)
}

/// Streamflow-Routing (SFR2).
pub fn sfr() -> OptionsSpec {
    build("SFR", SFR)
}

/// Well (WEL).
pub fn wel() -> OptionsSpec {
    build("WEL", WEL)
}

/// Agricultural water use (AG).
pub fn ag() -> OptionsSpec {
    build("AG", AG)
}

/// Look up a built-in grammar by package name, case-insensitively.
///
/// Versioned file-type names (`UZF1`, `SFR2`) are accepted too.
pub fn lookup(package: &str) -> Option<OptionsSpec> {
    match package.trim().to_uppercase().as_str() {
        "UZF" | "UZF1" => Some(uzf()),
        "SFR" | "SFR2" => Some(sfr()),
        "WEL" => Some(wel()),
        "AG" => Some(ag()),
        _ => None,
    }
}

/// All built-in grammars.
pub fn builtin() -> Vec<OptionsSpec> {
    vec![uzf(), sfr(), wel(), ag()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_specs_are_valid() {
        for spec in builtin() {
            let mut builder = OptionsSpec::builder(spec.package());
            for option in spec.options() {
                builder.option(option.clone());
            }
            assert_eq!(builder.build().unwrap(), spec);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("uzf1").unwrap().package(), "UZF");
        assert_eq!(lookup(" Sfr2 ").unwrap().package(), "SFR");
        assert!(lookup("lak").is_none());
        for name in PACKAGE_NAMES {
            assert!(lookup(name).is_some());
        }
    }

    #[test]
    fn test_declaration_order() {
        let spec = wel();
        let names: Vec<&str> = spec.names().collect();
        assert_eq!(names, ["auxiliary", "noprint", "specify", "tabfiles"]);
    }
}
