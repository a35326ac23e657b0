// modflowrs-options/tests/nwt_packages.rs

//! Reading and rewriting option blocks at the top of NWT package files.

use modflowrs_options::{
    packages, split_options, OptionBlock, OptionsSpec, ParseMode, RepresentationMode, ValueKind,
};

const UZF_FILE: &str = "\
# UZF1 package written by a model builder
OPTIONS
SPECIFYTHTR
ETSQUARE 0.2
NETFLUX 40 41
END
 3 1 0 0 1 0 0 0
";

const SFR_FILE: &str = "\
REACHINPUT TRANSROUTE TABFILES 2 100 STRHC1KH 1.5
    36    4    0    0 86400.0 0.0001 -1 0
";

#[test]
fn test_uzf_file_rewritten_as_line() {
    let spec = packages::uzf();
    let (block, rest) = split_options(UZF_FILE, &spec, ParseMode::Strict).unwrap();
    let mut block = block.unwrap();

    assert!(block.is_block());
    assert_eq!(block.values_as::<(i64, i64)>("netflux").unwrap(), Some((40, 41)));
    assert!(rest.starts_with(" 3 1 0 0"));

    block.set_mode(RepresentationMode::Line);
    let mut rewritten = Vec::new();
    block.write_to(&mut rewritten).unwrap();
    let rewritten = String::from_utf8(rewritten).unwrap() + rest;
    assert_eq!(
        rewritten,
        "SPECIFYTHTR ETSQUARE 0.2 NETFLUX 40 41\n 3 1 0 0 1 0 0 0\n"
    );

    let (again, _) = split_options(&rewritten, &spec, ParseMode::Strict).unwrap();
    let mut again = again.unwrap();
    again.set_mode(RepresentationMode::Block);
    block.set_mode(RepresentationMode::Block);
    assert_eq!(again, block);
}

#[test]
fn test_sfr_option_line() {
    let spec = packages::sfr();
    let (block, rest) = split_options(SFR_FILE, &spec, ParseMode::Strict).unwrap();
    let block = block.unwrap();

    assert_eq!(block.mode(), RepresentationMode::Line);
    assert!(block.flag("reachinput").unwrap());
    assert_eq!(block.value::<f64>("strhc1kh").unwrap(), Some(1.5));
    assert_eq!(block.value::<f64>("strhc1kv").unwrap(), None);
    assert_eq!(
        block.render_as(RepresentationMode::Block),
        "OPTIONS\nREACHINPUT\nTRANSROUTE\nTABFILES 2 100\nSTRHC1KH 1.5\nEND"
    );
    assert!(rest.trim_start().starts_with("36"));
}

#[test]
fn test_newer_solver_option_survives_tolerant_roundtrip() {
    let spec = packages::ag();
    let text = "OPTIONS\nNOPRINT\nIRRIGATION_WELL 4 2\nSOMEFUTUREOPTION 1 2 3\nEND";

    assert!(OptionBlock::parse(text, &spec).is_err());

    let block = OptionBlock::parse_with(text, &spec, ParseMode::Tolerant).unwrap();
    assert_eq!(block.render(), text);
    assert_eq!(OptionBlock::parse_with(&block.render(), &spec, ParseMode::Tolerant).unwrap(), block);
}

#[test]
fn test_custom_spec_from_json() {
    let json = r#"{
        "package": "LAK",
        "options": [
            {"name": "tableinput"},
            {"name": "theta", "values": [{"name": "theta", "kind": "real"}]}
        ]
    }"#;
    let spec: OptionsSpec = serde_json::from_str(json).unwrap();
    assert_eq!(
        spec.get("theta").unwrap().arity().kind_at(0),
        Some(ValueKind::Real)
    );

    let block = OptionBlock::parse("THETA 0.5 TABLEINPUT", &spec).unwrap();
    assert_eq!(block.render(), "TABLEINPUT THETA 0.5");
}
