// modflowrs/src/cli/packages.rs

use crate::config::ToolConfig;
use modflowrs_options::{Arity, OptionSpec};

fn describe_option(option: &OptionSpec) -> String {
    let keyword = option.name().to_uppercase();
    match option.arity() {
        Arity::Flag => keyword,
        Arity::Fixed(values) => {
            let values: Vec<String> = values
                .iter()
                .map(|value| format!("<{}:{}>", value.name, value.kind))
                .collect();
            format!("{} {}", keyword, values.join(" "))
        }
        Arity::Variadic(value) => format!("{} <{}:{}>...", keyword, value.name, value.kind),
    }
}

/// List every package grammar the tool knows, one option per line.
pub fn list_packages(config: &ToolConfig) -> String {
    let mut out = String::new();
    for spec in config.all_packages() {
        out.push_str(&format!("{} ({} options)\n", spec.package(), spec.len()));
        for option in spec.options() {
            out.push_str(&format!("    {}\n", describe_option(option)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_builtin_packages() {
        let listing = list_packages(&ToolConfig::default());
        assert!(listing.starts_with("UZF (10 options)\n    SPECIFYTHTR\n"));
        assert!(listing.contains("    ETSQUARE <smoothfact:real>\n"));
        assert!(listing.contains("WEL (4 options)\n    AUXILIARY <auxname:text>...\n"));
        assert!(listing.contains("    SPECIFY <phiramp:real> <iunitramp:integer>\n"));
    }
}
