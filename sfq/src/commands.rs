//! CLI command implementations.

use std::io::{self, Read};

use spectrum_filter::{
    id_to_name, name_to_id, parse_filter, CompareOp, Config, ModelSearch, SearchOptions, SpectrumAttribute,
};
use tracing::info;

/// Command-line overrides for `sfq search`.
pub struct SearchArgs {
    pub attrs: Vec<String>,
    pub devices_only: bool,
    pub throttle: Option<u32>,
    pub compact: bool,
}

/// Take the expression from the argument, or from stdin when absent or "-".
fn read_expression(arg: Option<&str>) -> spectrum_filter::Result<String> {
    match arg {
        Some(expr) if expr != "-" => Ok(expr.to_string()),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> spectrum_filter::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}

pub fn parse(expression: Option<&str>, compact: bool) -> spectrum_filter::Result<()> {
    let expression = read_expression(expression)?;
    let filter = parse_filter(&expression)?;
    print_json(&filter, compact)
}

pub fn search(expression: Option<&str>, args: &SearchArgs) -> spectrum_filter::Result<()> {
    let expression = read_expression(expression)?;
    let config = Config::load()?;
    info!(root = %config.root.display(), "using config");

    let mut options = SearchOptions::from_config(&config).with_attrs(args.attrs.iter().cloned());
    if args.devices_only {
        options.devices_only = true;
    }
    if let Some(throttle) = args.throttle {
        options.throttle_size = throttle;
    }

    let search = ModelSearch::from_expression(&expression, &options)?;
    print_json(&search, args.compact)
}

pub fn attrs(filter: Option<&str>) -> spectrum_filter::Result<()> {
    let needle = filter.map(str::to_lowercase);
    let matching: Vec<SpectrumAttribute> = SpectrumAttribute::ALL
        .into_iter()
        .filter(|attr| needle.as_deref().map_or(true, |n| attr.name().contains(n)))
        .collect();

    if matching.is_empty() {
        println!("No matching attributes.");
        return Ok(());
    }

    let width = matching.iter().map(|attr| attr.name().len()).max().unwrap_or(0);
    for attr in matching {
        println!("{:width$}  {}", attr.name(), attr.id(), width = width);
    }
    Ok(())
}

pub fn resolve(names: &[String]) -> spectrum_filter::Result<()> {
    let width = names.iter().map(String::len).max().unwrap_or(0);
    for name in names {
        let id = name_to_id(name)?;
        println!("{:width$}  {:<10}  {}", name, id.to_string(), id_to_name(id), width = width);
    }
    Ok(())
}

pub fn operators() -> spectrum_filter::Result<()> {
    for op in CompareOp::ALL {
        println!("{:<3} {}", op.symbol(), op.canonical_name());
    }
    Ok(())
}

pub fn init(force: bool) -> spectrum_filter::Result<()> {
    let config = Config::default_location()?;

    if config.exists() && !force {
        println!("Config already exists at {}", config.config_path().display());
        println!("Use --force to overwrite it with defaults");
        return Ok(());
    }

    config.save()?;
    println!("Config written to {}", config.config_path().display());
    println!("Throttle size: {}", config.throttle_size);
    println!("Default attributes: {}", config.default_attrs.join(", "));
    Ok(())
}

pub fn quick_help() -> spectrum_filter::Result<()> {
    print!("{}", QUICK_HELP);
    Ok(())
}

const QUICK_HELP: &str = r#"
SFQ QUICK REFERENCE
===================

COMMANDS                                      EXAMPLES
────────────────────────────────────────────────────────────────────────────────
parse (p)       Print filter tree as JSON     sfq p "model_name ~ FW"
search (s)      Print model search request    sfq s -a serial_number "condition = 0"
attrs (a)       List known attributes         sfq a model
resolve (r)     Name <-> ID lookup            sfq r model_name 0x1000a
operators (ops) List operators                sfq ops
init            Write default config          sfq init --force

CONDITIONS
────────────────────────────────────────────────────────────────────────────────
attr op value           model_name ~ 'FW'
attr: name or ID        device_type = 23000e      0x23000e = 23000e
value: quoted or bare   sys_desc = "Cisco IOS"    network_address ^= 10.1.

OPERATORS
────────────────────────────────────────────────────────────────────────────────
=   equals (ignore case)      !=  does not equal
~   contains                  !~  does not contain
=~  regex (PCRE)              ^=  starts with        =$  ends with
<   <=   >   >=               numeric comparison

GROUPS
────────────────────────────────────────────────────────────────────────────────
and(c1, c2, ...)    or(c1, c2, ...)    not(c1, ...)
and(model_name ~ FW, or(condition = 0, condition = 1))
"#;
