//! eqcost - equipment cost formulas from the command line

mod default_functions;
mod error;
mod logging;

use anyhow::Context;
use eqcost_core::Armory;
use eqcost_engine::TermFactory;

use std::env;
use std::path::PathBuf;

use crate::error::CliError;

fn print_usage() {
    eprintln!("Usage: eqcost [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Armory file to load (.toml)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i, --item <NAME>         Item to evaluate against");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula for the item and print the result");
    eprintln!("      --secondary           Evaluate against the secondary head");
    eprintln!("      --plus                Print HEADPLUSTOTAL for the item");
    eprintln!("      --costs               Print the cost of every item (default)");
    eprintln!("      --terms               List the available terms");
    eprintln!("  -f, --functions <FILE>    Load custom Rhai functions (can be repeated)");
    eprintln!("      --no-default-functions");
    eprintln!("                            Do not load default.rhai from the config dir");
    eprintln!("  -v, --verbose             More logging (repeat for more)");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    file: Option<PathBuf>,
    item: Option<String>,
    formula: Option<String>,
    secondary: bool,
    plus: bool,
    costs: bool,
    terms: bool,
    functions: Vec<PathBuf>,
    no_default_functions: bool,
    verbosity: u8,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => opts.help = true,
            "-i" | "--item" => {
                i += 1;
                let value = args.get(i).ok_or(CliError::MissingValue("--item".into()))?;
                opts.item = Some(value.clone());
            }
            "-c" | "--command" => {
                i += 1;
                let value = args.get(i).ok_or(CliError::MissingValue("--command".into()))?;
                opts.formula = Some(value.clone());
            }
            "-f" | "--functions" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or(CliError::MissingValue("--functions".into()))?;
                opts.functions.push(PathBuf::from(value));
            }
            "--secondary" => opts.secondary = true,
            "--plus" => opts.plus = true,
            "--costs" => opts.costs = true,
            "--terms" => opts.terms = true,
            "--no-default-functions" => opts.no_default_functions = true,
            "-v" | "--verbose" => opts.verbosity = opts.verbosity.saturating_add(1),
            "-vv" => opts.verbosity = opts.verbosity.saturating_add(2),
            arg if arg.starts_with('-') => return Err(CliError::UnknownOption(arg.to_string())),
            arg => {
                if opts.file.is_some() {
                    return Err(CliError::UnexpectedArgument(arg.to_string()));
                }
                opts.file = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    if opts.formula.is_some() && opts.item.is_none() {
        return Err(CliError::MissingItem("--command".into()));
    }
    if opts.plus && opts.item.is_none() {
        return Err(CliError::MissingItem("--plus".into()));
    }
    Ok(opts)
}

fn print_terms(factory: &TermFactory) {
    for (token, description) in factory.terms() {
        println!("{:<16}{}", token, description);
    }
}

/// Runs the requested actions and returns the process exit code.
fn run(mut opts: Options) -> anyhow::Result<i32> {
    if opts.terms {
        print_terms(&TermFactory::new());
        if opts.file.is_none() {
            return Ok(0);
        }
    }

    let path = opts.file.take().ok_or(CliError::MissingFile)?;
    let mut armory =
        Armory::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;

    default_functions::prepend_default_functions_if_present(
        &mut opts.functions,
        opts.no_default_functions,
    );
    armory
        .load_custom_functions(&opts.functions)
        .context("Failed to load custom functions")?;

    let primary = !opts.secondary;
    let mut did_something = opts.terms;

    if opts.plus {
        let item = opts.item.as_deref().unwrap_or_default();
        let (text, _) = armory.head_plus(item, primary)?;
        println!("{}", text);
        did_something = true;
    }

    if let Some(formula) = opts.formula.as_deref() {
        let item = opts.item.as_deref().unwrap_or_default();
        match armory.evaluate(item, formula, primary) {
            Ok(value) => println!("{}", format_number(value)),
            Err(e) => {
                println!("#ERR: {}", e);
                return Ok(1);
            }
        }
        did_something = true;
    }

    if opts.costs || !did_something {
        for (name, cost) in armory.costs()? {
            println!("{}: {}", name, format_number(cost));
        }
    }

    Ok(0)
}

/// Whole numbers print without a fractional part.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };
    if opts.help {
        print_usage();
        return;
    }

    logging::init(opts.verbosity);

    match run(opts) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
