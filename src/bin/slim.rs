//! Command-line interface for slim templates
//!
//! Usage:
//!   slim render `<path>` [--values `<json>`] [--options `<json>`] [--ref-attr `<name>`] [--format `<format>`]
//!   slim check `<path>`
//!
//! `${name}` placeholders in the template are filled from the `--values` JSON
//! object. Formats: `html` (default), `ast-tag`, `bindings`.
#[path = "slim/logger.rs"]
mod logger;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::debug;
use serde_json::Map;

use slimtree::slim::dom::{Dom, NodeId};
use slimtree::slim::evaluation::EvaluateOptions;
use slimtree::slim::formats::{serialize_ast_tag, to_html};
use slimtree::slim::input::Source;
use slimtree::slim::value::Value;
use slimtree::{parse, Error};

const FORMATS: [&str; 3] = ["html", "ast-tag", "bindings"];

fn main() {
    let matches = Command::new("slim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and check slim templates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser and evaluator activity to stderr (-vv for trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Parse, evaluate and print a template")
                .arg(
                    Arg::new("path")
                        .help("Path to the template")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("values")
                        .long("values")
                        .help("JSON file with an object of placeholder values"),
                )
                .arg(
                    Arg::new("options")
                        .long("options")
                        .help("JSON file with evaluation options (e.g. {\"attrForRefName\": \"data-ref\"})"),
                )
                .arg(
                    Arg::new("ref-attr")
                        .long("ref-attr")
                        .help("Attribute that receives @name bindings; overrides --options"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(FORMATS)
                        .default_value("html"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a template and report syntax errors")
                .arg(
                    Arg::new("path")
                        .help("Path to the template")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    logger::init(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("render", render_matches)) => handle_render_command(render_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        _ => unreachable!(),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches) -> Result<String, String> {
    let path = required(matches, "path")?;
    let text = read_file(path)?;
    let values = match matches.get_one::<String>("values") {
        Some(values_path) => load_values(values_path)?,
        None => Map::new(),
    };
    let mut options = match matches.get_one::<String>("options") {
        Some(options_path) => {
            EvaluateOptions::from_json(&read_file(options_path)?).map_err(|e| e.to_string())?
        }
        None => EvaluateOptions::default(),
    };
    if let Some(name) = matches.get_one::<String>("ref-attr") {
        options = options.with_attr_for_ref_name(name.as_str());
    }
    let format = required(matches, "format")?;

    let source = Source::<Value<NodeId>>::with_placeholders(&text, |name| {
        values.get(name).cloned().map(Value::from)
    })
    .map_err(|e| Error::from(e).to_string())?;
    debug!(
        "{} segments, {} slots",
        source.segments().len(),
        source.slots().len()
    );

    let document = parse(source).map_err(|e| Error::from(e).to_string())?;
    if format == "ast-tag" {
        return Ok(format!("{}\n", serialize_ast_tag(&document)));
    }

    let mut dom = Dom::new();
    let evaluation = document
        .evaluate(&mut dom, &options)
        .map_err(|e| Error::from(e).to_string())?;

    let output = match format {
        "bindings" => evaluation
            .bindings()
            .into_iter()
            .map(|(name, node)| format!("{}\t{}\n", name, to_html(&dom, &[*node])))
            .collect::<String>(),
        _ => format!("{}\n", to_html(&dom, evaluation.nodes())),
    };
    Ok(output)
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> Result<String, String> {
    let path = required(matches, "path")?;
    let text = read_file(path)?;
    // Placeholders parse as opaque slots; only the structure is checked.
    let source = Source::<Value<NodeId>>::with_placeholders(&text, |_| Some(Value::Absent))
        .map_err(|e| Error::from(e).to_string())?;
    let document = parse(source).map_err(|e| Error::from(e).to_string())?;
    Ok(format!("{}: ok ({} top-level nodes)\n", path, document.children.len()))
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument: {}", name))
}

fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Error reading {}: {}", path, e))
}

fn load_values(path: &str) -> Result<Map<String, serde_json::Value>, String> {
    match serde_json::from_str(&read_file(path)?) {
        Ok(serde_json::Value::Object(values)) => Ok(values),
        Ok(_) => Err(format!("{}: values must be a JSON object", path)),
        Err(e) => Err(format!("{}: {}", path, e)),
    }
}
