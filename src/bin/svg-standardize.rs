use std::fs;

use anyhow::{anyhow, bail, Context, Result};
use svg_font_tools::{models::config::StandardizeConfig, StandardizerSession};

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    out: Option<String>,
    config: Option<String>,
    sizes: Option<Vec<String>>,
    family: Option<String>,
    mappings: Vec<(f64, f64)>,
    report: bool,
    isolate: bool,
}

fn usage() -> &'static str {
    "svg-standardize\n\
\n\
USAGE:\n\
  svg-standardize <input.svg> [-o <out.svg>] [--config <cfg.json>] [--sizes 10,12,14]\n\
                  [--family <name>] [--map <from>=<to>]... [--report] [--isolate]\n\
\n\
NOTES:\n\
  - The standardized SVG goes to stdout unless -o is given.\n\
  - --sizes and --family override the values of --config.\n\
  - --map pins a detected size to a standard size; other sizes use the closest one.\n\
  - --report prints a Markdown diff of the changes to stderr.\n\
  - --isolate prints the collision-free display copy of the input instead.\n"
}

fn parse_args(argv: &[String]) -> Result<Args> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => bail!(usage()),
            "-o" | "--out" => args.out = Some(next_value(&mut it, a)?),
            "--config" => args.config = Some(next_value(&mut it, a)?),
            "--family" => args.family = Some(next_value(&mut it, a)?),
            "--sizes" => {
                let list = next_value(&mut it, a)?;
                args.sizes = Some(list.split(',').map(|s| s.trim().to_string()).collect());
            }
            "--map" => args.mappings.push(parse_mapping(&next_value(&mut it, a)?)?),
            "--report" => args.report = true,
            "--isolate" => args.isolate = true,
            other if other.starts_with('-') => bail!("unknown option {other}\n\n{}", usage()),
            other => {
                if args.input.is_some() {
                    bail!("only one input file is supported\n\n{}", usage());
                }
                args.input = Some(other.to_string());
            }
        }
    }
    Ok(args)
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<String> {
    it.next()
        .cloned()
        .ok_or_else(|| anyhow!("{flag} needs a value\n\n{}", usage()))
}

/// Parses `FROM=TO`, e.g. `15.3=16`.
fn parse_mapping(spec: &str) -> Result<(f64, f64)> {
    let (from, to) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("--map expects FROM=TO, got {spec:?}"))?;
    let from = from
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid size {from:?} in --map"))?;
    let to = to
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid size {to:?} in --map"))?;
    Ok((from, to))
}

fn run(args: Args) -> Result<()> {
    let input = args
        .input
        .ok_or_else(|| anyhow!("missing input file\n\n{}", usage()))?;

    let config = match &args.config {
        Some(path) => StandardizeConfig::from_path(path)?,
        None => StandardizeConfig::default(),
    };
    let mut session = StandardizerSession::from_config(&config)?;
    if let Some(sizes) = args.sizes {
        session.set_size_inputs(sizes);
    }
    if let Some(family) = &args.family {
        session.set_font_family(family)?;
    }

    let svg = fs::read_to_string(&input).with_context(|| format!("failed to read {input}"))?;
    session
        .load(svg)
        .with_context(|| format!("failed to load {input}"))?;

    if args.isolate {
        let isolated = session.isolated_original().unwrap_or_default();
        return write_output(args.out.as_deref(), isolated);
    }

    session.apply_overrides(&config)?;
    for (from, to) in &args.mappings {
        session.set_mapping(*from, *to)?;
    }
    for entry in session.mapping_entries() {
        log::info!("{}px -> {}px", entry.size, entry.standard);
    }

    let output = session.apply()?.to_string();
    write_output(args.out.as_deref(), &output)?;

    if args.report {
        if let Some(report) = session.change_report() {
            eprintln!("{}", report?.markdown_report);
        }
    }
    Ok(())
}

fn write_output(out: Option<&str>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {path}"))?;
            log::info!("Wrote {}", path);
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv)?;
    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(list: &[&str]) -> Vec<String> {
        std::iter::once("svg-standardize")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&argv(&[
            "in.svg", "-o", "out.svg", "--sizes", "10, 12", "--map", "15.3=16", "--report",
        ]))
        .unwrap();
        assert_eq!(args.input.as_deref(), Some("in.svg"));
        assert_eq!(args.out.as_deref(), Some("out.svg"));
        assert_eq!(args.sizes, Some(vec!["10".to_string(), "12".to_string()]));
        assert_eq!(args.mappings, vec![(15.3, 16.0)]);
        assert!(args.report);
        assert!(!args.isolate);
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(&argv(&["--map", "15"])).is_err());
        assert!(parse_args(&argv(&["--family"])).is_err());
        assert!(parse_args(&argv(&["--bogus"])).is_err());
        assert!(parse_args(&argv(&["a.svg", "b.svg"])).is_err());
    }
}
