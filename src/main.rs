use anyhow::{bail, Context, Result};
use std::env;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

use panda_loterias::{
    dezenas_of_group, group_name, group_of_number, BetParser, Modality, ParserConfig,
    ValendoBase, ALIASES_FILE_ENV, VERSION,
};

const USAGE: &str = "\
Usage:
  panda-loterias parse <MODALIDADE> [TEXT...]   (reads stdin when TEXT is absent)
  panda-loterias derive <TARGET> <BASE...>
  panda-loterias resolve <LABEL>
  panda-loterias grupo <NUMBER>";

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries JSON only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("parse") => run_parse(&args[1..]),
        Some("derive") => run_derive(&args[1..]),
        Some("resolve") => run_resolve(&args[1..]),
        Some("grupo") => run_grupo(&args[1..]),
        Some("--version") => {
            println!("panda-loterias {}", VERSION);
            Ok(())
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

/// Parser with aliases from $PANDA_ALIASES_FILE, if set
fn load_parser() -> Result<BetParser> {
    match env::var(ALIASES_FILE_ENV) {
        Ok(path) => {
            let config = ParserConfig::from_file(&path)?;
            BetParser::from_config(&config)
                .with_context(|| format!("Invalid aliases in {}", path))
        }
        Err(_) => Ok(BetParser::new()),
    }
}

fn run_parse(args: &[String]) -> Result<()> {
    let Some(modalidade) = args.first() else {
        bail!("missing <MODALIDADE>\n{}", USAGE);
    };

    let text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read bet text from stdin")?;
        buf
    };

    let parser = load_parser()?;
    let result = parser.parse(&text, modalidade);

    if let Some(warning) = result.warning() {
        eprintln!("⚠️  {}", warning);
    }
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Outcome of a `derive` run
#[derive(Debug, PartialEq)]
struct Derivation {
    palpites: Vec<String>,
    /// Set when the target is not offered for this base width
    warning: Option<String>,
}

fn derive_palpites(target_label: &str, bases: &[String]) -> Result<Derivation> {
    let target = Modality::from_canonical(target_label)
        .with_context(|| format!("Unsupported Valendo target: {}", target_label))?;
    let base = ValendoBase::new(bases).context("Invalid Valendo base")?;

    let warning = if base.targets().contains(&target) {
        None
    } else {
        Some(format!(
            "{} is not offered for a {}-digit base",
            target,
            base.width().digits()
        ))
    };

    Ok(Derivation {
        palpites: base.derive(target),
        warning,
    })
}

fn run_derive(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        bail!("missing <TARGET> or <BASE...>\n{}", USAGE);
    }

    let derivation = derive_palpites(&args[0], &args[1..])?;

    if let Some(warning) = &derivation.warning {
        eprintln!("⚠️  {}", warning);
    }
    println!("{}", serde_json::to_string_pretty(&derivation.palpites)?);

    Ok(())
}

fn resolve_label(parser: &BetParser, args: &[String]) -> Result<Modality> {
    let label = args.join(" ");
    match parser.resolver().resolve(&label) {
        Some(modality) => Ok(modality),
        None => bail!("MODALIDADE_NAO_SUPORTADA: {:?}", label),
    }
}

fn run_resolve(args: &[String]) -> Result<()> {
    let parser = load_parser()?;
    println!("{}", resolve_label(&parser, args)?);
    Ok(())
}

fn run_grupo(args: &[String]) -> Result<()> {
    let Some(number) = args.first() else {
        bail!("missing <NUMBER>\n{}", USAGE);
    };

    let group = group_of_number(number)
        .with_context(|| format!("No group for {:?}", number))?;

    let output = serde_json::json!({
        "grupo": group,
        "bicho": group_name(group),
        "dezenas": dezenas_of_group(group),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
