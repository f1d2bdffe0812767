use statviz::page::{JsonInput, Orchestrator, Page, PageError, Session};
use statviz::pages;
use statviz::render::SvgDirSurface;
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn usage() {
    println!("Usage: statviz <page|all|list> [options]");
    println!();
    println!("Options:");
    println!("  --params <file>  JSON object of parameter values, flat or keyed by page id");
    println!("  --out <dir>      Output directory for .svg and .md files (default: out)");
    println!("  --seed <n>       Seed for the Monte-Carlo pages");
    println!("  --point <x,y>    Add a point to the regression session (repeatable)");
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn parse_point(text: &str) -> Option<(f64, f64)> {
    let (x, y) = text.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn run(args: &[String]) -> Result<bool, Box<dyn std::error::Error>> {
    let target = args[1].as_str();
    if target == "list" {
        for page in pages::all_pages() {
            println!("{:<22} {}", page.id(), page.title());
        }
        return Ok(true);
    }

    let selected: Vec<Box<dyn Page>> = if target == "all" {
        pages::all_pages()
    } else {
        vec![pages::find(target)?]
    };

    let input = match flag_value(args, "--params") {
        Some(path) => JsonInput::from_path(&PathBuf::from(path))?,
        None => JsonInput::default(),
    };
    let orchestrator = match flag_value(args, "--seed") {
        Some(seed) => Orchestrator::with_seed(
            seed.parse()
                .map_err(|_| PageError::Config(format!("bad seed '{}'", seed)))?,
        ),
        None => Orchestrator::new(),
    };

    let mut session = Session::new();
    for (idx, _) in args.iter().enumerate().filter(|(_, a)| *a == "--point") {
        let text = args.get(idx + 1).map(String::as_str).unwrap_or("");
        let (x, y) = parse_point(text)
            .ok_or_else(|| PageError::Config(format!("bad point '{}', expected x,y", text)))?;
        session.add_point(x, y);
    }

    let out = flag_value(args, "--out").unwrap_or("out");
    let mut surface = SvgDirSurface::new(out)?;
    info!(dir = %surface.dir().display(), pages = selected.len(), "rendering");

    let mut all_ok = true;
    for page in &selected {
        let values = input.for_page(page.id())?;
        let outcome = orchestrator.run(page.as_ref(), &values, &mut surface, &mut session);
        info!(page = page.id(), ?outcome, "done");
        all_ok &= outcome.is_rendered();
    }
    Ok(all_ok)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        return;
    }

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!(error = %e, "statviz failed");
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}
