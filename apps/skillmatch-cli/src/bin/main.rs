use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use skillmatch_core::catalog::load_catalog;
use skillmatch_core::config::Config;
use skillmatch_core::types::Filter;
use skillmatch_rank::evaluate::{evaluate_case, load_cases, summarize};
use skillmatch_rank::response::{self, RecommendRequest, Reply, StrictRequest};
use skillmatch_rank::{BoostTables, RecommendationEngine};

const USAGE: &str = "Usage: skillmatch <recommend|strict|types|evaluate|health> [args...]
  recommend <query> [--top-k N] [--type T] [--remote true|false] [--adaptive true|false]
  strict <query>
  types
  evaluate <cases.json> [--top-k N] [--out FILE]
  health";

/// Positional arguments plus `--flag value` pairs.
struct Args {
    positional: Vec<String>,
    flags: Vec<(String, String)>,
}

impl Args {
    fn parse(raw: &[String]) -> anyhow::Result<Self> {
        let (mut positional, mut flags) = (Vec::new(), Vec::new());
        let mut i = 0;
        while i < raw.len() {
            if let Some(name) = raw[i].strip_prefix("--") {
                let Some(value) = raw.get(i + 1) else { bail!("--{} requires a value", name) };
                flags.push((name.to_string(), value.clone()));
                i += 2;
            } else {
                positional.push(raw[i].clone());
                i += 1;
            }
        }
        Ok(Self { positional, flags })
    }

    fn flag(&self, name: &str) -> Option<&str> {
        self.flags.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    fn bool_flag(&self, name: &str) -> anyhow::Result<Option<bool>> {
        self.flag(name)
            .map(|v| v.parse::<bool>().with_context(|| format!("--{} expects true or false, got '{}'", name, v)))
            .transpose()
    }

    fn top_k(&self, default: usize) -> anyhow::Result<usize> {
        match self.flag("top-k") {
            Some(v) => v.parse().with_context(|| format!("--top-k expects a number, got '{}'", v)),
            None => Ok(default),
        }
    }

    fn query(&self) -> String { self.positional.join(" ") }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// The engine is `None` when it could not be built; handlers still answer.
fn build_engine(config: &Config) -> anyhow::Result<Option<RecommendationEngine>> {
    let catalog = load_catalog(&config.catalog_path()?);
    let tables = BoostTables::load_optional(config.boost_tables_path()?.as_deref())?;
    match RecommendationEngine::new(catalog, tables) {
        Ok(engine) => {
            info!(records = engine.index().len(), terms = engine.index().vocabulary_size(), "matching engine ready");
            Ok(Some(engine))
        }
        Err(e) => {
            error!(error = %e, "matching engine unavailable");
            Ok(None)
        }
    }
}

fn print_reply(reply: &Reply) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&reply.body)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.engine()?;

    let raw: Vec<String> = env::args().skip(1).collect();
    let Some((cmd, rest)) = raw.split_first() else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };
    let args = Args::parse(rest)?;

    match cmd.as_str() {
        "health" => print_reply(&response::health())?,
        "recommend" => {
            let engine = build_engine(&config)?;
            let mut filters = Filter::new();
            if let Some(t) = args.flag("type") { filters = filters.with_type(t); }
            if let Some(r) = args.bool_flag("remote")? { filters = filters.with_remote(r); }
            if let Some(a) = args.bool_flag("adaptive")? { filters = filters.with_adaptive(a); }
            let request = RecommendRequest { job_description: Some(args.query()), filters };
            let reply = response::recommend(engine.as_ref(), &request, args.top_k(settings.default_top_k)?);
            print_reply(&reply)?;
            if !reply.is_success() { std::process::exit(2); }
        }
        "strict" => {
            let engine = build_engine(&config)?;
            let request = StrictRequest { job_description: None, query: Some(args.query()) };
            let reply = response::strict(engine.as_ref(), &request, settings.strict_top_k);
            print_reply(&reply)?;
            if reply.status != 200 { std::process::exit(2); }
        }
        "types" => {
            let catalog = load_catalog(&config.catalog_path()?);
            for t in catalog.types() { println!("{}", t); }
        }
        "evaluate" => {
            let Some(path) = args.positional.first().map(PathBuf::from) else {
                eprintln!("Usage: skillmatch evaluate <cases.json> [--top-k N] [--out FILE]");
                std::process::exit(1);
            };
            let cases = load_cases(&path).with_context(|| format!("reading test cases from {}", path.display()))?;
            let Some(engine) = build_engine(&config)? else { bail!("matching engine unavailable") };
            let top_k = args.top_k(settings.default_top_k)?;

            let pb = ProgressBar::new(cases.len() as u64);
            pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} queries ({percent}%) {msg}")?.progress_chars("#>-"));
            let mut results = Vec::with_capacity(cases.len());
            for case in &cases {
                results.push(evaluate_case(&engine, case, top_k)?);
                pb.inc(1);
            }
            pb.finish_with_message("done");

            let evaluation = summarize(results);
            eprintln!(
                "Average recall@{}: {:.4}  precision@{}: {:.4}  F1: {:.4}",
                top_k, evaluation.avg_recall, top_k, evaluation.avg_precision, evaluation.avg_f1
            );
            let json = serde_json::to_string_pretty(&evaluation)?;
            match args.flag("out") {
                Some(out) => {
                    fs::write(out, json).with_context(|| format!("writing results to {}", out))?;
                    info!(path = out, "evaluation results saved");
                }
                None => println!("{}", json),
            }
        }
        _ => {
            eprintln!("Unknown command: {}\n{}", cmd, USAGE);
            std::process::exit(1);
        }
    }
    Ok(())
}
