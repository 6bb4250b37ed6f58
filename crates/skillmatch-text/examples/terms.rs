use std::env;

use skillmatch_text::{Normalizer, TermAnalyzer};

// Print the normalized form and index terms of a piece of text.
// Usage:
//   cargo run -p skillmatch-text --example terms -- "Front-End developer with Data Science"

fn main() -> anyhow::Result<()> {
    let text = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        eprintln!("Usage: cargo run -p skillmatch-text --example terms -- <text>");
        std::process::exit(1);
    }
    let normalized = Normalizer::new().normalize(&text);
    let analyzer = TermAnalyzer::english()?;
    println!("normalized: {}", normalized);
    for (i, term) in analyzer.terms(&normalized).iter().enumerate() {
        println!("{:>3}. {}", i + 1, term);
    }
    Ok(())
}
