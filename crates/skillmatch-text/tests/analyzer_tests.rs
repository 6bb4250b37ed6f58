use skillmatch_text::{normalize, TermAnalyzer};

#[test]
fn terms_drop_stop_words_and_single_chars() {
    let analyzer = TermAnalyzer::english().expect("analyzer");
    let terms = analyzer.terms(&normalize("I am hiring for a Java developer in C"));
    assert_eq!(terms, vec!["hiring", "java_developer"]);
}

#[test]
fn joined_phrases_stay_single_terms() {
    let analyzer = TermAnalyzer::english().expect("analyzer");
    let terms = analyzer.terms(&normalize("Project-Management and data science skills"));
    assert_eq!(terms, vec!["project_management", "data_science", "skills"]);
}

#[test]
fn repeated_terms_are_kept() {
    let analyzer = TermAnalyzer::english().expect("analyzer");
    assert_eq!(analyzer.terms("python python sql"), vec!["python", "python", "sql"]);
}

#[test]
fn drops_numbers_and_filler_nouns_from_stop_list() {
    let analyzer = TermAnalyzer::english().expect("analyzer");
    let terms = analyzer.terms("full time work from home system find part top one two show");
    assert_eq!(terms, vec!["time", "work", "home"]);
    assert_eq!(analyzer.terms("did having just"), vec!["did", "having", "just"]);
}

#[test]
fn custom_stop_words() {
    let analyzer = TermAnalyzer::with_stop_words(&["assessment"]).expect("analyzer");
    assert_eq!(analyzer.terms("the assessment"), vec!["the"]);
}

#[test]
fn analyzer_is_shareable_across_threads() {
    let analyzer = std::sync::Arc::new(TermAnalyzer::english().expect("analyzer"));
    let handles: Vec<_> = (0..4)
        .map(|_| { let a = analyzer.clone(); std::thread::spawn(move || a.terms("excel data analysis")) })
        .collect();
    for h in handles { assert_eq!(h.join().unwrap(), vec!["excel", "data", "analysis"]); }
}
