use std::path::PathBuf;

use serde::Deserialize;

use crate::{Compiler, Options};

#[derive(Debug, Deserialize)]
struct Corpus {
    case: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    #[serde(default)]
    section: String,
    name: String,
    /// The query as JSON
    query: String,
    /// The compiled request in its display form
    expected: Option<String>,
    /// The debug name of the expected error kind
    error: Option<String>,
}

impl TestCase {
    fn name_or_section_contains(&self, s: &str) -> bool {
        self.name.contains(s) || self.section.contains(s)
    }

    fn is_soloed(&self) -> bool {
        self.name_or_section_contains("🔦")
    }

    fn is_skipped(&self) -> bool {
        self.name_or_section_contains("⛔")
    }

    fn expected(&self) -> String {
        match (&self.expected, &self.error) {
            (Some(expected), None) => expected.trim().to_string(),
            (None, Some(error)) => format!("error: {}", error.trim()),
            _ => panic!("Case `{}` needs exactly one of `expected` or `error`", self.name),
        }
    }
}

fn get_output(case: &TestCase, expected: &str, actual: &str) -> String {
    [
        "",
        " ╭────────────╮",
        "─┤ Test case: ├──────────────────────────────",
        " ╰────────────╯",
        &case.section,
        &case.name,
        " ╭────────╮",
        "─┤ Input: ├──────────────────────────────",
        " ╰────────╯",
        case.query.trim(),
        " ╭─────────────────╮",
        "─┤ Expected value: ├─────────────────────────",
        " ╰─────────────────╯",
        expected,
        " ╭───────────────╮",
        "─┤ Actual value: ├───────────────────────────",
        " ╰───────────────╯",
        actual,
        "────────────────────────────────────────────",
    ]
    .join("\n")
}

fn test(case: &TestCase) -> bool {
    let compiler = Compiler::new(Options::default());
    let expected = case.expected();
    let actual = match compiler.compile_json(&case.query) {
        Ok(request) => request.to_string(),
        Err(error) => format!("error: {:?}", error.kind()),
    };
    if actual == expected {
        return true;
    }
    println!("{}", get_output(case, &expected, &actual));
    false
}

#[test]
fn test_corpus() {
    let path = PathBuf::from_iter([env!("CARGO_MANIFEST_DIR"), "src", "tests", "corpus.toml"]);
    let content = std::fs::read_to_string(path).unwrap();
    let corpus: Corpus = toml::from_str(&content).unwrap();
    let has_soloed_tests = corpus.case.iter().any(TestCase::is_soloed);
    let mut failures = 0;
    for case in &corpus.case {
        if case.is_skipped() || (has_soloed_tests && !case.is_soloed()) {
            continue;
        }
        if !test(case) {
            failures += 1;
        }
    }
    assert_eq!(failures, 0, "Test corpus failure");
}
