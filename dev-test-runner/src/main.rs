//! Golden-file runner: render every `samples/*.json` to Java and compare it
//! with the sibling `.java` file. Pass another directory as the first argument
//! to run a different sample set.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use colored::Colorize;
use json_classgen::Inferencer;
use json_classgen::codegen::{JavaCodegen, Renderer};
use once_cell::sync::Lazy;
use regex::Regex;

const SAMPLE_PACKAGE: &str = "samples";

static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").expect("regex"));

enum Outcome {
    Pass,
    NoGolden(String),
    Mismatch { expected: String, actual: String },
}

fn normalize(src: &str) -> String {
    TRAILING_WS.replace_all(&src.replace("\r\n", "\n"), "").trim_end().to_owned()
}

fn samples_dir() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../samples"))
}

fn run_sample(json_path: &Path) -> Result<Outcome, String> {
    let stem = json_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("unusable file name {}", json_path.display()))?;
    let source = std::fs::read_to_string(json_path).map_err(|e| e.to_string())?;
    let value = json_classgen::path_de::parse_document(&source)?;

    let inferencer = Inferencer::new();
    let tree = inferencer.infer_tree(&value, stem).map_err(|e| e.to_string())?;
    if inferencer.infer_tree(&value, stem).map_err(|e| e.to_string())? != tree {
        return Err("inference is not deterministic".into());
    }
    let actual = JavaCodegen::new(SAMPLE_PACKAGE).render(&tree);

    let golden = json_path.with_extension("java");
    if !golden.exists() {
        return Ok(Outcome::NoGolden(actual));
    }
    let expected = std::fs::read_to_string(&golden).map_err(|e| e.to_string())?;
    if normalize(&actual) == normalize(&expected) {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Mismatch { expected, actual })
    }
}

fn main() -> ExitCode {
    let dir = samples_dir();
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(error) => {
            eprintln!("❌ cannot read {}: {error}", dir.display());
            return ExitCode::FAILURE;
        }
    };
    let mut samples: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    samples.sort();

    let mut failures = 0usize;
    for sample in &samples {
        let name = sample.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        match run_sample(sample) {
            Ok(Outcome::Pass) => eprintln!("✅ {name}"),
            Ok(Outcome::NoGolden(actual)) => {
                eprintln!("{} {name}: no golden file, rendered:", "⚠️".yellow());
                println!("{actual}");
            }
            Ok(Outcome::Mismatch { expected, actual }) => {
                failures += 1;
                eprintln!("❌ {name}: {}", "output differs from golden file".red());
                eprintln!("—— expected ——\n{expected}\n—— actual ——\n{actual}");
            }
            Err(error) => {
                failures += 1;
                eprintln!("❌ {name}: {}", error.red());
            }
        }
    }

    eprintln!("{} samples, {} failed", samples.len(), failures);
    if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
