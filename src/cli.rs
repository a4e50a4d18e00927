//! CLI: infer → (java | rust | schema)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::codegen::{self, JavaCodegen, Renderer, RustCodegen, java::DEFAULT_PACKAGE};
use crate::inference::{DEFAULT_MAX_DEPTH, Inferencer, naming};
use crate::ir::TypeTree;
use crate::value::JsonValue;

/// Root type name when none is given for a single input.
pub const DEFAULT_CLASS_NAME: &str = "Example";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a class hierarchy from an example JSON object and emit it as source code
#[derive(Parser, Debug)]
#[command(name = "json-classgen", version)]
pub struct CommandLineInterface {
    /// more log output on stderr (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit Java classes: a public root class with static inner classes
    Java(JavaOut),
    /// emit a serde Rust data model
    Rust(RustOut),
    /// print the inferred type tree as JSON
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; must yield exactly one value
    #[arg(long)]
    jq_expr: Option<String>,

    /// root type name, used verbatim (single input only; defaults to "Example").
    /// With several inputs each root is named after its file stem
    #[arg(long, short = 'c')]
    class_name: Option<String>,

    /// fail instead of descending into more nested objects/arrays than this
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output directory (stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct JavaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// Java package; pass "" for the default package
    #[arg(short, long, default_value = DEFAULT_PACKAGE)]
    package: String,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct RustOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,
}

/// One input document and the name its root type gets.
#[derive(Debug, Clone)]
struct Job {
    source: PathBuf,
    root_name: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn jobs(&self) -> Result<Vec<Job>> {
        let mut paths = resolve_file_path_patterns(&self.input)?;
        if paths.len() == 1 {
            let root_name = self.class_name.clone().unwrap_or_else(|| DEFAULT_CLASS_NAME.to_owned());
            return Ok(vec![Job { source: paths.remove(0), root_name }]);
        }
        if self.class_name.is_some() {
            bail!("--class-name needs exactly one input, got {}", paths.len());
        }
        paths
            .into_iter()
            .map(|source| -> Result<Job> {
                let stem = source
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| anyhow!("cannot name a type after {}", source.display()))?;
                Ok(Job { root_name: naming::capitalize(stem), source })
            })
            .collect()
    }

    fn load(&self, path: &Path) -> Result<JsonValue> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut value = crate::path_de::parse_document(&source)
            .map_err(|error| anyhow!("failed to parse JSON source file ({}): {error}", path.display()))?;
        if let Some(pointer) = self.json_pointer.as_ref() {
            value = value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| anyhow!("JSON pointer {pointer} selects nothing in {}", path.display()))?;
        }
        if let Some(jq_expr) = self.jq_expr.as_ref() {
            value = crate::jq_exec::select_one(jq_expr, &value).with_context(|| {
                format!("failed to apply jq expression to source file ({})", path.display())
            })?;
        }
        Ok(value)
    }

    /// Infer every input; several inputs run in parallel but keep input order.
    fn infer_all(&self) -> Result<Vec<TypeTree>> {
        let jobs = self.jobs()?;
        let inferencer = Inferencer::new().with_max_depth(self.max_depth);
        jobs.into_par_iter()
            .map(|job| -> Result<TypeTree> {
                let value = self.load(&job.source)?;
                let tree = inferencer
                    .infer_tree(&value, &job.root_name)
                    .with_context(|| format!("failed to infer types from {}", job.source.display()))?;
                info!(
                    source = %job.source.display(),
                    root = %job.root_name,
                    max_depth = inferencer.max_depth(),
                    composites = tree.composites().len(),
                    "inferred"
                );
                for name in tree.duplicate_names() {
                    warn!(
                        source = %job.source.display(),
                        name = %name,
                        "composite name derived more than once; generated source may not compile"
                    );
                }
                Ok(tree)
            })
            .collect()
    }
}

impl OutputSettings {
    fn emit(&self, outputs: Vec<(PathBuf, String)>) -> Result<()> {
        for (relative, src) in outputs {
            match self.out_dir.as_ref() {
                Some(dir) => {
                    let out = dir.join(&relative);
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(&out, &src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    eprintln!("{} {}", "generated".green().bold(), out.display());
                }
                None => print!("{src}"),
            }
        }
        Ok(())
    }
}

fn render_all(renderer: &impl Renderer, trees: &[TypeTree]) -> Vec<(PathBuf, String)> {
    trees
        .iter()
        .map(|tree| (renderer.file_path(tree), renderer.render(tree)))
        .collect()
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Install the stderr subscriber. `RUST_LOG` overrides `-v`.
    pub fn init_tracing(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Java(target) => {
                // debug path
                if target.output_settings.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let trees = target.input_settings.infer_all()?;
                let cg = JavaCodegen::new(&target.package);
                target.output_settings.emit(render_all(&cg, &trees))
            }
            Command::Rust(target) => {
                if target.output_settings.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let trees = target.input_settings.infer_all()?;
                target.output_settings.emit(render_all(&RustCodegen::new(), &trees))
            }
            Command::Schema(target) => {
                if target.output_settings.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let trees = target.input_settings.infer_all()?;
                let outputs = trees
                    .iter()
                    .map(|tree| -> Result<(PathBuf, String)> {
                        let src = codegen::schema_json(tree)?;
                        Ok((codegen::schema_file_path(tree), src + "\n"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                target.output_settings.emit(outputs)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
