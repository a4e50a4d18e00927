use anyhow::{Result, anyhow, bail};
use jaq_core::{Compiler, Ctx, RcIter, compile::Undefined, load};
use jaq_json::Val;

use crate::value::JsonValue;

/// Pre-filter one document with jq. Only one example document is inferred
/// at a time, so the filter must yield exactly one output.
pub fn select_one(filter_src: &str, input: &JsonValue) -> Result<JsonValue> {
    let mut outputs = run_jaq(filter_src, input)?;
    if outputs.len() != 1 {
        bail!(
            "jq filter `{filter_src}` produced {} outputs, expected exactly one",
            outputs.len()
        );
    }
    let text = outputs.remove(0);
    crate::path_de::parse_document(&text).map_err(|e| anyhow!("jq output is not JSON: {e}"))
}

fn run_jaq(filter_src: &str, input: &JsonValue) -> Result<Vec<String>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let input = serde_json::to_value(input)?;
    let inputs = RcIter::new(core::iter::empty());
    let mut it = filter.run((Ctx::new([], &inputs), Val::from(input)));

    let mut out = Vec::new();
    while let Some(item) = it.next() {
        let v = item.map_err(|e| anyhow!(format!("{e:?}")))?; // jaq errors only implement Debug here
        out.push(format!("{v}"));
    }
    Ok(out)
}

fn format_parse_errors(
    errs: Vec<(load::File<&str, ()>, load::Error<&str>)>,
) -> anyhow::Error {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    anyhow!(s)
}

fn format_undefined_errors(
    errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>,
) -> anyhow::Error {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    anyhow!(s)
}
