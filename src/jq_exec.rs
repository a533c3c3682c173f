//! jq pre-processing of input documents (via jaq).
use anyhow::{Context, Result, anyhow};
use jaq_core::{Compiler, Ctx, RcIter, compile::Undefined, load};
use jaq_json::Val;
use serde_json::Value;

/// Run `filter_src` over `input`; every output becomes its own document.
pub fn run_filter(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
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

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut documents = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
        // Val's Display is JSON text
        let text = val.to_string();
        let doc = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("jq produced a value that is not JSON: {text}"))?;
        documents.push(doc);
    }
    tracing::debug!(filter = filter_src, outputs = documents.len(), "applied jq filter");
    Ok(documents)
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> anyhow::Error {
    let lines: Vec<String> = errs
        .into_iter()
        .map(|(file, err)| format!("jq parse error: {err:?} in `{}`", file.code))
        .collect();
    anyhow!(lines.join("\n"))
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> anyhow::Error {
    let lines: Vec<String> = errs
        .into_iter()
        .flat_map(|(file, list)| {
            list.into_iter()
                .map(move |(name, undef)| format!("jq: undefined `{name}`: {undef:?} in `{}`", file.code))
        })
        .collect();
    anyhow!(lines.join("\n"))
}
