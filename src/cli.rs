//! Minimal CLI: JSON documents → C# declarations
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;

use json2cs::{ContainerStyle, ConversionSettings, PropertyAccess};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer C# classes or records from JSON documents
#[derive(Parser, Debug)]
#[command(name = "json2cs", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// convert JSON documents into C# type declarations
    Convert(ConvertOut),
    /// print the effective conversion settings as JSON
    Settings(SettingsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is converted separately
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
struct StyleSettings {
    /// JSON settings file (camelCase keys); flags below override it
    #[arg(long)]
    settings: Option<PathBuf>,

    /// emit records instead of classes
    #[arg(long)]
    records: bool,

    /// records take their members as primary-constructor parameters
    #[arg(long)]
    primary_constructor: bool,

    /// property accessor shape
    #[arg(long, value_enum)]
    access: Option<PropertyAccess>,

    /// spelling of sequence types
    #[arg(long, value_enum)]
    container: Option<ContainerStyle>,

    /// top-level C# type name
    #[arg(long)]
    root_type: Option<String>,

    /// namespace wrapping the declarations
    #[arg(long)]
    namespace: Option<String>,

    /// omit [JsonPropertyName] attributes
    #[arg(long)]
    no_attributes: bool,

    /// mark every member nullable
    #[arg(long)]
    nullable: bool,

    /// mark every member required
    #[arg(long)]
    required: bool,

    /// initialize strings, sequences and nested objects with defaults
    #[arg(long)]
    default_init: bool,
}

#[derive(clap::Parser, Debug)]
struct ConvertOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    style: StyleSettings,

    /// output .cs file (stdout if omitted)
    #[arg(short, long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// write one .cs file per document into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct SettingsOut {
    #[command(flatten)]
    style: StyleSettings,
}

/// One generated document, tagged with where it came from.
struct Generated {
    source: PathBuf,
    index: usize,
    text: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl StyleSettings {
    fn resolve(&self) -> Result<ConversionSettings> {
        let mut s = match &self.settings {
            Some(path) => ConversionSettings::load(path)?,
            None => ConversionSettings::default(),
        };
        s.use_records |= self.records;
        s.use_primary_constructor |= self.primary_constructor;
        if let Some(access) = self.access {
            s.property_access = access;
        }
        if let Some(container) = self.container {
            s.container_style = container;
        }
        if let Some(root) = &self.root_type {
            s.root_type_name = root.clone();
        }
        if let Some(ns) = &self.namespace {
            s.module_name = ns.clone();
        }
        if self.no_attributes {
            s.emit_serialization_attribute = false;
        }
        s.is_nullable |= self.nullable;
        s.is_required |= self.required;
        s.default_initialize |= self.default_init;
        Ok(s)
    }
}

impl InputSettings {
    /// Convert every document of one input file, in document order.
    fn convert_file(&self, source_path: &Path, settings: &ConversionSettings) -> Result<Vec<String>> {
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file {}", source_path.display()))?;

        if self.json_pointer.is_none() && self.jq_expr.is_none() {
            let doc = json2cs::convert(&source, settings)
                .with_context(|| format!("failed to convert {}", source_path.display()))?;
            return Ok(vec![doc]);
        }

        let mut json_value = serde_json::from_str::<serde_json::Value>(&source)
            .map_err(json2cs::ConversionError::from)
            .with_context(|| format!("failed to parse JSON source file {}", source_path.display()))?;

        if let Some(ptr) = &self.json_pointer {
            json_value = json_value
                .pointer(ptr)
                .cloned()
                .with_context(|| format!("JSON pointer {ptr} matched nothing in {}", source_path.display()))?;
        }

        let documents = match &self.jq_expr {
            None => vec![json_value],
            Some(jq_expr) => crate::jq_exec::run_filter(jq_expr, &json_value).with_context(|| {
                format!("failed to apply jq expression to source file {}", source_path.display())
            })?,
        };

        documents
            .iter()
            .map(|doc| {
                json2cs::convert_value(doc, settings)
                    .with_context(|| format!("failed to convert {}", source_path.display()))
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Settings(target) => {
                let settings = target.style.resolve()?;
                println!("{}", serde_json::to_string_pretty(&settings)?);
                Ok(())
            }
            Command::Convert(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let settings = target.style.resolve()?;
                let source_paths = resolve_file_path_patterns(&target.input_settings.input)?;
                tracing::info!(inputs = source_paths.len(), "converting");

                // conversions are independent; collect keeps input order
                let results: Vec<(PathBuf, Result<Vec<String>>)> = source_paths
                    .into_par_iter()
                    .map(|path| {
                        let out = target.input_settings.convert_file(&path, &settings);
                        (path, out)
                    })
                    .collect();

                let mut generated = Vec::<Generated>::new();
                let mut failures = 0usize;
                for (source, result) in results {
                    match result {
                        Ok(docs) => generated.extend(
                            docs.into_iter()
                                .enumerate()
                                .map(|(index, text)| Generated { source: source.clone(), index, text }),
                        ),
                        Err(error) => {
                            failures += 1;
                            eprintln!("{} {error:#}", "❌".red());
                        }
                    }
                }

                write_outputs(target, &generated)?;

                if failures > 0 {
                    bail!("{failures} input(s) failed to convert");
                }
                Ok(())
            }
        }
    }
}

fn write_outputs(target: &ConvertOut, generated: &[Generated]) -> Result<()> {
    if let Some(dir) = target.out_dir.as_ref() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        for (g, name) in generated.iter().zip(output_file_names(generated)) {
            let path = dir.join(name);
            std::fs::write(&path, &g.text).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{} {}", "✅".green(), path.display());
        }
        return Ok(());
    }

    // a single destination holds one document: the first output of its source
    let firsts = generated.iter().filter(|g| g.index == 0).collect::<Vec<_>>();
    if firsts.len() > 1 {
        bail!("{} inputs produced documents; use --out-dir to write one file per input", firsts.len());
    }
    let Some(doc) = firsts.first() else {
        return Ok(());
    };
    let skipped = generated.len() - 1;
    if skipped > 0 {
        tracing::warn!(skipped, source = %doc.source.display(), "keeping only the first jq output");
    }
    if let Some(out) = target.out.as_ref() {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(out, &doc.text).with_context(|| format!("failed to write {}", out.display()))?;
    } else {
        print!("{}", doc.text);
    }
    Ok(())
}

/// `<stem>.cs` per document, `<stem>_<index>.cs` for sources with several
/// documents; names already taken get a numeric suffix.
fn output_file_names(generated: &[Generated]) -> Vec<String> {
    let mut taken = std::collections::HashSet::<String>::new();
    generated
        .iter()
        .map(|g| {
            let stem = g.source.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
            let base = if has_siblings(generated, &g.source) {
                format!("{stem}_{}", g.index)
            } else {
                stem
            };
            let mut name = format!("{base}.cs");
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = format!("{base}_{n}.cs");
                n += 1;
            }
            name
        })
        .collect()
}

// `true` for sources that produced more than one document
fn has_siblings(generated: &[Generated], source: &Path) -> bool {
    generated.iter().filter(|g| g.source.as_path() == source).count() > 1
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
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_the_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "rootTypeName": "Order", "containerStyle": "List" }"#).unwrap();

        let style = StyleSettings {
            settings: Some(path),
            records: true,
            container: Some(ContainerStyle::Array),
            no_attributes: true,
            ..Default::default()
        };
        let s = style.resolve().unwrap();
        assert_eq!(s.root_type_name, "Order");
        assert_eq!(s.container_style, ContainerStyle::Array);
        assert!(s.use_records);
        assert!(!s.emit_serialization_attribute);
    }

    #[test]
    fn pointer_and_jq_select_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, r#"{ "data": { "users": [{ "id": 1 }, { "name": "x" }] } }"#).unwrap();

        let input = InputSettings {
            json_pointer: Some("/data".into()),
            jq_expr: Some(".users[]".into()),
            input: vec![],
        };
        let docs = input.convert_file(&path, &ConversionSettings::default()).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].contains("public int Id { get; set; }"));
        assert!(docs[1].contains("public string Name { get; set; }"));
    }

    #[test]
    fn single_out_file_keeps_the_first_jq_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("payload.json");
        let out = dir.path().join("out.cs");
        std::fs::write(&input, r#"{ "users": [{ "id": 1 }, { "name": "x" }] }"#).unwrap();

        let args = [
            "json2cs",
            "convert",
            "--input",
            input.to_str().unwrap(),
            "--jq-expr",
            ".users[]",
            "--out",
            out.to_str().unwrap(),
        ];
        CommandLineInterface::try_parse_from(args).unwrap().run().unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.matches("namespace ").count(), 1, "{text}");
        assert_eq!(text.matches("using ").count(), 1, "{text}");
        assert!(text.contains("public int Id { get; set; }"), "{text}");
        assert!(!text.contains("Name"), "{text}");
    }

    #[test]
    fn single_out_file_rejects_several_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        let out = dir.path().join("out.cs");
        std::fs::write(&a, r#"{ "id": 1 }"#).unwrap();
        std::fs::write(&b, r#"{ "name": "x" }"#).unwrap();

        let args = [
            "json2cs",
            "convert",
            "--input",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ];
        let err = CommandLineInterface::try_parse_from(args).unwrap().run().unwrap_err();
        assert!(err.to_string().contains("--out-dir"), "{err:#}");
        assert!(!out.exists());
    }

    #[test]
    fn out_dir_keeps_inputs_with_the_same_stem_apart() {
        let dir = tempfile::tempdir().unwrap();
        for (sub, body) in [("a", r#"{ "id": 1 }"#), ("b", r#"{ "name": "x" }"#)] {
            std::fs::create_dir(dir.path().join(sub)).unwrap();
            std::fs::write(dir.path().join(sub).join("user.json"), body).unwrap();
        }
        let pattern = format!("{}/*/user.json", dir.path().display());
        let out_dir = dir.path().join("out");

        let args = ["json2cs", "convert", "--input", pattern.as_str(), "--out-dir", out_dir.to_str().unwrap()];
        CommandLineInterface::try_parse_from(args).unwrap().run().unwrap();

        let first = std::fs::read_to_string(out_dir.join("user.cs")).unwrap();
        let second = std::fs::read_to_string(out_dir.join("user_2.cs")).unwrap();
        assert!(first.contains("public int Id { get; set; }"), "{first}");
        assert!(second.contains("public string Name { get; set; }"), "{second}");
    }

    #[test]
    fn globs_must_match_something() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        let hit = format!("{}/*.json", dir.path().display());
        let miss = format!("{}/*.yaml", dir.path().display());
        assert_eq!(resolve_file_path_patterns([hit]).unwrap().len(), 1);
        assert!(resolve_file_path_patterns([miss]).is_err());
    }
}
