//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use chkgate_test_util::normalize_nondeterministic;
use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_result_schema() -> schemars::Schema {
    schema_for!(chkgate_types::CheckReport)
}

fn generate_check_config_schema() -> schemars::Schema {
    schema_for!(chkgate_settings::CheckConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "chkgate.result.v1.json",
            generate: generate_result_schema,
        },
        SchemaSpec {
            filename: "chkgate.check.v1.json",
            generate: generate_check_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Write JSON schemas to schemas/");
    eprintln!("  validate-schemas  Check schemas/ matches the Rust types");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate golden results against the result schema");
    eprintln!("  conform-full      Re-run every fixture and compare with its golden result");
}

/// Fixture directories, sorted by name.
fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let dir = fixtures_dir();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn fixture_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Cross-checks the schema cannot express: every group entry is backed by exactly one
/// detail item with the same name and group label, and FAIL goes with an error group.
fn structural_errors(value: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let mut entries = BTreeSet::new();
    for group in value["groups"].as_array().into_iter().flatten() {
        let label = group["label"].as_str().unwrap_or_default();
        for item in group["items"].as_array().into_iter().flatten() {
            let name = item.as_str().unwrap_or_default();
            if !entries.insert((label.to_string(), name.to_string())) {
                errors.push(format!("{label} lists '{name}' twice"));
            }
        }
    }

    let mut backed = BTreeSet::new();
    for detail in value["details"].as_array().into_iter().flatten() {
        let key = (
            detail["group"].as_str().unwrap_or_default().to_string(),
            detail["name"].as_str().unwrap_or_default().to_string(),
        );
        if !entries.contains(&key) {
            errors.push(format!("detail '{}' is not listed in group {}", key.1, key.0));
        }
        if !backed.insert(key.clone()) {
            errors.push(format!("detail '{}' appears twice in group {}", key.1, key.0));
        }
    }
    for (label, name) in entries.difference(&backed) {
        errors.push(format!("{label} entry '{name}' has no detail item"));
    }

    let has_error_group = value["groups"]
        .as_array()
        .into_iter()
        .flatten()
        .any(|g| g["severity"] == "error");
    let failed = value["status"] == "FAIL";
    if has_error_group != failed {
        errors.push(format!(
            "status {} does not agree with error groups present = {has_error_group}",
            value["status"]
        ));
    }

    errors
}

/// Validate golden results against the generated result schema.
fn conform() -> anyhow::Result<()> {
    let schema_value = serde_json::to_value(generate_result_schema())
        .context("Failed to convert result schema")?;
    let validator = jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile result schema: {}", e))?;
    println!("✓ chkgate.result.v1 schema compiles");

    let mut checked = 0;
    let mut errors = Vec::new();

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);
        let golden = dir.join("expected.result.json");
        if !golden.exists() {
            continue;
        }

        let value = read_json(&golden)?;
        for err in validator.iter_errors(&value) {
            errors.push(format!("{name}: schema validation: {err}"));
        }
        for err in structural_errors(&value) {
            errors.push(format!("{name}: {err}"));
        }
        checked += 1;
    }

    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("✓ {} golden results conform", checked);
    Ok(())
}

/// Run every fixture through the pipeline and compare against its golden result.
///
/// A fixture without `expected.result.json` must be rejected as a configuration error.
fn conform_full() -> anyhow::Result<()> {
    let mut errors = Vec::new();

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);
        let config_text = fs::read_to_string(dir.join("check.toml"))
            .with_context(|| format!("{name}: read check.toml"))?;
        let evidence_text = fs::read_to_string(dir.join("evidence.json"))
            .with_context(|| format!("{name}: read evidence.json"))?;

        let outcome = chkgate_app::run_check(chkgate_app::CheckInput {
            config_text: &config_text,
            evidence_text: &evidence_text,
        });

        let golden = dir.join("expected.result.json");
        match (outcome, golden.exists()) {
            (Ok(output), true) => {
                let actual = normalize_nondeterministic(
                    serde_json::to_value(&output.report).context("serialize result")?,
                );
                let expected = normalize_nondeterministic(read_json(&golden)?);
                if actual == expected {
                    println!("✓ {name}");
                } else {
                    errors.push(format!("{name}: output differs from expected.result.json"));
                }
            }
            (Ok(_), false) => {
                errors.push(format!("{name}: expected a configuration error, got a result"));
            }
            (Err(err), true) => errors.push(format!("{name}: {err:#}")),
            (Err(_), false) => println!("✓ {name} (configuration error)"),
        }
    }

    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Full conformance failed with {} errors", errors.len());
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
