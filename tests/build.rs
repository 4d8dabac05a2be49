use std::fs;

use w3c_tokens::{build, BuildConfig, BuildError};

const PRIMITIVES: &str = r#"{
  "palette": { "ink": "oklch(0.2 0.05 250)" },
  "spacing": { "sm": { "value": "0.25rem", "pixel": "4px" } }
}"#;

const EXPECTED: &str = r#"{
  "palette": {
    "ink": {
      "$value": {
        "colorSpace": "oklch",
        "components": [
          0.2,
          0.05,
          250
        ],
        "alpha": 1
      },
      "$type": "color"
    }
  },
  "spacing": {
    "sm": {
      "$type": "dimension",
      "$value": "0.25rem",
      "$description": "4px"
    }
  }
}"#;

#[test]
fn writes_tokens_and_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("primitives.json");
    let output = dir.path().join("dist").join("w3c").join("base.json");
    fs::write(&input, PRIMITIVES).unwrap();

    let report = build(&BuildConfig {
        input,
        output: output.clone(),
    })
    .unwrap();

    assert_eq!(report.output, output);
    assert_eq!(report.summary.tokens(), 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
    // no temp files left next to the output
    assert_eq!(fs::read_dir(output.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn replaces_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("primitives.json");
    let output = dir.path().join("base.json");
    fs::write(&input, r#"{"leading": {"tight": 1.2}}"#).unwrap();
    fs::write(&output, "stale").unwrap();

    build(&BuildConfig {
        input,
        output: output.clone(),
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{\n  \"leading\": {\n    \"tight\": {\n      \"$value\": 1.2,\n      \"$type\": \"number\"\n    }\n  }\n}"
    );
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("dist").join("base.json");

    let err = build(&BuildConfig {
        input: dir.path().join("missing.json"),
        output: output.clone(),
    })
    .unwrap_err();

    assert!(matches!(err, BuildError::Read { .. }));
    assert!(err.to_string().contains("missing.json"));
    assert!(!output.parent().unwrap().exists());
}

#[test]
fn invalid_json_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("primitives.json");
    let output = dir.path().join("base.json");
    fs::write(&input, r##"{"palette": {"ink": "#000",}}"##).unwrap();
    fs::write(&output, "previous").unwrap();

    let err = build(&BuildConfig {
        input,
        output: output.clone(),
    })
    .unwrap_err();

    assert!(matches!(err, BuildError::Parse { .. }));
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn unwritable_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("primitives.json");
    let blocker = dir.path().join("dist");
    fs::write(&input, "{}").unwrap();
    fs::write(&blocker, "a file, not a directory").unwrap();

    let err = build(&BuildConfig {
        input,
        output: blocker.join("base.json"),
    })
    .unwrap_err();

    assert!(matches!(err, BuildError::CreateDir { .. }));
}

#[test]
fn default_locations() {
    let config = BuildConfig::default();
    assert_eq!(config.input.to_str(), Some("src/tokens/primitives.json"));
    assert_eq!(config.output.to_str(), Some("dist/w3c/base.json"));
}

#[cfg(unix)]
#[test]
fn keeps_permissions_of_existing_output() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("primitives.json");
    let fresh = dir.path().join("fresh.json");
    let existing = dir.path().join("existing.json");
    fs::write(&input, r#"{"size": {"sm": "4px"}}"#).unwrap();
    fs::write(&existing, "old").unwrap();
    fs::set_permissions(&existing, fs::Permissions::from_mode(0o640)).unwrap();

    for output in [&fresh, &existing] {
        build(&BuildConfig {
            input: input.clone(),
            output: output.clone(),
        })
        .unwrap();
    }

    let mode = |path: &std::path::Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(existing.as_path()), 0o640);
    // group/other bits of new files depend on the umask
    assert_eq!(mode(fresh.as_path()) & 0o600, 0o600);
}
