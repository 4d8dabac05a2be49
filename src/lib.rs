use std::{
    fs, io,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

pub use summary::TokenSummary;
pub use w3c_tokens_core::{parse_primitives, transform, Primitives, TokenTree};
mod summary;

pub const DEFAULT_INPUT: &str = "src/tokens/primitives.json";
pub const DEFAULT_OUTPUT: &str = "dist/w3c/base.json";

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}
impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[derive(Debug)]
pub struct BuildReport {
    pub output: PathBuf,
    pub summary: TokenSummary,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read primitives from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse primitives in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize tokens")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write tokens to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads the primitives file, converts it and writes the tokens document.
///
/// Nothing is written unless every earlier step succeeded, and the output file
/// is replaced atomically.
pub fn build(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    let data = fs::read_to_string(&config.input).map_err(|source| BuildError::Read {
        path: config.input.clone(),
        source,
    })?;
    let primitives = parse_primitives(&data).map_err(|source| BuildError::Parse {
        path: config.input.clone(),
        source,
    })?;
    debug!(input = %config.input.display(), entries = primitives.len(), "parsed primitives");

    let tokens = transform(&primitives, "");
    let json = render(&tokens)?;
    write_atomic(&config.output, &json)?;

    let summary = TokenSummary::of(&tokens);
    info!(output = %config.output.display(), %summary, "wrote design tokens");
    Ok(BuildReport {
        output: config.output.clone(),
        summary,
    })
}

/// Pretty JSON with two space indentation and no trailing newline.
pub fn render(tokens: &TokenTree) -> Result<String, BuildError> {
    serde_json::to_string_pretty(tokens).map_err(BuildError::Serialize)
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), BuildError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| BuildError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());
    let mut file = temp_file_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    if let Some(permissions) = existing {
        file.as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }
    file.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

// New files get the usual 0666 minus umask instead of tempfile's 0600.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}
#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}
