//! `name=value` override files injected into the environment before compiling.

use std::{fs, path::Path};

use crate::{
    diagnostics::{NatRegError, Result},
    environment::Environment,
};

/// Parses newline-delimited `name=value` pairs.
///
/// The line is split at its first `=` and the value is kept verbatim. Blank
/// lines and lines starting with `#` are skipped.
pub fn parse_overrides(text: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((name, value)) = line.split_once('=') else {
            return Err(NatRegError::Override {
                line: line_no,
                message: format!("expected name=value, found `{trimmed}`"),
            });
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(NatRegError::Override {
                line: line_no,
                message: "override name must not be empty".into(),
            });
        }
        pairs.push((name.to_string(), value.to_string()));
    }
    Ok(pairs)
}

pub fn apply_overrides(env: &mut Environment, text: &str) -> Result<usize> {
    let pairs = parse_overrides(text)?;
    let count = pairs.len();
    for (name, raw) in pairs {
        env.register_override(name, &raw);
    }
    Ok(count)
}

/// Loads an override file into `env`. A missing file is reported and skipped.
pub fn load_override_file(env: &mut Environment, path: &Path) -> Result<usize> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "environment file does not exist");
        return Ok(0);
    }
    let text = fs::read_to_string(path)?;
    let count = apply_overrides(env, &text)?;
    tracing::debug!(path = %path.display(), count, "loaded environment overrides");
    Ok(count)
}
