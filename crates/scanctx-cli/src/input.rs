//! Loading normalized report documents from disk or stdin.

use anyhow::{Context, Result};
use scanctx_core::{Evaluation, Profile};
use std::io::Read;
use std::path::Path;

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read report from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn parse<T>(path: &Path, what: &str, decode: fn(&str) -> serde_json::Result<T>) -> Result<T> {
    let raw = read_source(path)?;
    decode(&raw).with_context(|| format!("{} is not a valid normalized {what}", path.display()))
}

pub fn load_evaluation(path: &Path) -> Result<Evaluation> {
    let evaluation = parse(path, "evaluation", Evaluation::from_json_str)?;
    tracing::debug!(
        path = %path.display(),
        profiles = evaluation.profiles.len(),
        "Loaded evaluation"
    );
    Ok(evaluation)
}

pub fn load_profile(path: &Path) -> Result<Profile> {
    parse(path, "profile", Profile::from_json_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_evaluation_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"profiles": [{{"name": "p", "controls": []}}]}}"#).unwrap();
        let eval = load_evaluation(file.path()).unwrap();
        assert_eq!(eval.profiles[0].name, "p");
    }

    #[test]
    fn test_bad_json_mentions_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_profile(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("is not a valid normalized profile"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_evaluation(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
