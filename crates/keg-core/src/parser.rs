//! Parse formula files (TOML and JSON) and resolve formula names to paths.

use std::path::{Path, PathBuf};

use crate::formula::{Formula, FormulaError, Result};

/// Suffixes tried when resolving a bare formula name.
const SUFFIXES: &[&str] = &[".toml", ".json"];

/// Parse a formula from a TOML string. `origin` is recorded as the formula's
/// source (a path, or a label like `<inline>`).
pub fn parse_toml(content: &str, origin: &str) -> Result<Formula> {
    let mut formula: Formula = toml::from_str(content).map_err(|e| FormulaError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    formula.source = origin.to_string();
    Ok(formula)
}

/// Parse a formula from a JSON string.
pub fn parse_json(content: &str, origin: &str) -> Result<Formula> {
    let mut formula: Formula = serde_json::from_str(content).map_err(|e| FormulaError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    formula.source = origin.to_string();
    Ok(formula)
}

/// Load a formula from a file path (auto-detect TOML vs JSON by extension).
pub fn load_formula(path: &Path) -> Result<Formula> {
    let content = std::fs::read_to_string(path)?;
    let origin = path.display().to_string();
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content, &origin),
        Some("json") => parse_json(&content, &origin),
        _ => {
            // Try JSON first, then TOML
            parse_json(&content, &origin).or_else(|_| parse_toml(&content, &origin))
        }
    }
}

/// Search for a formula by name.
///
/// Search order:
/// 1. Exact path (absolute, or relative to `cwd`)
/// 2. `cwd` with standard extensions
/// 3. Each tap directory in order, with standard extensions
pub fn find_formula(name: &str, cwd: &Path, taps: &[PathBuf]) -> Result<PathBuf> {
    // 1. Exact path
    let exact = Path::new(name);
    if exact.is_absolute() && exact.is_file() {
        return Ok(exact.to_path_buf());
    }
    let relative = cwd.join(name);
    if relative.is_file() {
        return Ok(relative);
    }

    // 2. Current directory
    for suffix in SUFFIXES {
        let candidate = cwd.join(format!("{}{}", name, suffix));
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    // 3. Tap directories
    for tap in taps {
        if !tap.is_dir() {
            continue;
        }
        for suffix in SUFFIXES {
            let candidate = tap.join(format!("{}{}", name, suffix));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    let mut searched = vec![cwd.display().to_string()];
    searched.extend(taps.iter().map(|t| t.display().to_string()));
    Err(FormulaError::NotFound {
        name: name.to_string(),
        searched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::{Dependency, RequirementLevel};
    use pretty_assertions::assert_eq;

    const ACLTOOL_TOML: &str = r#"
name = "acltool"
desc = "ACL manipulation tool"
homepage = "https://github.com/ptrrkssn/acltool"
url = "https://github.com/ptrrkssn/acltool/archive/v1.16.3.tar.gz"

depends_on = [
    { name = "readline", level = "recommended" },
]

install = [
    "./configure --prefix={{prefix}}",
    "make install",
]

test = [
    "{{bin}}/acltool lac -v .",
]
"#;

    #[test]
    fn parse_toml_full_formula() {
        let f = parse_toml(ACLTOOL_TOML, "<test>").unwrap();
        assert_eq!(f.name, "acltool");
        assert_eq!(f.desc, "ACL manipulation tool");
        assert_eq!(f.sha256, None);
        assert_eq!(f.resolved_version().as_deref(), Some("1.16.3"));
        assert_eq!(f.depends_on.len(), 1);
        assert_eq!(f.depends_on[0].name(), "readline");
        assert_eq!(f.depends_on[0].level(), RequirementLevel::Recommended);
        assert_eq!(f.install.len(), 2);
        assert_eq!(f.test.len(), 1);
        assert_eq!(f.source, "<test>");
    }

    #[test]
    fn parse_toml_dependency_shorthand() {
        let toml_str = r#"
name = "tool"
url = "https://example.com/tool-1.0.tar.gz"
depends_on = ["make", { name = "readline", level = "optional" }]
install = ["make install"]
"#;
        let f = parse_toml(toml_str, "<test>").unwrap();
        assert_eq!(f.depends_on.len(), 2);
        assert_eq!(f.depends_on[0], Dependency::Name("make".to_string()));
        assert!(f.depends_on[0].is_required());
        assert_eq!(f.depends_on[1].level(), RequirementLevel::Optional);
    }

    #[test]
    fn parse_json_minimal() {
        let json = r#"{
            "name": "tool",
            "url": "https://example.com/tool-1.0.tar.gz",
            "sha256": "15430b64cb493571f6e46a38482402746bee7ed134c0e99d7976d231cab1c7d5",
            "install": ["make install"]
        }"#;
        let f = parse_json(json, "<test>").unwrap();
        assert_eq!(f.name, "tool");
        assert!(f.has_checksum());
        assert_eq!(f.depends_on.len(), 0);
        assert_eq!(f.test.len(), 0);
    }

    #[test]
    fn parse_error_carries_origin() {
        let err = parse_toml("name = ", "bad.toml").unwrap_err();
        match err {
            FormulaError::Parse { path, .. } => assert_eq!(path, "bad.toml"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn load_formula_detects_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acltool.toml");
        std::fs::write(&path, ACLTOOL_TOML).unwrap();
        let f = load_formula(&path).unwrap();
        assert_eq!(f.name, "acltool");
        assert_eq!(f.source, path.display().to_string());
    }

    #[test]
    fn find_formula_checks_cwd_then_taps() {
        let cwd = tempfile::tempdir().unwrap();
        let tap = tempfile::tempdir().unwrap();
        std::fs::write(tap.path().join("acltool.toml"), ACLTOOL_TOML).unwrap();

        let taps = vec![tap.path().to_path_buf()];
        let found = find_formula("acltool", cwd.path(), &taps).unwrap();
        assert_eq!(found, tap.path().join("acltool.toml"));

        // A file in cwd shadows the tap.
        std::fs::write(cwd.path().join("acltool.toml"), ACLTOOL_TOML).unwrap();
        let found = find_formula("acltool", cwd.path(), &taps).unwrap();
        assert_eq!(found, cwd.path().join("acltool.toml"));
    }

    #[test]
    fn find_formula_accepts_exact_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acltool@1.15.toml");
        std::fs::write(&path, ACLTOOL_TOML).unwrap();

        let found = find_formula(path.to_str().unwrap(), Path::new("/nonexistent"), &[]).unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn find_formula_reports_searched_dirs() {
        let cwd = tempfile::tempdir().unwrap();
        let err = find_formula("missing", cwd.path(), &[]).unwrap_err();
        match err {
            FormulaError::NotFound { name, searched } => {
                assert_eq!(name, "missing");
                assert_eq!(searched.len(), 1);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
