//! `{{placeholder}}` substitution for install and test steps.

use std::collections::HashMap;
use std::path::Path;

/// Placeholder names available to install and test steps.
pub const STEP_VARS: &[&str] = &["prefix", "bin", "lib", "include", "share", "name", "version"];

/// Builds the substitution map for a package installed at `prefix`.
pub fn step_vars(name: &str, version: &str, prefix: &Path) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("prefix".to_string(), prefix.display().to_string());
    vars.insert("bin".to_string(), prefix.join("bin").display().to_string());
    vars.insert("lib".to_string(), prefix.join("lib").display().to_string());
    vars.insert(
        "include".to_string(),
        prefix.join("include").display().to_string(),
    );
    vars.insert(
        "share".to_string(),
        prefix.join("share").display().to_string(),
    );
    vars.insert("name".to_string(), name.to_string());
    vars.insert("version".to_string(), version.to_string());
    vars
}

/// Substitutes `{{name}}` patterns in a step string with provided values.
/// Unknown placeholders are left as written.
pub fn substitute(text: &str, vars: &HashMap<String, String>) -> String {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut result = String::with_capacity(len);
    let mut literal_from = 0;
    let mut i = 0;
    while i < len {
        if i + 4 <= len && bytes[i] == b'{' && bytes[i + 1] == b'{' {
            let start = i + 2;
            if start < len && is_name_start(bytes[start]) {
                let mut end = start + 1;
                while end < len && is_name_cont(bytes[end]) {
                    end += 1;
                }
                if end + 1 < len && bytes[end] == b'}' && bytes[end + 1] == b'}' {
                    if let Some(val) = vars.get(&text[start..end]) {
                        result.push_str(&text[literal_from..i]);
                        result.push_str(val);
                        literal_from = end + 2;
                    }
                    i = end + 2;
                    continue;
                }
            }
        }
        i += 1;
    }
    result.push_str(&text[literal_from..]);
    result
}

/// Extracts all `{{name}}` placeholder names referenced in a step string,
/// sorted and deduplicated.
pub fn placeholders(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut names: Vec<String> = Vec::new();
    let mut i = 0;
    while i + 4 <= len {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            let start = i + 2;
            if start < len && is_name_start(bytes[start]) {
                let mut end = start + 1;
                while end < len && is_name_cont(bytes[end]) {
                    end += 1;
                }
                if end + 1 < len && bytes[end] == b'}' && bytes[end + 1] == b'}' {
                    names.push(text[start..end].to_string());
                    i = end + 2;
                    continue;
                }
            }
        }
        i += 1;
    }
    names.sort();
    names.dedup();
    names
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_cont(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_known_placeholders() {
        let vars = make_vars(&[("prefix", "/opt/keg/acltool/1.15")]);
        assert_eq!(
            substitute("./configure --prefix={{prefix}}", &vars),
            "./configure --prefix=/opt/keg/acltool/1.15"
        );
    }

    #[test]
    fn unknown_placeholders_are_preserved() {
        let vars = make_vars(&[("prefix", "/opt")]);
        assert_eq!(
            substitute("cp {{prefix}}/{{mystery}} .", &vars),
            "cp /opt/{{mystery}} ."
        );
    }

    #[test]
    fn adjacent_and_repeated_placeholders() {
        let vars = make_vars(&[("name", "acltool"), ("version", "1.15")]);
        assert_eq!(
            substitute("{{name}}{{version}} {{name}}", &vars),
            "acltool1.15 acltool"
        );
    }

    #[test]
    fn malformed_braces_pass_through() {
        let vars = make_vars(&[("bin", "/opt/bin")]);
        assert_eq!(substitute("{{bin}", &vars), "{{bin}");
        assert_eq!(substitute("{ {bin}}", &vars), "{ {bin}}");
        assert_eq!(substitute("{{1bad}}", &vars), "{{1bad}}");
    }

    #[test]
    fn multibyte_text_survives_substitution() {
        let vars = make_vars(&[("name", "acltool")]);
        assert_eq!(substitute("échec {{name}} déjà", &vars), "échec acltool déjà");
    }

    #[test]
    fn placeholders_sorted_and_deduped() {
        assert_eq!(
            placeholders("{{bin}}/tool {{prefix}} {{bin}}"),
            vec!["bin".to_string(), "prefix".to_string()]
        );
        assert_eq!(placeholders("no vars here"), Vec::<String>::new());
    }

    #[test]
    fn step_vars_derive_subdirs_from_prefix() {
        let vars = step_vars("acltool", "1.15", Path::new("/cellar/acltool/1.15"));
        assert_eq!(vars["prefix"], "/cellar/acltool/1.15");
        assert_eq!(vars["bin"], "/cellar/acltool/1.15/bin");
        assert_eq!(vars["share"], "/cellar/acltool/1.15/share");
        assert_eq!(vars["name"], "acltool");
        assert_eq!(vars["version"], "1.15");
    }
}
