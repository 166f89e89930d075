//! Parsers for package-manager output.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Prefix of the line the runtime probe prints, e.g. `# runtime 3.11`.
pub const RUNTIME_MARKER: &str = "# runtime ";

fn freeze_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)==(\S+)$")
            .expect("freeze pattern is valid")
    })
}

/// Parse `pip freeze` output into a name → version mapping.
///
/// Only `name==version` lines count. Editable installs, direct references
/// (`name @ url`), comments and blank lines are skipped.
pub fn parse_freeze_output(output: &str) -> BTreeMap<String, String> {
    let mut packages = BTreeMap::new();
    for line in output.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match freeze_line_regex().captures(line) {
            Some(caps) => {
                packages.insert(caps[1].to_string(), caps[2].to_string());
            }
            None => tracing::debug!("Skipping non-pinned line: {}", line),
        }
    }
    packages
}

/// Find the `major.minor` version printed by the runtime probe.
pub fn parse_runtime_probe(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(RUNTIME_MARKER))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Extract the `Version:` field from `pip show` output.
pub fn parse_show_output(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("Version:"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREEZE: &str = "\
# runtime 3.11
certifi==2024.2.2
-e git+https://github.com/org/tool.git@abc123#egg=tool
numpy==1.26.4
mylib @ file:///tmp/mylib-0.1.0-py3-none-any.whl
PyYAML==6.0.1

torch==2.2.0+cu121
";

    #[test]
    fn freeze_keeps_only_pinned_lines() {
        let packages = parse_freeze_output(FREEZE);
        assert_eq!(packages.len(), 4);
        assert_eq!(packages["numpy"], "1.26.4");
        assert_eq!(packages["PyYAML"], "6.0.1");
        assert_eq!(packages["torch"], "2.2.0+cu121");
        assert!(!packages.contains_key("mylib"));
        assert!(!packages.contains_key("tool"));
    }

    #[test]
    fn freeze_is_case_sensitive() {
        let packages = parse_freeze_output("PyYAML==6.0.1\n");
        assert!(packages.contains_key("PyYAML"));
        assert!(!packages.contains_key("pyyaml"));
    }

    #[test]
    fn freeze_handles_crlf() {
        let packages = parse_freeze_output("six==1.16.0\r\nidna==3.6\r\n");
        assert_eq!(packages["six"], "1.16.0");
        assert_eq!(packages["idna"], "3.6");
    }

    #[test]
    fn runtime_probe_found() {
        assert_eq!(parse_runtime_probe(FREEZE), Some("3.11".to_string()));
    }

    #[test]
    fn runtime_probe_missing() {
        assert_eq!(parse_runtime_probe("numpy==1.26.4\n"), None);
        assert_eq!(parse_runtime_probe("# runtime \n"), None);
    }

    #[test]
    fn show_output_version() {
        let output = "Name: requests\nVersion: 2.31.0\nSummary: Python HTTP for Humans.\n";
        assert_eq!(parse_show_output(output), Some("2.31.0".to_string()));
    }

    #[test]
    fn show_output_without_version() {
        assert_eq!(parse_show_output("WARNING: Package(s) not found: nope\n"), None);
    }
}
