use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

pub const MAX_CODE_LINES: usize = 100;
pub const MAX_CODE_CHARS: usize = 5000;

static DANGEROUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"require\(['"]fs['"]\)"#,
        r#"require\(['"]child_process['"]\)"#,
        r#"require\(['"]net['"]\)"#,
        r"execSync|spawnSync",
        r"process\.exit",
        r"while\s*\(true\)",
        r"for\s*\(;;\)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static EVAL_CALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"eval\(").unwrap());

static FUNCTION_DECL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function\s+(\w+)\s*\(").unwrap());
static ARROW_FN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"const\s+(\w+)\s*=\s*\([^)]*\)\s*=>").unwrap());
static VAR_FN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var\s+(\w+)\s*=\s*function\s*\(").unwrap());

/// Comments out constructs that escape the sandbox or never terminate.
pub fn sanitize_code(code: &str, language: &str) -> String {
    let mut sanitized = code.to_string();
    for pattern in DANGEROUS_PATTERNS.iter() {
        sanitized = pattern
            .replace_all(&sanitized, "// Restricted: $0")
            .into_owned();
    }

    if language.eq_ignore_ascii_case("javascript") {
        sanitized = EVAL_CALL_RE
            .replace_all(&sanitized, "// eval() is disabled for security reasons: ")
            .into_owned();
    }

    sanitized
}

/// Finds the entry function, preferring what the code declares over the
/// problem's expected name. Returns `None` if the chosen name never appears.
pub fn extract_function_name(code: &str, expected: Option<&str>) -> Option<String> {
    let declared = [&*FUNCTION_DECL_RE, &*ARROW_FN_RE, &*VAR_FN_RE]
        .iter()
        .find_map(|re| re.captures(code).map(|caps| caps[1].to_string()));

    let name = declared.or_else(|| expected.map(str::to_string))?;
    if !name.is_empty() && code.contains(&name) {
        Some(name)
    } else {
        None
    }
}

pub fn validate_code_structure(code: &str) -> Result<()> {
    if code.split('\n').count() > MAX_CODE_LINES {
        return Err(Error::BadRequest(format!(
            "Code too long (max {} lines allowed)",
            MAX_CODE_LINES
        )));
    }
    if code.chars().count() > MAX_CODE_CHARS {
        return Err(Error::BadRequest(format!(
            "Code too large (max {} characters)",
            MAX_CODE_CHARS
        )));
    }
    Ok(())
}
