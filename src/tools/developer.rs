//! Developer tools: Base64, hashes, JSON, regex and code minification

use super::ToolInput;
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

pub fn base64(input: &ToolInput) -> Result<String> {
    let mode = input.choice("mode", &["encode", "decode"], "encode")?;
    if input.text.trim().is_empty() {
        return Ok(String::new());
    }

    match mode {
        "decode" => {
            let invalid = || anyhow!("Invalid input for decoding. Please check your Base64 string.");
            let bytes = STANDARD
                .decode(input.text.trim())
                .map_err(|_| invalid())?;
            String::from_utf8(bytes).map_err(|_| invalid())
        }
        _ => Ok(STANDARD.encode(input.text.as_bytes())),
    }
}

fn digest_hex<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

pub fn hashes(input: &ToolInput) -> Result<String> {
    let data = input.text.as_bytes();
    Ok(format!(
        "SHA-1: {}\nSHA-256: {}\nSHA-512: {}",
        digest_hex::<Sha1>(data),
        digest_hex::<Sha256>(data),
        digest_hex::<Sha512>(data),
    ))
}

const INVALID_JSON: &str = "Invalid JSON format. Please check your syntax.";

pub fn format_json(input: &ToolInput) -> Result<String> {
    let mode = input.choice("mode", &["format", "minify"], "format")?;
    let indent = input.choice("indent", &["2", "4"], "2")?;

    let value: serde_json::Value =
        serde_json::from_str(&input.text).map_err(|_| anyhow!(INVALID_JSON))?;

    if mode == "minify" {
        return serde_json::to_string(&value).context("Failed to serialize JSON");
    }

    let indent_bytes: &[u8] = if indent == "4" { b"    " } else { b"  " };
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    String::from_utf8(buf).context("Serialized JSON was not UTF-8")
}

/// One regex match with its byte span and capture groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub groups: Vec<Option<String>>,
}

/// Run `pattern` over `haystack` with JavaScript-style flags (`g i m s`;
/// `u` is accepted and always on)
pub fn find_matches(pattern: &str, flags: &str, haystack: &str) -> Result<Vec<RegexMatch>> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(bad) = flags.chars().find(|c| !"gimsu".contains(*c)) {
        bail!("Unsupported regex flag: '{}'", bad);
    }

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
        .map_err(|_| anyhow!("Invalid regular expression"))?;

    let to_match = |caps: regex::Captures| {
        let whole = caps.get(0)?;
        Some(RegexMatch {
            start: whole.start(),
            end: whole.end(),
            text: whole.as_str().to_string(),
            groups: caps
                .iter()
                .skip(1)
                .map(|g| g.map(|m| m.as_str().to_string()))
                .collect(),
        })
    };

    let matches = if flags.contains('g') {
        regex.captures_iter(haystack).filter_map(to_match).collect()
    } else {
        regex.captures(haystack).and_then(to_match).into_iter().collect()
    };
    Ok(matches)
}

pub fn test_regex(input: &ToolInput) -> Result<String> {
    let pattern = input.option("pattern").unwrap_or_default();
    let flags = input.option("flags").unwrap_or("g");
    let matches = find_matches(pattern, flags, &input.text)?;

    let mut lines = vec![format!(
        "{} match{}",
        matches.len(),
        if matches.len() == 1 { "" } else { "es" }
    )];
    for (i, m) in matches.iter().enumerate() {
        lines.push(format!("[{}] {}..{}: {:?}", i + 1, m.start, m.end, m.text));
        for (g, group) in m.groups.iter().enumerate() {
            lines.push(match group {
                Some(text) => format!("    ${}: {:?}", g + 1, text),
                None => format!("    ${}: (no match)", g + 1),
            });
        }
    }
    Ok(lines.join("\n"))
}

/// Apply a chain of (pattern, replacement) rewrites
fn rewrite(source: &str, rules: &[(&str, &str)]) -> Result<String> {
    let mut out = source.to_string();
    for (pattern, replacement) in rules {
        let re = Regex::new(pattern)
            .with_context(|| format!("Failed to compile minifier pattern: {}", pattern))?;
        out = re.replace_all(&out, *replacement).into_owned();
    }
    Ok(out.trim().to_string())
}

const HTML_RULES: &[(&str, &str)] = &[
    (r"<!--[\s\S]*?-->", ""),
    (r"\s+", " "),
    (r">\s+<", "><"),
    (r"\s+>", ">"),
    (r"<\s+", "<"),
];

const CSS_RULES: &[(&str, &str)] = &[
    (r"/\*[\s\S]*?\*/", ""),
    (r"\s+", " "),
    (r";\s*\}", "}"),
    (r"\s*\{\s*", "{"),
    (r";\s*", ";"),
    (r",\s*", ","),
    (r":\s*", ":"),
];

const JS_RULES: &[(&str, &str)] = &[
    (r"/\*[\s\S]*?\*/", ""),
    (r"(?m)//.*$", ""),
    (r"\s+", " "),
    (r";\s*\}", "}"),
    (r"\s*\{\s*", "{"),
    (r";\s*", ";"),
    (r",\s*", ","),
    (r"\s*=\s*", "="),
    (r"\s*\+\s*", "+"),
    (r"\s*-\s*", "-"),
    (r"\s*\*\s*", "*"),
    (r"\s*/\s*", "/"),
];

/// Minify HTML, CSS or JavaScript source
pub fn minify_source(source: &str, lang: &str) -> Result<String> {
    let rules = match lang {
        "html" => HTML_RULES,
        "css" => CSS_RULES,
        "js" => JS_RULES,
        other => bail!("Unsupported language: {}", other),
    };
    rewrite(source, rules)
}

fn format_bytes(bytes: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let sizes = ["Bytes", "KB", "MB"];
    let i = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let i = i.min(sizes.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(i as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, sizes[i])
}

pub fn minify(input: &ToolInput) -> Result<String> {
    let lang = input.choice("lang", &["html", "css", "js"], "html")?;
    if input.text.trim().is_empty() {
        return Ok(String::new());
    }

    let minified = minify_source(&input.text, lang)?;
    let original_size = input.text.len();
    let minified_size = minified.len();
    let savings =
        ((original_size as f64 - minified_size as f64) / original_size as f64 * 100.0).round();

    Ok(format!(
        "{}\n\nOriginal: {} | Minified: {} | Savings: {}%",
        minified,
        format_bytes(original_size),
        format_bytes(minified_size),
        savings
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode_decode() {
        let encoded = base64(&ToolInput::new("héllo")).unwrap();
        assert_eq!(encoded, "aMOpbGxv");

        let input = ToolInput::new("aMOpbGxv").with_option("mode", "decode");
        assert_eq!(base64(&input).unwrap(), "héllo");
    }

    #[test]
    fn test_base64_invalid_decode() {
        let input = ToolInput::new("!!not base64!!").with_option("mode", "decode");
        let err = base64(&input).unwrap_err();
        assert!(err.to_string().contains("Please check your Base64 string"));
    }

    #[test]
    fn test_base64_blank_input() {
        assert_eq!(base64(&ToolInput::new("   ")).unwrap(), "");
    }

    #[test]
    fn test_hashes() {
        let out = hashes(&ToolInput::new("abc")).unwrap();
        assert!(out.contains("SHA-1: a9993e364706816aba3e25717850c26c9cd0d89d"));
        assert!(out.contains(
            "SHA-256: ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        ));
        assert!(out.contains("SHA-512: ddaf35a193617abacc417349ae204131"));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_format_json() {
        let input = ToolInput::new(r#"{"a":[1,2]}"#);
        assert_eq!(format_json(&input).unwrap(), "{\n  \"a\": [\n    1,\n    2\n  ]\n}");

        let input = ToolInput::new(r#"{"a":1}"#).with_option("indent", "4");
        assert_eq!(format_json(&input).unwrap(), "{\n    \"a\": 1\n}");

        let input = ToolInput::new("{ \"a\" : 1 }").with_option("mode", "minify");
        assert_eq!(format_json(&input).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_format_json_invalid() {
        let err = format_json(&ToolInput::new("{a:1}")).unwrap_err();
        assert_eq!(err.to_string(), INVALID_JSON);
    }

    #[test]
    fn test_find_matches_global_and_single() {
        let all = find_matches(r"(\d)(x)?", "g", "a1b2").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].start, 1);
        assert_eq!(all[0].groups, vec![Some("1".to_string()), None]);

        let first = find_matches(r"\d", "", "a1b2").unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, "1");
    }

    #[test]
    fn test_find_matches_case_insensitive() {
        let found = find_matches("hello", "gi", "Hello HELLO").unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_find_matches_errors() {
        let err = find_matches("(", "g", "x").unwrap_err();
        assert_eq!(err.to_string(), "Invalid regular expression");
        assert!(find_matches("a", "gy", "a").is_err());
        assert!(find_matches("", "g", "abc").unwrap().is_empty());
    }

    #[test]
    fn test_regex_report() {
        let input = ToolInput::new("cat bat").with_option("pattern", "[cb]at");
        let out = test_regex(&input).unwrap();
        assert!(out.starts_with("2 matches"));
        assert!(out.contains("[2] 4..7: \"bat\""));
    }

    #[test]
    fn test_regex_report_lists_groups() {
        let input = ToolInput::new("a1")
            .with_option("pattern", r"([a-z])(\d)(x)?")
            .with_option("flags", "");
        let out = test_regex(&input).unwrap();
        assert_eq!(
            out,
            "1 match\n[1] 0..2: \"a1\"\n    $1: \"a\"\n    $2: \"1\"\n    $3: (no match)"
        );
    }

    #[test]
    fn test_minify_css() {
        let css = "/* c */\nbody {\n  color: red;\n  margin: 0;\n}\n";
        assert_eq!(minify_source(css, "css").unwrap(), "body{color:red;margin:0}");
    }

    #[test]
    fn test_minify_html() {
        let html = "<!-- note -->\n<div>\n  <p> hi </p>\n</div>";
        assert_eq!(minify_source(html, "html").unwrap(), "<div><p> hi </p></div>");
    }

    #[test]
    fn test_minify_js() {
        let js = "// comment\nlet a = 1 + 2;\nfunction f() {\n  return a;\n}";
        assert_eq!(
            minify_source(js, "js").unwrap(),
            "let a=1+2;function f(){return a}"
        );
    }

    #[test]
    fn test_minify_report() {
        let input = ToolInput::new("body {  }").with_option("lang", "css");
        let out = minify(&input).unwrap();
        assert!(out.contains("Savings:"));
        assert!(minify(&ToolInput::new("  ")).unwrap().is_empty());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
    }
}
