//! Markup tools: Markdown to HTML, CSS generator and CSS beautifier
//!
//! The Markdown converter is a chain of regex rewrites, not a CommonMark
//! parser. Rules run in order and each sees the output of the previous one.

use super::ToolInput;
use anyhow::{bail, Context, Result};
use regex::{Captures, Regex};

/// (pattern, replacement) rewrites applied before tables and line breaks
const MARKDOWN_RULES: &[(&str, &str)] = &[
    (r"```(\w+)?\n([\s\S]*?)```", "<pre><code>${2}</code></pre>"),
    (r"(?m)^### (.*)$", "<h3>${1}</h3>"),
    (r"(?m)^## (.*)$", "<h2>${1}</h2>"),
    (r"(?m)^# (.*)$", "<h1>${1}</h1>"),
    (r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
    (r"\*(.+?)\*", "<em>${1}</em>"),
    (r"`([^`]+)`", "<code>${1}</code>"),
    (r"\[([^\]]+)\]\(([^)]+)\)", r#"<a href="${2}">${1}</a>"#),
    (r"(?m)^> (.*)$", "<blockquote>${1}</blockquote>"),
    (r"(?m)^---$", "<hr>"),
];

/// Convert Markdown to an HTML fragment
pub fn markdown_to_html(md: &str) -> Result<String> {
    let mut html = md.to_string();
    for (pattern, replacement) in MARKDOWN_RULES {
        let re = Regex::new(pattern)
            .with_context(|| format!("Failed to compile markdown pattern: {}", pattern))?;
        html = re.replace_all(&html, *replacement).into_owned();
    }

    let row = Regex::new(r"\|(.+)\|").context("Failed to compile table row regex")?;
    html = row
        .replace_all(&html, |caps: &Captures| {
            let cells: String = caps[1]
                .split('|')
                .map(|cell| format!("<td>{}</td>", cell.trim()))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .into_owned();

    // All rows, first to last, share one table
    let rows = Regex::new(r"(?s)(<tr>.*</tr>)").context("Failed to compile table regex")?;
    html = rows.replace(&html, "<table>${1}</table>").into_owned();

    Ok(html.replace('\n', "<br>"))
}

pub fn markdown(input: &ToolInput) -> Result<String> {
    markdown_to_html(&input.text)
}

const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "groove", "ridge"];

fn gradient_css(input: &ToolInput) -> Result<String> {
    let kind = input.choice("type", &["linear", "radial"], "linear")?;
    let direction = input.option("direction").unwrap_or("to right");
    let colors: Vec<&str> = input
        .option("colors")
        .unwrap_or("#3B82F6,#8B5CF6,#EC4899")
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if colors.len() < 2 {
        bail!("A gradient needs at least two colors");
    }

    let stops = colors.join(", ");
    Ok(match kind {
        "radial" => format!("background: radial-gradient(circle, {});", stops),
        _ => format!("background: linear-gradient({}, {});", direction, stops),
    })
}

fn shadow_css(input: &ToolInput) -> Result<String> {
    let x = input.integer("x", 0, -50, 50)?;
    let y = input.integer("y", 4, -50, 50)?;
    let blur = input.integer("blur", 6, 0, 50)?;
    let spread = input.integer("spread", 0, -20, 20)?;
    let opacity = input.number("opacity", 25, 0, 100)?;
    let inset = input.flag("inset", false)?;
    let color = input.option("color").unwrap_or("#000000");

    // Opacity becomes a two-digit hex alpha suffix
    let alpha = (f64::from(opacity) * 2.55).round() as u8;
    Ok(format!(
        "box-shadow: {}{}px {}px {}px {}px {}{:02x};",
        if inset { "inset " } else { "" },
        x,
        y,
        blur,
        spread,
        color,
        alpha
    ))
}

fn border_css(input: &ToolInput) -> Result<String> {
    let width = input.number("width", 2, 0, 20)?;
    let style = input.choice("style", BORDER_STYLES, "solid")?;
    let color = input.option("color").unwrap_or("#3B82F6");
    let radius = input.number("radius", 8, 0, 50)?;
    Ok(format!(
        "border: {}px {} {};\nborder-radius: {}px;",
        width, style, color, radius
    ))
}

/// CSS declarations for a gradient, box shadow or border
pub fn generate_css(input: &ToolInput) -> Result<String> {
    match input.choice("kind", &["gradient", "shadow", "border"], "gradient")? {
        "shadow" => shadow_css(input),
        "border" => border_css(input),
        _ => gradient_css(input),
    }
}

/// Re-indent CSS one declaration per line
pub fn beautify_css(css: &str, indent: usize) -> Result<String> {
    if css.trim().is_empty() {
        return Ok(String::new());
    }

    let mut formatted = css.to_string();
    for (pattern, replacement) in [
        (r"\s+", " "),
        (r"\{", " {\n"),
        (r"\}", "\n}\n"),
        (r";", ";\n"),
        (r"\n\s*\n", "\n"),
    ] {
        let re = Regex::new(pattern)
            .with_context(|| format!("Failed to compile beautifier pattern: {}", pattern))?;
        formatted = re.replace_all(&formatted, replacement).into_owned();
    }

    let unit = " ".repeat(indent);
    let mut level = 0usize;
    let lines: Vec<String> = formatted
        .trim()
        .lines()
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return String::new();
            }
            if line.contains('}') {
                level = level.saturating_sub(1);
            }
            let indented = format!("{}{}", unit.repeat(level), line);
            if line.contains('{') {
                level += 1;
            }
            indented
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn beautify(input: &ToolInput) -> Result<String> {
    let indent = input.choice("indent", &["2", "4"], "2")?;
    beautify_css(&input.text, if indent == "4" { 4 } else { 2 })
}
