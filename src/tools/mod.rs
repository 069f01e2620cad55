//! # Tools Module
//!
//! The renderer registry for the catalog. Every catalog entry points at one
//! [`ToolKind`] variant, and [`ToolKind::run`] dispatches with an exhaustive
//! `match`, so adding a tool to the catalog without an implementation fails
//! to compile.
//!
//! ## Tool Groups
//!
//! | Module | Tools |
//! |--------|-------|
//! | [`text`] | text formatter, text counter, lorem ipsum |
//! | [`developer`] | Base64, hashes, JSON formatter, regex tester, code minifier |
//! | [`markup`] | Markdown to HTML, CSS generator, CSS beautifier |
//! | [`convert`] | unit converter, timestamp converter, color picker |
//! | [`security`] | password generator, password strength, email validator |
//! | [`calculator`] | chained keypad-style calculator |
//!
//! Every tool is a pure text-in/text-out transformation over a [`ToolInput`].

pub mod calculator;
pub mod convert;
pub mod developer;
pub mod markup;
pub mod security;
pub mod text;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input handed to a tool: the main text plus `key=value` options
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    pub text: String,
    pub options: BTreeMap<String, String>,
}

impl ToolInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: BTreeMap::new(),
        }
    }

    /// Builder-style option setter, mostly used by tests
    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.options.insert(key.to_string(), value.to_string());
        self
    }

    /// Parse a `key=value` pair as passed on the command line
    pub fn push_option(&mut self, raw: &str) -> Result<()> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("Option must be in key=value form: {}", raw))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("Option key must not be empty: {}", raw);
        }
        self.options.insert(key.to_string(), value.trim().to_string());
        Ok(())
    }

    /// Raw option lookup
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Boolean option; accepts true/false, yes/no, on/off, 1/0
    pub fn flag(&self, key: &str, default: bool) -> Result<bool> {
        match self.option(key) {
            None => Ok(default),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => bail!("Option '{}' expects a boolean, got '{}'", key, value),
            },
        }
    }

    /// Integer option constrained to an inclusive range
    pub fn number(&self, key: &str, default: u32, min: u32, max: u32) -> Result<u32> {
        let Some(value) = self.option(key) else {
            return Ok(default);
        };
        let parsed: u32 = value
            .parse()
            .map_err(|_| anyhow!("Option '{}' expects a number, got '{}'", key, value))?;
        if parsed < min || parsed > max {
            bail!(
                "Option '{}' must be between {} and {}, got {}",
                key,
                min,
                max,
                parsed
            );
        }
        Ok(parsed)
    }

    /// Signed integer option constrained to an inclusive range
    pub fn integer(&self, key: &str, default: i32, min: i32, max: i32) -> Result<i32> {
        let Some(value) = self.option(key) else {
            return Ok(default);
        };
        let parsed: i32 = value
            .parse()
            .map_err(|_| anyhow!("Option '{}' expects an integer, got '{}'", key, value))?;
        if !(min..=max).contains(&parsed) {
            bail!(
                "Option '{}' must be between {} and {}, got {}",
                key,
                min,
                max,
                parsed
            );
        }
        Ok(parsed)
    }

    /// Option restricted to a fixed set of values
    pub fn choice<'a>(&'a self, key: &str, allowed: &[&'a str], default: &'a str) -> Result<&'a str> {
        match self.option(key) {
            None => Ok(default),
            Some(value) if allowed.contains(&value) => Ok(value),
            Some(value) => bail!(
                "Option '{}' must be one of [{}], got '{}'",
                key,
                allowed.join(", "),
                value
            ),
        }
    }
}

/// Documentation for one accepted option key
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub key: &'static str,
    pub help: &'static str,
}

const fn opt(key: &'static str, help: &'static str) -> OptionSpec {
    OptionSpec { key, help }
}

/// Tagged reference to a tool implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    TextFormatter,
    TextCounter,
    LoremIpsum,
    MarkdownEditor,
    Calculator,
    ColorPicker,
    PasswordGenerator,
    PasswordStrength,
    EmailValidator,
    UnitConverter,
    TimestampConverter,
    Base64,
    Hash,
    CodeMinifier,
    CssGenerator,
    CssBeautifier,
    JsonFormatter,
    RegexTester,
}

impl ToolKind {
    /// Run the tool against the given input
    pub fn run(&self, input: &ToolInput) -> Result<String> {
        match self {
            Self::TextFormatter => text::format_text(input),
            Self::TextCounter => text::count_text(input),
            Self::LoremIpsum => text::lorem_ipsum(input, &mut rand::thread_rng()),
            Self::MarkdownEditor => markup::markdown(input),
            Self::Calculator => calculator::evaluate(input),
            Self::ColorPicker => convert::color_formats(input),
            Self::PasswordGenerator => security::generate_password(input, &mut rand::thread_rng()),
            Self::PasswordStrength => security::check_strength(input),
            Self::EmailValidator => security::validate_email(input),
            Self::UnitConverter => convert::convert_units(input),
            Self::TimestampConverter => convert::convert_timestamp(input, chrono::Utc::now()),
            Self::Base64 => developer::base64(input),
            Self::Hash => developer::hashes(input),
            Self::CodeMinifier => developer::minify(input),
            Self::CssGenerator => markup::generate_css(input),
            Self::CssBeautifier => markup::beautify(input),
            Self::JsonFormatter => developer::format_json(input),
            Self::RegexTester => developer::test_regex(input),
        }
    }

    /// Whether the tool reads its main text input (generators ignore it)
    pub fn takes_input(&self) -> bool {
        !matches!(
            self,
            Self::LoremIpsum | Self::PasswordGenerator | Self::CssGenerator
        )
    }

    /// Option keys the tool understands
    pub fn options(&self) -> &'static [OptionSpec] {
        match self {
            Self::TextFormatter => TEXT_FORMATTER_OPTIONS,
            Self::LoremIpsum => LOREM_OPTIONS,
            Self::PasswordGenerator => PASSWORD_OPTIONS,
            Self::UnitConverter => UNIT_OPTIONS,
            Self::Base64 => BASE64_OPTIONS,
            Self::CodeMinifier => MINIFIER_OPTIONS,
            Self::JsonFormatter => JSON_OPTIONS,
            Self::RegexTester => REGEX_OPTIONS,
            Self::CssGenerator => CSS_GENERATOR_OPTIONS,
            Self::CssBeautifier => CSS_BEAUTIFIER_OPTIONS,
            Self::TextCounter
            | Self::MarkdownEditor
            | Self::Calculator
            | Self::ColorPicker
            | Self::PasswordStrength
            | Self::EmailValidator
            | Self::TimestampConverter
            | Self::Hash => &[],
        }
    }
}

const TEXT_FORMATTER_OPTIONS: &[OptionSpec] = &[opt(
    "mode",
    "uppercase | lowercase | capitalize | reverse | remove-spaces | remove-line-breaks (default: all)",
)];

const LOREM_OPTIONS: &[OptionSpec] = &[
    opt("count", "number of units, 1-50 (default 3)"),
    opt("unit", "paragraphs | sentences | words (default paragraphs)"),
    opt("start-with-lorem", "begin with the classic opening (default true)"),
];

const PASSWORD_OPTIONS: &[OptionSpec] = &[
    opt("length", "4-50 (default 12)"),
    opt("uppercase", "include A-Z (default true)"),
    opt("lowercase", "include a-z (default true)"),
    opt("numbers", "include 0-9 (default true)"),
    opt("symbols", "include symbols (default false)"),
];

const UNIT_OPTIONS: &[OptionSpec] = &[
    opt("kind", "length | weight | temperature | volume (default length)"),
    opt("from", "source unit (default: first unit of the kind)"),
    opt("to", "target unit (default: second unit of the kind)"),
];

const BASE64_OPTIONS: &[OptionSpec] = &[opt("mode", "encode | decode (default encode)")];

const MINIFIER_OPTIONS: &[OptionSpec] = &[opt("lang", "html | css | js (default html)")];

const JSON_OPTIONS: &[OptionSpec] = &[
    opt("mode", "format | minify (default format)"),
    opt("indent", "2 | 4 (default 2)"),
];

const REGEX_OPTIONS: &[OptionSpec] = &[
    opt("pattern", "regular expression (required)"),
    opt("flags", "any of g i m s (default g)"),
];

const CSS_GENERATOR_OPTIONS: &[OptionSpec] = &[
    opt("kind", "gradient | shadow | border (default gradient)"),
    opt("type", "gradient: linear | radial (default linear)"),
    opt("direction", "gradient: e.g. to right, to bottom, 45deg (default to right)"),
    opt("colors", "gradient: comma-separated colors (default #3B82F6,#8B5CF6,#EC4899)"),
    opt("x", "shadow: offset x, -50 to 50 (default 0)"),
    opt("y", "shadow: offset y, -50 to 50 (default 4)"),
    opt("blur", "shadow: 0-50 (default 6)"),
    opt("spread", "shadow: -20 to 20 (default 0)"),
    opt("opacity", "shadow: 0-100 (default 25)"),
    opt("inset", "shadow: inner shadow (default false)"),
    opt("color", "shadow/border color (default #000000 / #3B82F6)"),
    opt("width", "border: 0-20 (default 2)"),
    opt("style", "border: solid | dashed | dotted | double | groove | ridge (default solid)"),
    opt("radius", "border: 0-50 (default 8)"),
];

const CSS_BEAUTIFIER_OPTIONS: &[OptionSpec] = &[opt("indent", "2 | 4 (default 2)")];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_option() {
        let mut input = ToolInput::new("x");
        input.push_option("mode = decode").unwrap();
        assert_eq!(input.option("mode"), Some("decode"));

        assert!(input.push_option("novalue").is_err());
        assert!(input.push_option("=x").is_err());
    }

    #[test]
    fn test_flag_parsing() {
        let input = ToolInput::new("")
            .with_option("a", "yes")
            .with_option("b", "0")
            .with_option("c", "maybe");
        assert!(input.flag("a", false).unwrap());
        assert!(!input.flag("b", true).unwrap());
        assert!(input.flag("missing", true).unwrap());
        assert!(input.flag("c", true).is_err());
    }

    #[test]
    fn test_number_range() {
        let input = ToolInput::new("").with_option("length", "60");
        assert!(input.number("length", 12, 4, 50).is_err());

        let input = ToolInput::new("").with_option("length", "20");
        assert_eq!(input.number("length", 12, 4, 50).unwrap(), 20);
        assert_eq!(input.number("other", 12, 4, 50).unwrap(), 12);
    }

    #[test]
    fn test_integer_allows_negative() {
        let input = ToolInput::new("").with_option("x", "-12");
        assert_eq!(input.integer("x", 0, -50, 50).unwrap(), -12);
        assert_eq!(input.integer("y", 4, -50, 50).unwrap(), 4);
        assert!(input.integer("x", 0, 0, 50).is_err());
    }

    #[test]
    fn test_options_listed_for_configurable_tools() {
        let keys: Vec<&str> = ToolKind::JsonFormatter
            .options()
            .iter()
            .map(|o| o.key)
            .collect();
        assert_eq!(keys, vec!["mode", "indent"]);
        assert_eq!(ToolKind::LoremIpsum.options().len(), 3);
        assert!(ToolKind::Calculator.options().is_empty());
        assert!(ToolKind::CssGenerator.options().iter().any(|o| o.key == "inset"));
    }

    #[test]
    fn test_choice_rejects_unknown() {
        let input = ToolInput::new("").with_option("mode", "rot13");
        assert!(input.choice("mode", &["encode", "decode"], "encode").is_err());
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ToolKind::JsonFormatter).unwrap();
        assert_eq!(json, "\"json-formatter\"");
    }
}
