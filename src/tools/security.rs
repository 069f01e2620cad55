//! Password generator, password strength checker and email validator

use super::ToolInput;
use anyhow::{bail, Context, Result};
use rand::Rng;
use regex::Regex;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Strength label shown next to the chosen length
pub fn length_strength(length: u32) -> &'static str {
    match length {
        0..=7 => "Weak",
        8..=11 => "Medium",
        _ => "Strong",
    }
}

pub fn generate_password<R: Rng>(input: &ToolInput, rng: &mut R) -> Result<String> {
    let length = input.number("length", 12, 4, 50)?;

    let mut charset = String::new();
    if input.flag("uppercase", true)? {
        charset.push_str(UPPERCASE);
    }
    if input.flag("lowercase", true)? {
        charset.push_str(LOWERCASE);
    }
    if input.flag("numbers", true)? {
        charset.push_str(NUMBERS);
    }
    if input.flag("symbols", false)? {
        charset.push_str(SYMBOLS);
    }

    if charset.is_empty() {
        return Ok(String::new());
    }

    let chars: Vec<char> = charset.chars().collect();
    let password: String = (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect();

    Ok(format!("{}\nStrength: {}", password, length_strength(length)))
}

const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "123456789",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "1234567890",
    "dragon",
    "master",
    "hello",
    "login",
    "pass",
    "admin123",
    "root",
    "user",
];

const SYMBOL_CLASS: &str = r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#;

/// The seven criteria a password is scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criteria {
    pub length: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub no_spaces: bool,
    pub not_common: bool,
}

impl Criteria {
    pub fn check(password: &str) -> Result<Self> {
        let symbols = Regex::new(SYMBOL_CLASS).context("Failed to compile symbol regex")?;
        Ok(Self {
            length: password.chars().count() >= 8,
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            numbers: password.chars().any(|c| c.is_ascii_digit()),
            symbols: symbols.is_match(password),
            no_spaces: !password.chars().any(char::is_whitespace),
            not_common: !COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()),
        })
    }

    fn as_array(&self) -> [bool; 7] {
        [
            self.length,
            self.lowercase,
            self.uppercase,
            self.numbers,
            self.symbols,
            self.no_spaces,
            self.not_common,
        ]
    }

    pub fn passed(&self) -> usize {
        self.as_array().iter().filter(|&&ok| ok).count()
    }
}

/// Score (0-100) and level for a password
pub fn strength(password: &str) -> Result<(u32, &'static str)> {
    if password.is_empty() {
        return Ok((0, "None"));
    }
    let criteria = Criteria::check(password)?;
    let score = (criteria.passed() as f64 / 7.0 * 100.0).round() as u32;
    let level = match score {
        0..=29 => "Very Weak",
        30..=49 => "Weak",
        50..=69 => "Fair",
        70..=89 => "Good",
        _ => "Excellent",
    };
    Ok((score, level))
}

/// Brute-force estimate at one billion guesses per second
pub fn time_to_crack(password: &str) -> Result<String> {
    if password.is_empty() {
        return Ok("N/A".to_string());
    }
    let criteria = Criteria::check(password)?;
    let mut pool = 0u32;
    if criteria.lowercase {
        pool += 26;
    }
    if criteria.uppercase {
        pool += 26;
    }
    if criteria.numbers {
        pool += 10;
    }
    if criteria.symbols {
        pool += 32;
    }

    let combinations = f64::from(pool).powi(password.chars().count() as i32);
    let seconds = combinations / (2.0 * 1_000_000_000.0);

    let estimate = if seconds < 60.0 {
        "Less than a minute".to_string()
    } else if seconds < 3600.0 {
        format!("{} minutes", (seconds / 60.0).round())
    } else if seconds < 86_400.0 {
        format!("{} hours", (seconds / 3600.0).round())
    } else if seconds < 31_536_000.0 {
        format!("{} days", (seconds / 86_400.0).round())
    } else if seconds < 31_536_000_000.0 {
        format!("{} years", (seconds / 31_536_000.0).round())
    } else {
        "Centuries".to_string()
    };
    Ok(estimate)
}

pub fn suggestions(criteria: &Criteria) -> Vec<&'static str> {
    let mut out = Vec::new();
    if !criteria.length {
        out.push("Use at least 8 characters");
    }
    if !criteria.lowercase {
        out.push("Add lowercase letters (a-z)");
    }
    if !criteria.uppercase {
        out.push("Add uppercase letters (A-Z)");
    }
    if !criteria.numbers {
        out.push("Add numbers (0-9)");
    }
    if !criteria.symbols {
        out.push("Add special characters (!@#$%^&*)");
    }
    if !criteria.no_spaces {
        out.push("Remove spaces");
    }
    if !criteria.not_common {
        out.push("Avoid common passwords");
    }
    if out.is_empty() {
        out.push("Consider making it even longer for maximum security");
    }
    out
}

pub fn check_strength(input: &ToolInput) -> Result<String> {
    let password = input.text.as_str();
    if password.is_empty() {
        bail!("Enter a password to analyze");
    }

    let criteria = Criteria::check(password)?;
    let (score, level) = strength(password)?;
    let entropy = (password.chars().count() as f64 * 95f64.log2()).round();

    let mut out = format!(
        "Strength: {} ({}%)\nTime to crack: {}\nEntropy: {} bits\nSuggestions:",
        level,
        score,
        time_to_crack(password)?,
        entropy
    );
    for suggestion in suggestions(&criteria) {
        out.push_str("\n  - ");
        out.push_str(suggestion);
    }
    Ok(out)
}

/// Outcome of validating one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCheck {
    pub valid: bool,
    pub reason: &'static str,
    pub suggestions: Vec<&'static str>,
}

pub fn check_email(email: &str) -> Result<EmailCheck> {
    let shape = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").context("Failed to compile email regex")?;

    if !shape.is_match(email) {
        return Ok(EmailCheck {
            valid: false,
            reason: "Invalid email format",
            suggestions: vec![
                "Check for typos",
                "Ensure @ symbol is present",
                "Include domain extension",
            ],
        });
    }

    // the shape check guarantees exactly one '@'
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));

    if domain.contains("..") {
        return Ok(EmailCheck {
            valid: false,
            reason: "Domain contains consecutive dots",
            suggestions: vec!["Remove extra dots from domain"],
        });
    }

    if local.chars().count() > 64 {
        return Ok(EmailCheck {
            valid: false,
            reason: "Local part too long (max 64 characters)",
            suggestions: vec!["Shorten the part before @ symbol"],
        });
    }

    Ok(EmailCheck {
        valid: true,
        reason: "Valid email format",
        suggestions: Vec::new(),
    })
}

pub fn validate_email(input: &ToolInput) -> Result<String> {
    let email = input.text.trim();
    if email.is_empty() {
        bail!("Enter an email address to validate");
    }

    let check = check_email(email)?;
    let mut out = format!(
        "{}: {}",
        if check.valid { "Valid" } else { "Invalid" },
        check.reason
    );
    for suggestion in &check.suggestions {
        out.push_str("\n  - ");
        out.push_str(suggestion);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_password_default() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = generate_password(&ToolInput::new(""), &mut rng).unwrap();
        let (password, strength) = out.split_once('\n').unwrap();
        assert_eq!(password.len(), 12);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(strength, "Strength: Strong");
    }

    #[test]
    fn test_generate_password_numbers_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = ToolInput::new("")
            .with_option("length", "6")
            .with_option("uppercase", "false")
            .with_option("lowercase", "false");
        let out = generate_password(&input, &mut rng).unwrap();
        let password = out.lines().next().unwrap();
        assert_eq!(password.len(), 6);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
        assert!(out.ends_with("Weak"));
    }

    #[test]
    fn test_generate_password_empty_charset() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = ToolInput::new("")
            .with_option("uppercase", "no")
            .with_option("lowercase", "no")
            .with_option("numbers", "no");
        assert_eq!(generate_password(&input, &mut rng).unwrap(), "");
    }

    #[test]
    fn test_length_strength() {
        assert_eq!(length_strength(4), "Weak");
        assert_eq!(length_strength(8), "Medium");
        assert_eq!(length_strength(12), "Strong");
    }

    #[test]
    fn test_strength_levels() {
        assert_eq!(strength("").unwrap(), (0, "None"));
        // length, lowercase and no spaces pass; the rest fail
        assert_eq!(strength("password").unwrap(), (43, "Weak"));
        assert_eq!(strength("Tr0ub4dor&3x").unwrap(), (100, "Excellent"));
    }

    #[test]
    fn test_time_to_crack() {
        assert_eq!(time_to_crack("abc").unwrap(), "Less than a minute");
        assert_eq!(time_to_crack("Tr0ub4dor&3xQ!zz").unwrap(), "Centuries");
    }

    #[test]
    fn test_suggestions_for_strong_password() {
        let criteria = Criteria::check("Tr0ub4dor&3x").unwrap();
        assert_eq!(
            suggestions(&criteria),
            vec!["Consider making it even longer for maximum security"]
        );
    }

    #[test]
    fn test_check_strength_report() {
        let out = check_strength(&ToolInput::new("abc")).unwrap();
        assert!(out.contains("Entropy: 20 bits"));
        assert!(out.contains("Suggestions:\n  - Use at least 8 characters\n  - "));
        assert!(!out.ends_with('\n'));
        assert!(check_strength(&ToolInput::new("")).is_err());
    }

    #[test]
    fn test_check_email() {
        assert!(check_email("user@example.com").unwrap().valid);

        let bad = check_email("user.example.com").unwrap();
        assert!(!bad.valid);
        assert_eq!(bad.reason, "Invalid email format");

        let dots = check_email("user@example..com").unwrap();
        assert_eq!(dots.reason, "Domain contains consecutive dots");

        let long_local = format!("{}@example.com", "a".repeat(65));
        assert!(!check_email(&long_local).unwrap().valid);
    }

    #[test]
    fn test_validate_email_output() {
        let out = validate_email(&ToolInput::new(" user@example.com\n")).unwrap();
        assert_eq!(out, "Valid: Valid email format");
    }
}
