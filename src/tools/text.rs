//! Text tools: formatter, counter and lorem ipsum generator

use super::ToolInput;
use anyhow::{Context, Result};
use rand::Rng;
use regex::Regex;

/// Formatting modes in display order: (option value, label)
pub const FORMAT_MODES: &[(&str, &str)] = &[
    ("uppercase", "UPPERCASE"),
    ("lowercase", "lowercase"),
    ("capitalize", "Capitalize"),
    ("reverse", "Reverse"),
    ("remove-spaces", "Remove Spaces"),
    ("remove-line-breaks", "Remove Line Breaks"),
];

/// Apply a single formatting mode
pub fn apply_format(text: &str, mode: &str) -> Result<String> {
    let formatted = match mode {
        "uppercase" => text.to_uppercase(),
        "lowercase" => text.to_lowercase(),
        "capitalize" => {
            let word_start = Regex::new(r"\b\w").context("Failed to compile word regex")?;
            word_start
                .replace_all(text, |caps: &regex::Captures| caps[0].to_uppercase())
                .into_owned()
        }
        "reverse" => text.chars().rev().collect(),
        "remove-spaces" => {
            let whitespace = Regex::new(r"\s+").context("Failed to compile whitespace regex")?;
            whitespace.replace_all(text, "").into_owned()
        }
        "remove-line-breaks" => text.replace('\n', " "),
        other => anyhow::bail!("Unknown format mode: {}", other),
    };
    Ok(formatted)
}

/// Text formatter. Without a `mode` option every mode is rendered.
pub fn format_text(input: &ToolInput) -> Result<String> {
    let modes: Vec<&str> = FORMAT_MODES.iter().map(|(mode, _)| *mode).collect();

    if input.option("mode").is_some() {
        let mode = input.choice("mode", &modes, "uppercase")?;
        return apply_format(&input.text, mode);
    }

    let sections = FORMAT_MODES
        .iter()
        .map(|(mode, label)| Ok(format!("{}:\n{}", label, apply_format(&input.text, mode)?)))
        .collect::<Result<Vec<String>>>()?;
    Ok(sections.join("\n\n"))
}

/// Statistics reported by the text counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub lines: usize,
    /// Minutes, at 200 words per minute, rounded up
    pub reading_time: usize,
}

pub fn text_stats(text: &str) -> Result<TextStats> {
    let blank = text.trim().is_empty();

    let sentence_split = Regex::new(r"[.!?]+").context("Failed to compile sentence regex")?;
    let paragraph_split =
        Regex::new(r"\n\s*\n").context("Failed to compile paragraph regex")?;

    let words = if blank {
        0
    } else {
        text.split_whitespace().count()
    };

    let sentences = if blank {
        0
    } else {
        sentence_split
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count()
    };

    let paragraphs = if blank {
        0
    } else {
        paragraph_split
            .split(text)
            .filter(|p| !p.trim().is_empty())
            .count()
    };

    Ok(TextStats {
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        words,
        sentences,
        paragraphs,
        lines: if text.is_empty() {
            0
        } else {
            text.split('\n').count()
        },
        reading_time: words.div_ceil(200),
    })
}

pub fn count_text(input: &ToolInput) -> Result<String> {
    let stats = text_stats(&input.text)?;
    let plural = if stats.reading_time == 1 { "" } else { "s" };

    Ok(format!(
        "Characters: {}\n\
         Characters (no spaces): {}\n\
         Words: {}\n\
         Sentences: {}\n\
         Paragraphs: {}\n\
         Lines: {}\n\
         Estimated Reading Time: {} minute{}",
        stats.characters,
        stats.characters_no_spaces,
        stats.words,
        stats.sentences,
        stats.paragraphs,
        stats.lines,
        stats.reading_time,
        plural
    ))
}

const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint",
    "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia", "deserunt",
    "mollit", "anim", "id", "est", "laborum",
];

const LOREM_SENTENCE: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

const LOREM_PARAGRAPH: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in \
reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.";

fn random_words<R: Rng>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| LOREM_WORDS[rng.gen_range(0..LOREM_WORDS.len())].to_string())
        .collect()
}

fn random_sentence<R: Rng>(rng: &mut R) -> String {
    let count = rng.gen_range(5..15);
    let mut words = random_words(rng, count);
    if let Some(first) = words.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().chain(chars).collect();
        }
    }
    format!("{}.", words.join(" "))
}

fn random_paragraph<R: Rng>(rng: &mut R) -> String {
    let count = rng.gen_range(3..8);
    (0..count)
        .map(|_| random_sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Placeholder text generator
pub fn lorem_ipsum<R: Rng>(input: &ToolInput, rng: &mut R) -> Result<String> {
    let count = input.number("count", 3, 1, 50)? as usize;
    let unit = input.choice("unit", &["paragraphs", "sentences", "words"], "paragraphs")?;
    let classic_start = input.flag("start-with-lorem", true)?;

    let text = match unit {
        "words" => {
            let mut words = random_words(rng, count);
            if classic_start {
                words[0] = "Lorem".to_string();
                if count > 1 {
                    words[1] = "ipsum".to_string();
                }
            }
            words.join(" ")
        }
        "sentences" => {
            let mut sentences: Vec<String> = (0..count).map(|_| random_sentence(rng)).collect();
            if classic_start {
                sentences[0] = LOREM_SENTENCE.to_string();
            }
            sentences.join(" ")
        }
        _ => {
            let mut paragraphs: Vec<String> = (0..count).map(|_| random_paragraph(rng)).collect();
            if classic_start {
                paragraphs[0] = LOREM_PARAGRAPH.to_string();
            }
            paragraphs.join("\n\n")
        }
    };

    Ok(text)
}
