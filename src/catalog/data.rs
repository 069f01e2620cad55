//! The built-in category and tool tables

use super::descriptor::{Category, CategoryDescriptor, ToolDescriptor};
use crate::tools::ToolKind;

pub static CATEGORIES: &[CategoryDescriptor] = &[
    CategoryDescriptor {
        id: Category::Text,
        name: "Text Tools",
        description: "Text formatting, conversion, and analysis tools",
        icon: "Type",
    },
    CategoryDescriptor {
        id: Category::Image,
        name: "Image Tools",
        description: "Image editing and manipulation tools",
        icon: "Image",
    },
    CategoryDescriptor {
        id: Category::Developer,
        name: "Developer Tools",
        description: "Tools for developers and programmers",
        icon: "Code",
    },
    CategoryDescriptor {
        id: Category::Converter,
        name: "Converters",
        description: "Convert between different formats and units",
        icon: "RefreshCw",
    },
    CategoryDescriptor {
        id: Category::Utility,
        name: "Utilities",
        description: "General purpose utility tools",
        icon: "Settings",
    },
    CategoryDescriptor {
        id: Category::Web,
        name: "Web Tools",
        description: "Website analysis and web development tools",
        icon: "Globe",
    },
    CategoryDescriptor {
        id: Category::Business,
        name: "Business Tools",
        description: "Professional and business productivity tools",
        icon: "Briefcase",
    },
];

pub static TOOLS: &[ToolDescriptor] = &[
    // Free tools
    ToolDescriptor {
        id: "text-formatter",
        name: "Text Formatter",
        description: "Format and transform text in various ways",
        category: Category::Text,
        icon: "Type",
        is_premium: false,
        kind: ToolKind::TextFormatter,
    },
    ToolDescriptor {
        id: "color-picker",
        name: "Color Picker",
        description: "Get color codes in different formats",
        category: Category::Utility,
        icon: "Palette",
        is_premium: false,
        kind: ToolKind::ColorPicker,
    },
    ToolDescriptor {
        id: "calculator",
        name: "Calculator",
        description: "Basic calculator for mathematical operations",
        category: Category::Utility,
        icon: "Calculator",
        is_premium: false,
        kind: ToolKind::Calculator,
    },
    ToolDescriptor {
        id: "password-generator",
        name: "Password Generator",
        description: "Generate secure passwords with customizable options",
        category: Category::Utility,
        icon: "Key",
        is_premium: false,
        kind: ToolKind::PasswordGenerator,
    },
    ToolDescriptor {
        id: "unit-converter",
        name: "Unit Converter",
        description: "Convert between different units of measurement",
        category: Category::Converter,
        icon: "Scale",
        is_premium: false,
        kind: ToolKind::UnitConverter,
    },
    ToolDescriptor {
        id: "text-counter",
        name: "Text Counter",
        description: "Count characters, words, and lines in text",
        category: Category::Text,
        icon: "Hash",
        is_premium: false,
        kind: ToolKind::TextCounter,
    },
    ToolDescriptor {
        id: "base64-encoder",
        name: "Base64 Encoder/Decoder",
        description: "Encode and decode Base64 strings",
        category: Category::Developer,
        icon: "Binary",
        is_premium: false,
        kind: ToolKind::Base64,
    },
    ToolDescriptor {
        id: "css-generator",
        name: "CSS Generator",
        description: "Generate CSS for gradients, shadows, and borders",
        category: Category::Developer,
        icon: "Palette",
        is_premium: false,
        kind: ToolKind::CssGenerator,
    },
    ToolDescriptor {
        id: "hash-generator",
        name: "Hash Generator",
        description: "Generate SHA-1, SHA-256, and SHA-512 hashes",
        category: Category::Developer,
        icon: "Hash",
        is_premium: false,
        kind: ToolKind::Hash,
    },
    ToolDescriptor {
        id: "markdown-editor",
        name: "Markdown Editor",
        description: "Write Markdown and convert it to HTML",
        category: Category::Text,
        icon: "FileText",
        is_premium: false,
        kind: ToolKind::MarkdownEditor,
    },
    ToolDescriptor {
        id: "css-beautifier",
        name: "CSS Beautifier",
        description: "Format and indent CSS code for readability",
        category: Category::Developer,
        icon: "Code",
        is_premium: false,
        kind: ToolKind::CssBeautifier,
    },
    ToolDescriptor {
        id: "lorem-ipsum-generator",
        name: "Lorem Ipsum Generator",
        description: "Generate placeholder text for your designs and layouts",
        category: Category::Text,
        icon: "Type",
        is_premium: false,
        kind: ToolKind::LoremIpsum,
    },
    ToolDescriptor {
        id: "timestamp-converter",
        name: "Timestamp Converter",
        description: "Convert between Unix timestamps and human-readable dates",
        category: Category::Converter,
        icon: "Clock",
        is_premium: false,
        kind: ToolKind::TimestampConverter,
    },
    ToolDescriptor {
        id: "email-validator",
        name: "Email Validator",
        description: "Validate email addresses and get formatting suggestions",
        category: Category::Web,
        icon: "Mail",
        is_premium: false,
        kind: ToolKind::EmailValidator,
    },
    ToolDescriptor {
        id: "code-minifier",
        name: "HTML / CSS / JS Minifier",
        description: "Minify and compress your code instantly to improve performance",
        category: Category::Developer,
        icon: "Code",
        is_premium: false,
        kind: ToolKind::CodeMinifier,
    },
    ToolDescriptor {
        id: "password-strength-checker",
        name: "Password Strength Checker",
        description: "Analyze the strength of any password with suggestions",
        category: Category::Utility,
        icon: "Shield",
        is_premium: false,
        kind: ToolKind::PasswordStrength,
    },
    // Premium tools
    ToolDescriptor {
        id: "json-formatter",
        name: "JSON Formatter",
        description: "Format, validate, and minify JSON data",
        category: Category::Developer,
        icon: "Braces",
        is_premium: true,
        kind: ToolKind::JsonFormatter,
    },
    ToolDescriptor {
        id: "regex-tester",
        name: "Regex Tester",
        description: "Test regular expressions with capture group breakdowns",
        category: Category::Developer,
        icon: "Search",
        is_premium: true,
        kind: ToolKind::RegexTester,
    },
];
