// src/content/instructions.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static SCREEN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*Screen\s+(\d+):\s*(.+)$").expect("valid regex"));

/// Parsed instruction content for one lesson.
#[derive(Debug, Serialize)]
pub struct LessonInstructions {
    pub title: Option<String>,
    pub screens: Vec<InstructionScreen>,
}

#[derive(Debug, Serialize)]
pub struct InstructionScreen {
    pub number: u32,
    pub title: String,
    pub body: String,
}

/// Parses a lesson instruction markdown document: optional `---`-fenced
/// frontmatter, then screen sections separated by `---` lines, each opened
/// by a `# Screen N: Title` heading.
pub fn parse_instructions(raw: &str) -> LessonInstructions {
    let (title, body) = split_frontmatter(raw);

    let mut screens = Vec::new();
    for (index, section) in body.split("\n---\n").enumerate() {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        let mut lines = section.lines();
        let first = lines.next().unwrap_or("").trim();

        let screen = match SCREEN_HEADING.captures(first) {
            Some(caps) => InstructionScreen {
                number: caps[1].parse().unwrap_or(index as u32 + 1),
                title: caps[2].trim().to_string(),
                body: lines.collect::<Vec<_>>().join("\n").trim().to_string(),
            },
            // Tolerate a section without a screen heading; number it by
            // position and keep the full text.
            None => InstructionScreen {
                number: index as u32 + 1,
                title: String::new(),
                body: section.to_string(),
            },
        };
        screens.push(screen);
    }

    LessonInstructions { title, screens }
}

/// Strips a leading `---` frontmatter block and pulls its `title:` value.
fn split_frontmatter(raw: &str) -> (Option<String>, &str) {
    let Some(rest) = raw.strip_prefix("---") else {
        return (None, raw);
    };
    let Some(end) = rest.find("\n---") else {
        return (None, raw);
    };

    let frontmatter = &rest[..end];
    let body = rest[end + 4..].trim_start_matches('-');

    let title = frontmatter.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim() == "title" {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    });

    (title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"---
title: "BIDMAS: Order of Operations"
duration: 25
---

# Screen 1: What is BIDMAS?

BIDMAS tells you the order to work things out.

Brackets, Indices, Division/Multiplication, Addition/Subtraction.

---

# Screen 2: Brackets First

Always work out the brackets before anything else.

---

Some closing notes without a heading.
"#;

    #[test]
    fn parses_frontmatter_title() {
        let parsed = parse_instructions(SAMPLE);
        assert_eq!(parsed.title.as_deref(), Some("BIDMAS: Order of Operations"));
    }

    #[test]
    fn splits_screens_on_delimiters() {
        let parsed = parse_instructions(SAMPLE);
        assert_eq!(parsed.screens.len(), 3);

        assert_eq!(parsed.screens[0].number, 1);
        assert_eq!(parsed.screens[0].title, "What is BIDMAS?");
        assert!(parsed.screens[0].body.contains("order to work things out"));

        assert_eq!(parsed.screens[1].number, 2);
        assert_eq!(parsed.screens[1].title, "Brackets First");
    }

    #[test]
    fn headingless_section_keeps_its_text() {
        let parsed = parse_instructions(SAMPLE);
        let last = parsed.screens.last().unwrap();
        assert_eq!(last.title, "");
        assert!(last.body.contains("closing notes"));
    }

    #[test]
    fn document_without_frontmatter_parses() {
        let parsed = parse_instructions("# Screen 1: Only\n\nBody here.");
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.screens.len(), 1);
        assert_eq!(parsed.screens[0].title, "Only");
    }
}
