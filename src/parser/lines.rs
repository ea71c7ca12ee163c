use std::sync::LazyLock;

use regex::Regex;

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(={2,4}) (.+?) (={2,4})$").unwrap());

/// One extract line, classified by its section-marker wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `== text ==`
    TopHeader(&'a str),
    /// `=== text ===`
    SubHeader(&'a str),
    /// `==== text ====`, content nested one level deeper
    Leaf(&'a str),
    Text(&'a str),
    Empty,
}

pub fn classify_line(raw: &str) -> Line<'_> {
    let line = raw.trim_end_matches('\r');
    if line.trim().is_empty() {
        return Line::Empty;
    }

    if let Some(caps) = MARKER_RE.captures(line) {
        let (open, close) = (caps[1].len(), caps[3].len());
        if open == close {
            let text = caps.get(2).map_or("", |m| m.as_str()).trim();
            return match open {
                2 => Line::TopHeader(text),
                3 => Line::SubHeader(text),
                _ => Line::Leaf(text),
            };
        }
    }

    Line::Text(line.trim())
}

pub fn classify_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines().map(classify_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_header() {
        assert_eq!(
            classify_line("== Праздники и памятные дни =="),
            Line::TopHeader("Праздники и памятные дни")
        );
    }

    #[test]
    fn sub_header() {
        assert_eq!(classify_line("=== Именины ==="), Line::SubHeader("Именины"));
    }

    #[test]
    fn leaf_header() {
        assert_eq!(
            classify_line("==== Православие ===="),
            Line::Leaf("Православие")
        );
    }

    #[test]
    fn padded_header_text_is_trimmed() {
        assert_eq!(classify_line("==  Приметы  =="), Line::TopHeader("Приметы"));
    }

    #[test]
    fn unbalanced_markers_are_text() {
        assert_eq!(classify_line("== Приметы ==="), Line::Text("== Приметы ==="));
        assert_eq!(classify_line("==Приметы=="), Line::Text("==Приметы=="));
    }

    #[test]
    fn empty_and_whitespace_lines() {
        assert_eq!(classify_line(""), Line::Empty);
        assert_eq!(classify_line("   \t"), Line::Empty);
        assert_eq!(classify_line("\r"), Line::Empty);
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(classify_line("  Рождество Христово \r"), Line::Text("Рождество Христово"));
    }

    #[test]
    fn crlf_input() {
        let kinds: Vec<_> = classify_lines("== События ==\r\nтекст\r\n").collect();
        assert_eq!(kinds, vec![Line::TopHeader("События"), Line::Text("текст")]);
    }
}
