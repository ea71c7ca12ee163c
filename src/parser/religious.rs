//! Religious holidays: denomination tagging and line splitting.
//!
//! Lines arrive as free prose like `Православие: Рождество Христово` or
//! `… (Бахаи)`. The pattern bank below is ordered: broad patterns sit before
//! narrow ones, and the first match wins.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::report::ReligiousEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denomination {
    Orthodox,
    Catholic,
    Other,
    Bahai,
    ArmenianApostolic,
    Lutheran,
    Heathen,
}

impl Denomination {
    pub fn tag(self) -> &'static str {
        match self {
            Denomination::Orthodox => "правосл.",
            Denomination::Catholic => "катол.",
            Denomination::Other => "",
            Denomination::Bahai => "бахаи",
            Denomination::ArmenianApostolic => "Армянская апостол. церковь",
            Denomination::Lutheran => "лютеран.",
            Denomination::Heathen => "язычн.",
        }
    }
}

/// What a bank entry does with the line it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Cut the matched footnote out; no new entry.
    Footnote,
    Group(Denomination),
}

static BANK: LazyLock<Vec<(Rule, Regex)>> = LazyLock::new(|| {
    let rules: [(Rule, &str); 8] = [
        (
            Rule::Footnote,
            r"Примечание: указано для невисокосных лет, в високосные годы список иной, см\. \d+ .*?\.|\(.*, см\. \d+ .*?\)",
        ),
        (
            Rule::Group(Denomination::Orthodox),
            r"Православ(ие|ные):?( (\(|.*)Русская Православная Церковь(\)|.*))?( ?\(старообрядцы\))?|В .*[Пп]равосл.* церкв(и|ях):?|(\(|.*)Русская Православная Церковь(\)|.*)",
        ),
        (
            Rule::Group(Denomination::Catholic),
            r"Католи(цизм|ческие|чество):?|В [Кк]атолич.* церко?в(ь|и|ях):?|(В )?([^-]|^)[Кк]атолич.* церко?в(ь|и|ях):?",
        ),
        (
            Rule::Group(Denomination::Other),
            r":?Славянские праздники:?|(Зороастризм|Другие конфессии|В католичестве и протестантстве|Ислам(ские|.?)|В Древневосточных церквях|Буддизм):?",
        ),
        (Rule::Group(Denomination::Bahai), r"Бахаи(зм)?:?"),
        (
            Rule::Group(Denomination::ArmenianApostolic),
            r"Армянская апостольская церковь:?",
        ),
        (
            Rule::Group(Denomination::Lutheran),
            r"Лютеран(ство|ские|ская церковь):?|В [Лл]ютеранск.* церкв(и|ях):?",
        ),
        (
            Rule::Group(Denomination::Heathen),
            r"(Германское |Славянское |Скандинавское )?(Нео)?[Яя]зычество:?",
        ),
    ];
    rules
        .into_iter()
        .map(|(rule, pattern)| (rule, Regex::new(pattern).unwrap()))
        .collect()
});

static MEMORIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Пп]амять .*|.*священномучени.*").unwrap());
static APOSTLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"память апостол").unwrap());

static NOISE_RE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"мощей",
        r"^Собор ",
        r"[Пп]ереносится|[Пп]еренесено",
        r"^Предпразднство",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static ICON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Празднование |Почитание )?[Ии]кон[аыу]? |[Ии]кон[аы]? Божией Матери").unwrap()
});

/// Returns the first bank entry matching `line`, with the match span.
pub fn first_match(line: &str) -> Option<(Rule, usize, usize)> {
    BANK.iter()
        .find_map(|(rule, re)| re.find(line).map(|m| (*rule, m.start(), m.end())))
}

fn trim_boundary(line: &str) -> &str {
    line.trim_matches(|c: char| matches!(c, '.' | ';' | '—' | ' '))
}

fn is_noise(line: &str) -> bool {
    if MEMORIAL_RE.is_match(line) && !APOSTLE_RE.is_match(line) {
        return true;
    }
    NOISE_RE.iter().any(|re| re.is_match(line))
}

/// Per-parse classifier state: which entry receives appends, and the one-line lookahead drop.
#[derive(Debug, Default)]
pub struct ReligiousClassifier {
    active: Option<usize>,
    suppress_next: bool,
}

impl ReligiousClassifier {
    /// Forget the active entry; called whenever the section changes.
    pub fn reset(&mut self) {
        self.active = None;
        self.suppress_next = false;
    }

    pub fn handle(&mut self, line: &str, entries: &mut Vec<ReligiousEntry>) {
        if self.suppress_next {
            self.suppress_next = false;
            debug!(line, "dropped continuation of icon list");
            return;
        }
        self.classify(line, entries);
    }

    fn classify(&mut self, line: &str, entries: &mut Vec<ReligiousEntry>) {
        let line = trim_boundary(line);
        if line.starts_with("См. также:") || line == "Христианские" {
            return;
        }

        let rest = match first_match(line) {
            Some((Rule::Footnote, start, end)) => self.split(line, start, end, None, entries),
            Some((Rule::Group(denomination), start, end)) => {
                entries.push(ReligiousEntry::new(denomination.tag()));
                let created = entries.len() - 1;
                self.split(line, start, end, Some(created), entries)
            }
            None => {
                if self.active.is_none() {
                    entries.push(ReligiousEntry::new(""));
                    self.active = Some(entries.len() - 1);
                }
                line
            }
        };

        if is_noise(rest) {
            return;
        }
        if ICON_RE.is_match(rest) {
            if rest.contains(':') {
                self.suppress_next = true;
            }
            return;
        }
        if rest.is_empty() {
            return;
        }

        match self.active.and_then(|idx| entries.get_mut(idx)) {
            Some(entry) => entry.descriptions.push(rest.to_string()),
            None => debug!(line = rest, "religious line without an active entry"),
        }
    }

    /// Text before the match continues the previous entry; text after it goes to `created`.
    fn split<'a>(
        &mut self,
        line: &'a str,
        start: usize,
        end: usize,
        created: Option<usize>,
        entries: &mut Vec<ReligiousEntry>,
    ) -> &'a str {
        if start > 0 {
            self.classify(&line[..start], entries);
        }
        if created.is_some() {
            self.active = created;
        }
        line[end..].trim_matches(|c: char| c == '—' || c == ' ')
    }
}

// ── Tests ──
