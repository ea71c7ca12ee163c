//! Given names out of the "Именины" subsection.

use std::sync::LazyLock;

use regex::Regex;

static QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"также:|Мужские:?|Женские:?|Католические:?|Православие:?|Православные( \(?по новому стилю\)?)?( ?\(старообрядцы\))?:?|Дата (дана )?по новому стилю:?|мученики:",
    )
    .unwrap()
});

const DERIVED_MARKER: &str = "и производные:";
const DASH: &str = "— ";
const RELICS: &str = "мощей";
const MARTYR_STEM: &str = "мучени";
/// Leaks in from phrases like "мужское имя"; never a name on its own.
const NOT_A_NAME: &str = "имя";

/// Extract the names mentioned on `line` and append the new ones to `names`.
pub fn extract(line: &str, names: &mut Vec<String>) {
    let line = line.trim_matches(|c: char| matches!(c, '.' | ';' | '—' | ' '));

    if let Some(m) = QUALIFIER_RE.find(line) {
        for fragment in [&line[..m.start()], &line[m.end()..]] {
            let fragment = fragment.trim();
            if !fragment.is_empty() {
                extract(fragment, names);
            }
        }
        return;
    }

    let line = match line.find(DERIVED_MARKER) {
        Some(idx) => &line[..idx],
        None => line,
    };
    split_candidates(line.trim(), names);
}

fn split_candidates(line: &str, names: &mut Vec<String>) {
    // "Имя, Имя — пояснение" or "Имя (Имя) — пояснение": the clause after the dash is prose
    let has_paren_group = line.contains(" (") && line.contains(')');
    if line.contains(DASH) && (line.contains(',') || has_paren_group) {
        let head = line.split(DASH).next().unwrap_or_default();
        split_candidates(head.trim(), names);
        return;
    }

    for candidate in line.split(',') {
        let candidate = candidate.trim_matches(':');
        let candidate = match candidate.split_once(DASH) {
            Some((head, _)) => head,
            None => candidate,
        };
        let candidate = candidate.trim();
        if !candidate.is_empty() {
            add_candidate(candidate, names);
        }
    }
}

/// Non-exact history check: one token must equal a known name, several tokens
/// are rejected on any overlap.
fn is_known(candidate: &str, names: &[String]) -> bool {
    let single_token = !candidate.contains(' ');
    names
        .iter()
        .any(|known| candidate.contains(known.as_str()) && (!single_token || candidate == known))
}

fn trim_parens(token: &str) -> &str {
    token.trim_matches(|c: char| c == '(' || c == ')')
}

fn add_candidate(candidate: &str, names: &mut Vec<String>) {
    if candidate.contains(RELICS) || is_known(candidate, names) {
        return;
    }

    let tokens: Vec<&str> = candidate.split(' ').collect();
    let accepted: Vec<&str> = match tokens[..] {
        [single] if single.contains('(') && single.contains(')') => vec![single],
        [single] => vec![trim_parens(single)],
        [first, second] if first.contains(MARTYR_STEM) => vec![trim_parens(second)],
        [first, second] => vec![first, trim_parens(second)],
        [first, "и", third] => vec![first, third],
        _ => return,
    };

    for name in accepted {
        if name.is_empty() || name == NOT_A_NAME || names.iter().any(|known| known == name) {
            continue;
        }
        names.push(name.to_string());
    }
}

// ── Tests ──
