const BULLET: &str = "* ";

/// Clauses with fewer spaces than this are wrap artifacts and get glued to the previous entry.
const MIN_CLAUSE_SPACES: usize = 2;

/// Append the folk sayings found on `line` to `omens`.
///
/// The first fragment of the section is kept verbatim as its heading entry;
/// everything after it is split into sentences.
pub fn append(line: &str, omens: &mut Vec<String>) {
    for fragment in line.split(BULLET) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        if omens.is_empty() {
            omens.push(fragment.to_string());
            continue;
        }

        for clause in fragment.split('.') {
            let clause = clause.trim_matches(|c: char| matches!(c, '…' | ',' | '.' | ' '));
            if clause.is_empty() {
                continue;
            }
            match omens.last_mut() {
                Some(prev) if clause.matches(' ').count() < MIN_CLAUSE_SPACES => {
                    prev.push_str(", ");
                    prev.push_str(clause);
                }
                _ => omens.push(clause.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn append_all(lines: &[&str]) -> Vec<String> {
        let mut omens = Vec::new();
        for line in lines {
            append(line, &mut omens);
        }
        omens
    }

    #[test]
    fn first_fragment_kept_verbatim() {
        let omens = append_all(&["Рождество. Святки начинаются"]);
        assert_eq!(omens, vec!["Рождество. Святки начинаются"]);
    }

    #[test]
    fn short_continuation_merges() {
        let omens = append_all(&["* First. Second", "continued"]);
        assert_eq!(omens, vec!["First. Second, continued"]);
    }

    #[test]
    fn sentences_become_entries() {
        let omens = append_all(&[
            "Рождество Христово",
            "Если в этот день метель, то пчёлы хорошо будут роиться. Снег идёт. Звёздная ночь на Рождество сулит урожай гороха…",
        ]);
        assert_eq!(
            omens,
            vec![
                "Рождество Христово",
                "Если в этот день метель, то пчёлы хорошо будут роиться, Снег идёт",
                "Звёздная ночь на Рождество сулит урожай гороха",
            ]
        );
    }

    #[test]
    fn inline_bullets_split() {
        let omens = append_all(&[
            "Святки",
            "* Ясный день к урожаю хлеба * Тёплая погода к тёплой весне",
        ]);
        assert_eq!(
            omens,
            vec!["Святки", "Ясный день к урожаю хлеба", "Тёплая погода к тёплой весне"]
        );
    }

    #[test]
    fn empty_clauses_dropped() {
        let omens = append_all(&["Святки", "... , .", "Метель на Рождество — к раннему теплу"]);
        assert_eq!(omens, vec!["Святки", "Метель на Рождество — к раннему теплу"]);
    }
}
