use std::fmt;

use serde::{Deserialize, Serialize};

pub const HOLIDAYS_TITLE: &str = "Праздники и памятные дни";
pub const INTERNATIONAL_TITLE: &str = "Международные";
pub const NATIONAL_TITLE: &str = "Национальные";
pub const PROFESSIONAL_TITLE: &str = "Профессиональные";
pub const RELIGIOUS_TITLE: &str = "Религиозные";
pub const NAME_DAYS_TITLE: &str = "Именины";
pub const OMENS_TITLE: &str = "Приметы";

/// Omens beyond this many entries are parsed but never rendered.
pub const RENDERED_OMENS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub stats: String,
    pub holidays_international: Vec<String>,
    pub holidays_local: Vec<String>,
    pub holidays_professional: Vec<String>,
    pub holidays_religious: Vec<ReligiousEntry>,
    pub name_days: Vec<String>,
    pub omens: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReligiousEntry {
    pub group_tag: String,
    pub descriptions: Vec<String>,
}

impl ReligiousEntry {
    pub fn new(group_tag: &str) -> Self {
        ReligiousEntry {
            group_tag: group_tag.to_string(),
            descriptions: Vec::new(),
        }
    }
}

impl Report {
    /// True when no religious entry carries a description (tag-only entries don't count).
    pub fn religious_is_empty(&self) -> bool {
        self.holidays_religious
            .iter()
            .all(|entry| entry.descriptions.is_empty())
    }

    pub fn has_holidays(&self) -> bool {
        !self.holidays_international.is_empty()
            || !self.holidays_local.is_empty()
            || !self.holidays_professional.is_empty()
            || !self.religious_is_empty()
    }

    /// Groups consecutive plain names onto one line; a name with a colon stands alone.
    fn name_day_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut joining = false;
        for name in &self.name_days {
            if name.contains(':') {
                lines.push(name.clone());
                joining = false;
            } else if joining {
                if let Some(last) = lines.last_mut() {
                    last.push_str(", ");
                    last.push_str(name);
                }
            } else {
                lines.push(name.clone());
                joining = true;
            }
        }
        lines
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    write!(f, "\n_{}_\n", title)?;
    for item in items {
        writeln!(f, "- {}", item)?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.stats.is_empty() {
            writeln!(f, "{}", self.stats)?;
        }

        if self.has_holidays() {
            writeln!(f, "*{}*", HOLIDAYS_TITLE)?;
            write_list(f, INTERNATIONAL_TITLE, &self.holidays_international)?;
            write_list(f, NATIONAL_TITLE, &self.holidays_local)?;
            write_list(f, PROFESSIONAL_TITLE, &self.holidays_professional)?;
            if !self.religious_is_empty() {
                write!(f, "\n_{}_\n", RELIGIOUS_TITLE)?;
                for entry in &self.holidays_religious {
                    for line in &entry.descriptions {
                        if entry.group_tag.is_empty() {
                            writeln!(f, "- {}", line)?;
                        } else {
                            writeln!(f, "- {} ({})", line, entry.group_tag)?;
                        }
                    }
                }
            }
        }

        if !self.name_days.is_empty() {
            write!(f, "\n_{}_", NAME_DAYS_TITLE)?;
            for line in self.name_day_lines() {
                write!(f, "\n- {}", line)?;
            }
            writeln!(f)?;
        }

        if !self.omens.is_empty() {
            write!(f, "\n*{}*\n\n", OMENS_TITLE)?;
            for (i, line) in self.omens.iter().take(RENDERED_OMENS).enumerate() {
                if i == 0 {
                    writeln!(f, "_{}_", line)?;
                } else {
                    writeln!(f, "{}", line)?;
                }
            }
        }

        Ok(())
    }
}

// ── Tests ──
