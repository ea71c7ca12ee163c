use tracing::debug;

const HOLIDAY_HEADERS: &[&str] = &["Праздники и памятные дни", "Праздники"];

const OMEN_HEADERS: &[&str] = &[
    "Приметы",
    "Народный календарь",
    "Народный календарь и приметы",
    "Народный календарь, приметы",
    "Народный календарь, приметы и фольклор Руси",
];

/// Sections every day page has; they carry nothing we extract.
const KNOWN_SKIPPED_HEADERS: &[&str] = &["События", "Родились", "Скончались"];

/// Which content handler receives the lines of the current section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Holidays,
    Omens,
    Inert,
}

/// Subsections of the holidays block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsection {
    International,
    National,
    Religious,
    Professional,
    NameDays,
}

impl Subsection {
    pub fn from_title(title: &str) -> Option<Self> {
        match title {
            "Международные" | "Мир" => Some(Subsection::International),
            "Национальные" | "Региональные" => Some(Subsection::National),
            "Религиозные" => Some(Subsection::Religious),
            "Профессиональные" => Some(Subsection::Professional),
            "Именины" => Some(Subsection::NameDays),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    NoSection,
    TopHeader(String),
    SubHeader { header: String, name: String },
}

/// Tracks header/subheader nesting and the handler bound to it.
#[derive(Debug, Clone)]
pub struct SectionState {
    section: Section,
    top: Handler,
    handler: Handler,
    subsection: Option<Subsection>,
}

impl Default for SectionState {
    fn default() -> Self {
        SectionState {
            section: Section::NoSection,
            top: Handler::Inert,
            handler: Handler::Inert,
            subsection: None,
        }
    }
}

impl SectionState {
    pub fn enter_header(&mut self, title: &str) {
        self.subsection = None;
        let handler = if HOLIDAY_HEADERS.contains(&title) {
            Handler::Holidays
        } else if OMEN_HEADERS.contains(&title) {
            Handler::Omens
        } else {
            if !KNOWN_SKIPPED_HEADERS.contains(&title) {
                debug!(header = title, "extra header");
            }
            Handler::Inert
        };
        self.top = handler;
        self.handler = handler;
        self.section = Section::TopHeader(title.to_string());
    }

    pub fn enter_subheader(&mut self, title: &str) {
        let header = match &self.section {
            Section::NoSection => String::new(),
            Section::TopHeader(h) | Section::SubHeader { header: h, .. } => h.clone(),
        };
        self.section = Section::SubHeader {
            header,
            name: title.to_string(),
        };

        match self.top {
            Handler::Holidays => {
                self.subsection = Subsection::from_title(title);
                self.handler = if self.subsection.is_some() {
                    Handler::Holidays
                } else {
                    debug!(subheader = title, "unknown holidays subheader");
                    Handler::Inert
                };
            }
            Handler::Omens => self.handler = Handler::Omens,
            Handler::Inert => {}
        }
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }

    pub fn subsection(&self) -> Option<Subsection> {
        self.subsection
    }

    pub fn section(&self) -> &Section {
        &self.section
    }
}

// ── Tests ──
