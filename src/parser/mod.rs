pub mod lines;
pub mod namedays;
pub mod omens;
pub mod religious;
pub mod sections;

use tracing::debug;

use crate::error::ParseError;
use crate::report::Report;
use lines::Line;
use religious::ReligiousClassifier;
use sections::{Handler, SectionState, Subsection};

/// Parse a day-page extract into a report: lines → sections → per-section handlers.
///
/// Only empty input is an error; anything unexpected is skipped.
pub fn parse(text: &str) -> Result<Report, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut parser = Parser::default();
    for line in lines::classify_lines(text) {
        parser.feed(line);
    }
    Ok(parser.report)
}

#[derive(Default)]
struct Parser {
    report: Report,
    sections: SectionState,
    religious: ReligiousClassifier,
}

impl Parser {
    fn feed(&mut self, line: Line<'_>) {
        match line {
            Line::TopHeader(title) => {
                self.sections.enter_header(title);
                self.religious.reset();
            }
            Line::SubHeader(title) => {
                self.sections.enter_subheader(title);
                self.religious.reset();
            }
            Line::Leaf(text) | Line::Text(text) => self.dispatch(text),
            Line::Empty => {}
        }
    }

    fn dispatch(&mut self, line: &str) {
        match self.sections.handler() {
            Handler::Holidays => self.holiday_line(line),
            Handler::Omens => omens::append(line, &mut self.report.omens),
            Handler::Inert => {}
        }
    }

    fn holiday_line(&mut self, line: &str) {
        let line = line.trim_matches(|c: char| matches!(c, '.' | ';' | '—' | ' '));
        if line.starts_with("См. также:") {
            return;
        }

        let report = &mut self.report;
        let list = match self.sections.subsection() {
            None | Some(Subsection::International) => &mut report.holidays_international,
            Some(Subsection::National) => &mut report.holidays_local,
            Some(Subsection::Professional) => &mut report.holidays_professional,
            Some(Subsection::Religious) => {
                self.religious.handle(line, &mut report.holidays_religious);
                return;
            }
            Some(Subsection::NameDays) => {
                namedays::extract(line, &mut report.name_days);
                return;
            }
        };

        if line.is_empty() {
            debug!(section = ?self.sections.section(), "empty holiday line");
            return;
        }
        list.push(line.to_string());
    }
}

// ── Tests ──
