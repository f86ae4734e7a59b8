//! Reshapes registrations into the rows of a report.

use evreg_kernel::domain::constants::SPORTS_EVENT;
use evreg_kernel::domain::models::Registration;
use serde_json::Value;

pub const COLUMNS: [&str; 7] = ["Name", "Email", "Student ID", "Phone", "Gender", "Events", "Activity"];

pub const BOYS_LABEL: &str = "--- Boys Registrations ---";
pub const GIRLS_LABEL: &str = "--- Girls Registrations ---";
pub const OTHER_LABEL: &str = "--- Other/Unspecified Gender Registrations ---";

const NO_ACTIVITY: &str = "N/A";

pub type Row = [String; 7];

/// A labelled group of rows inside a grouped report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// One header row followed by rows in source order.
    Flat(Vec<Row>),
    /// The header row, then per section: blank row, label row, header row, rows.
    Grouped(Vec<Section>),
}

/// One physical line of the rendered sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Label(&'a str),
    Header,
    Data(&'a Row),
}

/// The tabular form of a report, independent of the output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// The normalized event filter, `None` for a report over everything.
    pub filter: Option<String>,
    pub layout: Layout,
}

impl Table {
    /// Every line in sheet order.
    #[must_use]
    pub fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = vec![Line::Header];
        match &self.layout {
            Layout::Flat(rows) => lines.extend(rows.iter().map(Line::Data)),
            Layout::Grouped(sections) => {
                for section in sections {
                    lines.extend([Line::Blank, Line::Label(section.label), Line::Header]);
                    lines.extend(section.rows.iter().map(Line::Data));
                }
            },
        }
        lines
    }

    /// Number of data rows, labels and headers excluded.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match &self.layout {
            Layout::Flat(rows) => rows.len(),
            Layout::Grouped(sections) => sections.iter().map(|s| s.rows.len()).sum(),
        }
    }

    /// Per column: the longest cell text on any line, plus 2.
    #[must_use]
    pub fn column_widths(&self) -> [usize; 7] {
        let mut widths = [0usize; 7];
        for line in self.lines() {
            match line {
                Line::Blank => {},
                Line::Label(label) => widths[0] = widths[0].max(label.chars().count()),
                Line::Header => {
                    for (width, title) in widths.iter_mut().zip(COLUMNS) {
                        *width = (*width).max(title.chars().count());
                    }
                },
                Line::Data(row) => {
                    for (width, cell) in widths.iter_mut().zip(row) {
                        *width = (*width).max(cell.chars().count());
                    }
                },
            }
        }
        widths.map(|w| w + 2)
    }
}

/// An empty filter means "no filter". Anything else, whitespace included, is matched
/// verbatim.
#[must_use]
pub fn normalize_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty())
}

/// Builds the report for `filter` over `registrations`.
///
/// A filter keeps registrations attending that event (case-insensitive). The sports
/// event is split into boys, girls and everyone else; the last section only appears
/// when it has rows.
#[must_use]
pub fn build_report(registrations: &[Registration], filter: Option<&str>) -> Table {
    let filter = normalize_filter(filter);
    let sports = filter.is_some_and(|f| f.eq_ignore_ascii_case(SPORTS_EVENT));

    let selected = registrations.iter().filter(|r| filter.is_none_or(|f| r.attends_ignore_case(f)));

    let layout = if sports {
        let (mut boys, mut girls, mut others) = (Vec::new(), Vec::new(), Vec::new());
        for registration in selected {
            let row = to_row(registration, true);
            match gender_key(registration).as_str() {
                "male" => boys.push(row),
                "female" => girls.push(row),
                _ => others.push(row),
            }
        }

        let mut sections = vec![
            Section { label: BOYS_LABEL, rows: boys },
            Section { label: GIRLS_LABEL, rows: girls },
        ];
        if !others.is_empty() {
            sections.push(Section { label: OTHER_LABEL, rows: others });
        }
        Layout::Grouped(sections)
    } else {
        Layout::Flat(selected.map(|r| to_row(r, false)).collect())
    };

    Table { filter: filter.map(str::to_owned), layout }
}

fn gender_key(registration: &Registration) -> String {
    registration.gender.as_deref().unwrap_or_default().trim().to_lowercase()
}

fn to_row(registration: &Registration, sports: bool) -> Row {
    let text = |field: &Option<String>| field.clone().unwrap_or_default();
    [
        text(&registration.name),
        text(&registration.email),
        registration.student_id.clone(),
        text(&registration.phone),
        text(&registration.gender),
        registration.events.join(", "),
        activity(registration, sports),
    ]
}

/// Project name, else other activity, else (sports report only) the sports selection.
fn activity(registration: &Registration, sports: bool) -> String {
    let non_empty = |field: &Option<String>| field.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

    non_empty(&registration.project_name)
        .or_else(|| non_empty(&registration.other_activity))
        .or_else(|| if sports { registration.sports.as_ref().and_then(sports_text) } else { None })
        .unwrap_or_else(|| NO_ACTIVITY.to_owned())
}

fn sports_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reg(raw: Value) -> Registration {
        serde_json::from_value(raw).unwrap()
    }

    fn sample() -> Vec<Registration> {
        vec![
            reg(json!({ "name": "Ann", "studentId": "1", "gender": "Female", "events": ["Sports"], "sports": ["Tennis", "Chess"] })),
            reg(json!({ "name": "Bob", "studentId": "2", "gender": "male", "events": ["sports", "Art"], "projectName": "Robot" })),
            reg(json!({ "name": "Cy", "studentId": "3", "gender": "Coach", "events": ["Sports"] })),
            reg(json!({ "name": "Dee", "studentId": "4", "gender": "female", "events": ["Art"], "otherActivity": "Painting" })),
        ]
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r[0].as_str()).collect()
    }

    #[test]
    fn unfiltered_report_keeps_order() {
        for filter in [None, Some("")] {
            let table = build_report(&sample(), filter);
            let Layout::Flat(rows) = &table.layout else { panic!("expected a flat table") };
            assert_eq!(names(rows), ["Ann", "Bob", "Cy", "Dee"]);
            assert_eq!(table.filter, None);
        }
    }

    #[test]
    fn whitespace_filter_is_literal() {
        let table = build_report(&sample(), Some("   "));
        let Layout::Flat(rows) = &table.layout else { panic!("expected a flat table") };
        assert!(rows.is_empty());
        assert_eq!(table.filter.as_deref(), Some("   "));
    }

    #[test]
    fn padded_sports_filter_is_not_grouped() {
        let table = build_report(&sample(), Some(" sports"));
        assert!(matches!(table.layout, Layout::Flat(ref rows) if rows.is_empty()));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let table = build_report(&sample(), Some("art"));
        let Layout::Flat(rows) = &table.layout else { panic!("expected a flat table") };
        assert_eq!(names(rows), ["Bob", "Dee"]);
        assert_eq!(rows[0][6], "Robot");
        assert_eq!(rows[1][6], "Painting");
        assert_eq!(rows[0][5], "sports, Art");
    }

    #[test]
    fn sports_is_grouped_by_gender() {
        let table = build_report(&sample(), Some("SPORTS"));
        let Layout::Grouped(sections) = &table.layout else { panic!("expected sections") };

        let labels: Vec<_> = sections.iter().map(|s| s.label).collect();
        assert_eq!(labels, [BOYS_LABEL, GIRLS_LABEL, OTHER_LABEL]);
        assert_eq!(names(&sections[0].rows), ["Bob"]);
        assert_eq!(names(&sections[1].rows), ["Ann"]);
        assert_eq!(names(&sections[2].rows), ["Cy"]);

        assert_eq!(sections[1].rows[0][6], "Tennis, Chess");
        assert_eq!(sections[0].rows[0][6], "Robot");
        assert_eq!(sections[2].rows[0][6], "N/A");
    }

    #[test]
    fn other_section_is_omitted_when_empty() {
        let regs: Vec<_> = sample().into_iter().filter(|r| r.name.as_deref() != Some("Cy")).collect();
        let table = build_report(&regs, Some("sports"));
        let Layout::Grouped(sections) = &table.layout else { panic!("expected sections") };
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn boys_and_girls_sections_always_exist() {
        let table = build_report(&[], Some("sports"));
        let Layout::Grouped(sections) = &table.layout else { panic!("expected sections") };
        assert_eq!(sections.len(), 2);
        assert_eq!(table.lines().len(), 1 + 2 * 3);
    }

    #[test]
    fn sports_selection_only_counts_in_sports_report() {
        let regs = vec![reg(json!({ "studentId": "1", "events": ["Chess"], "sports": "Football" }))];
        let Layout::Flat(rows) = build_report(&regs, Some("chess")).layout else { panic!() };
        assert_eq!(rows[0][6], "N/A");
    }

    #[test]
    fn scalar_sports_are_stringified() {
        let regs = vec![reg(json!({ "studentId": "1", "gender": "male", "events": ["Sports"], "sports": 3 }))];
        let Layout::Grouped(sections) = build_report(&regs, Some("sports")).layout else { panic!() };
        assert_eq!(sections[0].rows[0][6], "3");
    }

    #[test]
    fn grouped_lines_follow_sheet_order() {
        let table = build_report(&sample(), Some("sports"));
        let lines = table.lines();
        assert_eq!(lines[0], Line::Header);
        assert_eq!(lines[1], Line::Blank);
        assert_eq!(lines[2], Line::Label(BOYS_LABEL));
        assert_eq!(lines[3], Line::Header);
        assert!(matches!(lines[4], Line::Data(row) if row[0] == "Bob"));
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn widths_are_longest_cell_plus_two() {
        let regs = vec![reg(json!({ "name": "Bartholomew", "email": "b@x", "studentId": "202300000001", "events": ["Chess"] }))];
        let widths = build_report(&regs, None).column_widths();
        assert_eq!(widths[0], "Bartholomew".len() + 2);
        assert_eq!(widths[1], "Email".len() + 2);
        assert_eq!(widths[2], "202300000001".len() + 2);

        let grouped = build_report(&sample(), Some("sports")).column_widths();
        assert_eq!(grouped[0], OTHER_LABEL.len() + 2);
    }
}
