//! Paginated PDF rendering of a minutes record.
//!
//! Layout mirrors the Markdown view: fixed section order, fallback text for
//! empty sections, no sorting or truncation. Sections render inside framed
//! boxes with padding; discussion content deliberately flows unboxed (only
//! its heading is framed) so long discussions can break across pages. Every
//! page carries a centered `Page N` footer.
//!
//! Uses the built-in Helvetica fonts so output is deterministic and no font
//! assets are required.

use super::{ActionEntry, ActionItem, MoMRecord, Point};
use crate::error::{ReferatError, Result};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point as PdfPoint, Rgb,
};

// Letter pages, with the margins the layout was tuned for (all in points).
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN_SIDE: f32 = 60.0;
const MARGIN_TOP: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 50.0;

const TITLE_SIZE: f32 = 18.0;
const TITLE_LEADING: f32 = 22.0;
const HEADING_SIZE: f32 = 14.0;
const HEADING_LEADING: f32 = 18.0;
const BODY_SIZE: f32 = 12.0;
const BODY_LEADING: f32 = 16.0;
const FOOTER_SIZE: f32 = 9.0;

const BOX_PADDING: f32 = 6.0;
const BOX_BORDER: f32 = 3.0;
const BULLET_INDENT: f32 = 15.0;
const SECTION_SPACING: f32 = 10.0;

const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_SIDE;

/// Average glyph width as a fraction of the font size, for Helvetica.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

const POINTS_PER_MM: f32 = 2.834_646;

fn mm(points: f32) -> Mm {
    Mm(points / POINTS_PER_MM)
}

/// One pre-measured line of section content.
#[derive(Debug, Clone)]
struct StyledLine {
    text: String,
    size: f32,
    leading: f32,
    bold: bool,
    indent: f32,
}

impl StyledLine {
    fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: HEADING_SIZE,
            leading: HEADING_LEADING,
            bold: true,
            indent: 0.0,
        }
    }

    fn body(text: impl Into<String>, indent: f32) -> Self {
        Self {
            text: text.into(),
            size: BODY_SIZE,
            leading: BODY_LEADING,
            bold: false,
            indent,
        }
    }
}

/// Greedy word wrap against an estimated character budget.
fn wrap(text: &str, width: f32, size: f32) -> Vec<String> {
    let max_chars = ((width / (size * GLYPH_WIDTH_RATIO)) as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        // Hard-split words that exceed a whole line on their own.
        while word.chars().count() > max_chars {
            let split: String = word.chars().take(max_chars).collect();
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(split.clone());
            word = &word[split.len()..];
        }

        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Wrap body text into styled lines at the given indent.
fn body_lines(text: &str, indent: f32) -> Vec<StyledLine> {
    wrap(text, CONTENT_WIDTH - 2.0 * BOX_PADDING - indent, BODY_SIZE)
        .into_iter()
        .map(|l| StyledLine::body(l, indent))
        .collect()
}

/// Cursor-based page writer with automatic page breaks.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    /// Cursor in points from the bottom of the page.
    y: f32,
    page_number: usize,
}

impl<'a> PageWriter<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        first_layer: PdfLayerReference,
        regular: &'a IndirectFontRef,
        bold: &'a IndirectFontRef,
    ) -> Self {
        let mut writer = Self {
            doc,
            layer: first_layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN_TOP,
            page_number: 1,
        };
        writer.draw_page_number();
        writer
    }

    /// Centered `Page N` footer for the current page.
    fn draw_page_number(&self) {
        let text = format!("Page {}", self.page_number);
        let width = text.chars().count() as f32 * FOOTER_SIZE * GLYPH_WIDTH_RATIO;
        self.layer.use_text(
            text,
            FOOTER_SIZE,
            mm((PAGE_WIDTH - width) / 2.0),
            mm(20.0),
            self.regular,
        );
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "content");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN_TOP;
        self.page_number += 1;
        self.draw_page_number();
    }

    /// Break to a fresh page unless `height` points still fit on this one.
    fn ensure(&mut self, height: f32) {
        if self.y - height < MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn font(&self, bold: bool) -> &'a IndirectFontRef {
        if bold {
            self.bold
        } else {
            self.regular
        }
    }

    /// Write one line at the given x offset from the left margin.
    fn write_line(&mut self, line: &StyledLine, x_offset: f32) {
        self.ensure(line.leading);
        self.y -= line.leading;
        self.layer.use_text(
            line.text.clone(),
            line.size,
            mm(MARGIN_SIDE + x_offset + line.indent),
            mm(self.y),
            self.font(line.bold),
        );
    }

    /// Write a centered line (used for the document title).
    fn write_centered(&mut self, text: &str, size: f32, leading: f32, bold: bool) {
        self.ensure(leading);
        self.y -= leading;
        let width = text.chars().count() as f32 * size * GLYPH_WIDTH_RATIO;
        self.layer.use_text(
            text,
            size,
            mm(MARGIN_SIDE + (CONTENT_WIDTH - width).max(0.0) / 2.0),
            mm(self.y),
            self.font(bold),
        );
    }

    fn space(&mut self, points: f32) {
        self.y = (self.y - points).max(MARGIN_BOTTOM);
    }

    /// Stroke a rectangle border.
    fn stroke_rect(&self, left: f32, top: f32, right: f32, bottom: f32, thickness: f32) {
        let line = Line {
            points: vec![
                (PdfPoint::new(mm(left), mm(top)), false),
                (PdfPoint::new(mm(right), mm(top)), false),
                (PdfPoint::new(mm(right), mm(bottom)), false),
                (PdfPoint::new(mm(left), mm(bottom)), false),
            ],
            is_closed: true,
        };
        self.layer.set_outline_thickness(thickness);
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer.add_line(line);
    }

    /// Render lines inside a framed box with padding.
    ///
    /// The box breaks to a fresh page when it would not fit; content taller
    /// than a full page falls back to unboxed flowing lines.
    fn boxed_section(&mut self, lines: &[StyledLine]) {
        let content_height: f32 = lines.iter().map(|l| l.leading).sum();
        let height = content_height + 2.0 * BOX_PADDING;
        let usable = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

        if height > usable {
            for line in lines {
                self.write_line(line, BOX_PADDING);
            }
            self.space(SECTION_SPACING);
            return;
        }

        self.ensure(height);
        let top = self.y;
        self.y -= BOX_PADDING;
        for line in lines {
            self.y -= line.leading;
            self.layer.use_text(
                line.text.clone(),
                line.size,
                mm(MARGIN_SIDE + BOX_PADDING + line.indent),
                mm(self.y),
                self.font(line.bold),
            );
        }
        self.y -= BOX_PADDING;
        self.stroke_rect(MARGIN_SIDE, top, PAGE_WIDTH - MARGIN_SIDE, self.y, BOX_BORDER);
        self.space(SECTION_SPACING);
    }

    /// Render flowing (unboxed) lines with per-line page breaks.
    fn flowing(&mut self, lines: &[StyledLine]) {
        for line in lines {
            self.write_line(line, 0.0);
        }
    }
}

/// Render a record (full or redacted) as paginated PDF bytes.
pub fn render_pdf(mom: &MoMRecord) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Minutes of Meeting",
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReferatError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReferatError::Render(e.to_string()))?;

    let first_layer = doc.get_page(page).get_layer(layer);
    let mut writer = PageWriter::new(&doc, first_layer, &regular, &bold);

    render_header(&mut writer, mom);
    render_attendees(&mut writer, mom);
    render_agenda(&mut writer, mom);
    render_discussions(&mut writer, mom);
    render_decisions(&mut writer, mom);
    render_actions(&mut writer, mom);
    render_next_steps(&mut writer, mom);
    render_closing(&mut writer, mom);

    drop(writer);
    doc.save_to_bytes()
        .map_err(|e| ReferatError::Render(e.to_string()))
}

fn render_header(writer: &mut PageWriter<'_>, mom: &MoMRecord) {
    if let Some(title) = &mom.title {
        writer.write_centered(title, TITLE_SIZE, TITLE_LEADING, true);
        writer.space(6.0);
    }

    if let Some(date) = &mom.date {
        writer.write_line(&StyledLine::body(format!("Date: {}", date), 0.0), 0.0);
    }
    if let Some(time) = &mom.time {
        writer.write_line(&StyledLine::body(format!("Time: {}", time), 0.0), 0.0);
    }
    if let Some(venue) = &mom.venue {
        writer.write_line(&StyledLine::body(format!("Venue: {}", venue), 0.0), 0.0);
    }
    writer.space(SECTION_SPACING);
}

fn render_attendees(writer: &mut PageWriter<'_>, mom: &MoMRecord) {
    let mut lines = vec![StyledLine::heading("Attendees:")];
    if mom.attendees.is_empty() {
        lines.extend(body_lines("No attendees listed.", 0.0));
    } else {
        for (idx, name) in mom.attendees.iter().enumerate() {
            lines.extend(body_lines(&format!("{}. {}", idx + 1, name), 0.0));
        }
    }
    writer.boxed_section(&lines);
}

fn render_agenda(writer: &mut PageWriter<'_>, mom: &MoMRecord) {
    let mut lines = vec![StyledLine::heading("Purpose & Agenda:")];
    match &mom.purpose {
        Some(purpose) => lines.extend(body_lines(purpose, 0.0)),
        None => lines.extend(body_lines("No purpose specified.", 0.0)),
    }
    for item in &mom.agenda {
        lines.extend(body_lines(&format!("\u{2022} {}", item), BULLET_INDENT));
    }
    writer.boxed_section(&lines);
}

fn render_discussions(writer: &mut PageWriter<'_>, mom: &MoMRecord) {
    // Only the heading is boxed; the content flows so long discussions can
    // break naturally across pages.
    writer.boxed_section(&[StyledLine::heading("Key Discussion Points:")]);

    if mom.discussions.is_empty() {
        writer.flowing(&body_lines("No discussion points available.", 0.0));
        writer.space(SECTION_SPACING);
        return;
    }

    for (idx, section) in mom.discussions.iter().enumerate() {
        let mut title_line =
            StyledLine::body(format!("{}. {}", idx + 1, section.section_title), 0.0);
        title_line.bold = true;
        writer.write_line(&title_line, 0.0);

        for point in &section.points {
            match point {
                Point::Plain(text) => {
                    writer.flowing(&body_lines(&format!("\u{2022} {}", text), BULLET_INDENT));
                }
                Point::Structured { text, subpoints } => {
                    if !text.is_empty() {
                        writer.flowing(&body_lines(&format!("\u{2022} {}", text), BULLET_INDENT));
                    }
                    for subpoint in subpoints {
                        writer.flowing(&body_lines(
                            &format!("\u{2013} {}", subpoint),
                            BULLET_INDENT * 2.0,
                        ));
                    }
                }
            }
        }
        writer.space(6.0);
    }
    writer.space(SECTION_SPACING);
}

fn render_decisions(writer: &mut PageWriter<'_>, mom: &MoMRecord) {
    let mut lines = vec![StyledLine::heading("Decisions:")];
    if mom.decisions.is_empty() {
        lines.extend(body_lines(
            "No formal decisions were made during this meeting.",
            0.0,
        ));
    } else {
        for decision in &mom.decisions {
            lines.extend(body_lines(
                &format!("\u{2022} {}", decision.display_text()),
                BULLET_INDENT,
            ));
        }
    }
    writer.boxed_section(&lines);
}

fn render_actions(writer: &mut PageWriter<'_>, mom: &MoMRecord) {
    if mom.actions.is_empty() {
        writer.boxed_section(&[
            StyledLine::heading("Action Items:"),
            StyledLine::body("No action items assigned.", 0.0),
        ]);
        return;
    }

    let structured: Vec<&ActionItem> = mom
        .actions
        .iter()
        .filter_map(|e| match e {
            ActionEntry::Structured(item) => Some(item),
            ActionEntry::Plain(_) => None,
        })
        .collect();

    if structured.len() == mom.actions.len() {
        writer.boxed_section(&[StyledLine::heading("Action Items:")]);
        render_action_table(writer, &structured);
        writer.space(SECTION_SPACING);
    } else {
        let mut lines = vec![StyledLine::heading("Action Items:")];
        for entry in &mom.actions {
            lines.extend(body_lines(
                &format!("\u{2022} {}", entry.display_text()),
                BULLET_INDENT,
            ));
        }
        writer.boxed_section(&lines);
    }
}

/// Four-column grid: Item, Owner, Status, Notes.
fn render_action_table(writer: &mut PageWriter<'_>, actions: &[&ActionItem]) {
    const COLUMN_RATIOS: [f32; 4] = [0.4, 0.2, 0.2, 0.2];
    const CELL_PADDING: f32 = 3.0;
    let widths: Vec<f32> = COLUMN_RATIOS.iter().map(|r| r * CONTENT_WIDTH).collect();

    let header = ["Item", "Owner", "Status", "Notes"];
    render_table_row(writer, &widths, CELL_PADDING, &header.map(String::from), true);

    for action in actions {
        let cells = [
            action.item.clone(),
            action.owner.clone(),
            action.status.clone(),
            action.notes.clone(),
        ];
        render_table_row(writer, &widths, CELL_PADDING, &cells, false);
    }
}

fn render_table_row(
    writer: &mut PageWriter<'_>,
    widths: &[f32],
    padding: f32,
    cells: &[String; 4],
    bold: bool,
) {
    // Wrap each cell and size the row to the tallest one. Cells are capped
    // at one page worth of lines so a row never draws past the bottom
    // margin; an `ensure` for a full page always succeeds after a break.
    let usable = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max_cell_lines = (((usable - 2.0 * padding) / BODY_LEADING) as usize).max(1);
    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let mut lines = wrap(cell, width - 2.0 * padding, BODY_SIZE);
            lines.truncate(max_cell_lines);
            lines
        })
        .collect();
    let row_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
    let row_height = row_lines as f32 * BODY_LEADING + 2.0 * padding;

    writer.ensure(row_height);
    let top = writer.y;
    let bottom = top - row_height;

    let mut x = MARGIN_SIDE;
    for (cell_lines, width) in wrapped.iter().zip(widths) {
        let mut y = top - padding;
        for line in cell_lines {
            y -= BODY_LEADING;
            writer.layer.use_text(
                line.clone(),
                BODY_SIZE,
                mm(x + padding),
                mm(y),
                writer.font(bold),
            );
        }
        writer.stroke_rect(x, top, x + width, bottom, 1.0);
        x += width;
    }

    writer.y = bottom;
}

fn render_next_steps(writer: &mut PageWriter<'_>, mom: &MoMRecord) {
    let mut lines = vec![StyledLine::heading("Next Steps:")];
    if mom.next_steps.is_empty() {
        lines.extend(body_lines("No next steps specified.", 0.0));
    } else {
        for step in &mom.next_steps {
            lines.extend(body_lines(&format!("\u{2022} {}", step), BULLET_INDENT));
        }
    }
    writer.boxed_section(&lines);
}

fn render_closing(writer: &mut PageWriter<'_>, mom: &MoMRecord) {
    if let Some(conclusion) = &mom.conclusion {
        let mut lines = vec![StyledLine::heading("Conclusion:")];
        for paragraph in conclusion.split("\n\n") {
            lines.extend(body_lines(paragraph.trim(), 0.0));
        }
        writer.boxed_section(&lines);
    }

    if let Some(summary) = &mom.summary {
        let mut lines = vec![StyledLine::heading("Summary:")];
        for paragraph in summary.split("\n\n") {
            lines.extend(body_lines(paragraph.trim(), 0.0));
        }
        writer.boxed_section(&lines);
    }

    if let Some(prepared_by) = &mom.prepared_by {
        writer.write_line(
            &StyledLine::body(format!("Minutes Prepared By: {}", prepared_by), 0.0),
            0.0,
        );
    }
    if let Some(prep_date) = &mom.preparation_date {
        writer.write_line(
            &StyledLine::body(format!("Date of Preparation: {}", prep_date), 0.0),
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mom::DiscussionSection;

    #[test]
    fn test_empty_record_renders_without_failure() {
        let bytes = render_pdf(&MoMRecord::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_full_record_renders() {
        let mom = MoMRecord {
            title: Some("Weekly Sync".to_string()),
            date: Some("2025-06-02".to_string()),
            time: Some("10:00".to_string()),
            venue: Some("Room 4".to_string()),
            purpose: None,
            attendees: vec!["Alice".to_string(), "Bob".to_string()],
            agenda: vec!["Status".to_string()],
            discussions: vec![DiscussionSection {
                section_title: "Status".to_string(),
                points: vec![
                    Point::Plain("On track".to_string()),
                    Point::Structured {
                        text: "Risks".to_string(),
                        subpoints: vec!["Vendor delay".to_string()],
                    },
                ],
            }],
            decisions: vec![ActionEntry::Plain("Ship Friday".to_string())],
            actions: vec![ActionEntry::Structured(ActionItem {
                item: "Write report".to_string(),
                owner: "Bob".to_string(),
                status: "Pending".to_string(),
                notes: String::new(),
            })],
            next_steps: vec!["Schedule retro".to_string()],
            conclusion: Some("Wrapped on time.".to_string()),
            summary: Some("Short and focused.".to_string()),
            prepared_by: Some("Carol".to_string()),
            preparation_date: Some("2025-06-02".to_string()),
        };

        let bytes = render_pdf(&mom).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_long_discussion_spans_pages() {
        let points: Vec<Point> = (0..200)
            .map(|i| Point::Plain(format!("Discussion point number {} with enough text to wrap onto multiple lines in the rendered output", i)))
            .collect();
        let mom = MoMRecord {
            discussions: vec![DiscussionSection {
                section_title: "Marathon".to_string(),
                points,
            }],
            ..Default::default()
        };

        // Must not panic or error while paginating.
        let bytes = render_pdf(&mom).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_oversized_action_cell_stays_within_one_page() {
        let huge_notes = "follow up with the vendor about delivery timelines "
            .repeat(200);
        let mom = MoMRecord {
            actions: vec![ActionEntry::Structured(ActionItem {
                item: "Chase the contract".to_string(),
                owner: "Alice".to_string(),
                status: "Open".to_string(),
                notes: huge_notes,
            })],
            ..Default::default()
        };

        // A cell taller than a page is capped, not drawn past the margin.
        let bytes = render_pdf(&mom).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_respects_budget() {
        let lines = wrap("alpha beta gamma delta epsilon", 60.0, 12.0);
        // 60pt at 12pt Helvetica fits roughly ten characters per line.
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        let lines = wrap("antidisestablishmentarianism", 60.0, 12.0);
        assert!(lines.len() >= 2);
    }
}
