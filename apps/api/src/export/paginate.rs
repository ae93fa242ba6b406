//! Print layout: turns the projected document into wrapped lines and packs them onto pages.
//!
//! Each page holds `PageConfig::usable_height_lines` line slots. Text is wrapped with the
//! static glyph-width tables at the page's text width. A section heading is never the last
//! line of a page; it moves down with the first line of its body.

use serde::Serialize;

use crate::export::font_metrics::{get_metrics, FontMetricTable, PageConfig};
use crate::resume::models::ResumeState;
use crate::resume::projection::{project, BlockBody, ContactCard, RenderedDocument, RenderedEntry};

const DEFAULT_FILE_NAME: &str = "Resume.pdf";
const FILE_SUFFIX: &str = "_Resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    Name,
    ContactDetail,
    Heading,
    EntryTitle,
    EntryMeta,
    Body,
    Note,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintLine {
    pub kind: LineKind,
    pub text: String,
}

impl PrintLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        PrintLine {
            kind,
            text: text.into(),
        }
    }

    fn spacer() -> Self {
        PrintLine::new(LineKind::Spacer, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: u16,
    pub lines: Vec<PrintLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDocument {
    pub file_name: String,
    pub page_size: &'static str,
    pub margin_in: f32,
    pub pages: Vec<Page>,
}

impl PrintDocument {
    /// File name of the written print document: same stem as `file_name`, `.html` extension.
    pub fn html_file_name(&self) -> String {
        let stem = self.file_name.strip_suffix(".pdf").unwrap_or(&self.file_name);
        format!("{stem}.html")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Projects, lays out and paginates the state. Pure; always yields at least one page.
pub fn build_print_document(state: &ResumeState, config: &PageConfig) -> PrintDocument {
    let document = project(state);
    let lines = layout_lines(&document, config);
    PrintDocument {
        file_name: suggested_file_name(&state.contact.full_name),
        page_size: "letter",
        margin_in: config.margin_in,
        pages: paginate(lines, config.usable_height_lines),
    }
}

/// `"Ada_Lovelace_Resume.pdf"` for `"Ada Lovelace"`; `"Resume.pdf"` when the name is blank.
pub fn suggested_file_name(full_name: &str) -> String {
    let words: Vec<&str> = full_name.split_whitespace().collect();
    if words.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        format!("{}{FILE_SUFFIX}", words.join("_"))
    }
}

/// Flattens the document into print lines. Blocks are separated by one spacer line.
pub fn layout_lines(document: &RenderedDocument, config: &PageConfig) -> Vec<PrintLine> {
    let metrics = get_metrics(config.font);
    let width = config.text_width_em;
    let mut lines = Vec::new();

    for (i, block) in document.blocks.iter().enumerate() {
        if i > 0 {
            lines.push(PrintLine::spacer());
        }
        if let Some(heading) = &block.heading {
            push_wrapped(&mut lines, LineKind::Heading, heading, metrics, width);
        }
        match &block.body {
            BlockBody::Contact(card) => contact_lines(card, metrics, width, &mut lines),
            BlockBody::Entries(entries) => {
                for entry in entries {
                    entry_lines(entry, metrics, width, &mut lines);
                }
            }
            BlockBody::List(items) => {
                push_wrapped(&mut lines, LineKind::Body, &items.join(" • "), metrics, width)
            }
        }
    }
    lines
}

/// Packs lines onto pages of `budget` slots.
///
/// Spacers are dropped at the top of a page. A heading (all of its wrapped lines) that
/// would not fit on the current page together with the line after it starts the next
/// page instead.
pub fn paginate(lines: Vec<PrintLine>, budget: u16) -> Vec<Page> {
    // A heading line plus its first body line must fit on one page.
    let budget = usize::from(budget.max(2));
    let kinds: Vec<LineKind> = lines.iter().map(|l| l.kind).collect();
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Vec<PrintLine> = Vec::new();

    for (i, line) in lines.into_iter().enumerate() {
        if current.is_empty() && line.kind == LineKind::Spacer {
            continue;
        }
        let full = current.len() >= budget;
        let orphaned_heading = !current.is_empty()
            && starts_heading(&kinds, i)
            && current.len() + keep_with_heading(&kinds, i) > budget;
        if full || orphaned_heading {
            let number = next_page_number(&pages);
            pages.push(Page {
                number,
                lines: std::mem::take(&mut current),
            });
            if line.kind == LineKind::Spacer {
                continue;
            }
        }
        current.push(line);
    }

    if !current.is_empty() || pages.is_empty() {
        let number = next_page_number(&pages);
        pages.push(Page {
            number,
            lines: current,
        });
    }
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn starts_heading(kinds: &[LineKind], i: usize) -> bool {
    kinds[i] == LineKind::Heading && (i == 0 || kinds[i - 1] != LineKind::Heading)
}

/// Slots the heading starting at `i` needs: its wrapped lines plus the first line after it.
fn keep_with_heading(kinds: &[LineKind], i: usize) -> usize {
    let run = kinds[i..]
        .iter()
        .take_while(|&&k| k == LineKind::Heading)
        .count();
    if i + run < kinds.len() {
        run + 1
    } else {
        run
    }
}

fn next_page_number(pages: &[Page]) -> u16 {
    u16::try_from(pages.len() + 1).unwrap_or(u16::MAX)
}

fn contact_lines(card: &ContactCard, metrics: &FontMetricTable, width: f32, out: &mut Vec<PrintLine>) {
    push_wrapped(out, LineKind::Name, &card.name, metrics, width);
    push_wrapped(out, LineKind::ContactDetail, &card.details.join(" | "), metrics, width);
    push_wrapped(out, LineKind::ContactDetail, &card.links.join(" | "), metrics, width);
}

fn entry_lines(entry: &RenderedEntry, metrics: &FontMetricTable, width: f32, out: &mut Vec<PrintLine>) {
    let title = match &entry.subtitle {
        Some(subtitle) => format!("{}, {}", entry.title, subtitle),
        None => entry.title.clone(),
    };
    push_wrapped(out, LineKind::EntryTitle, &title, metrics, width);
    push_wrapped(out, LineKind::EntryMeta, &entry.aside.join(" | "), metrics, width);
    if let Some(description) = &entry.description {
        // Hard line breaks in descriptions are kept as separate paragraphs.
        for paragraph in description.lines() {
            push_wrapped(out, LineKind::Body, paragraph, metrics, width);
        }
    }
    if let Some(note) = &entry.note {
        push_wrapped(out, LineKind::Note, note, metrics, width);
    }
}

fn push_wrapped(
    out: &mut Vec<PrintLine>,
    kind: LineKind,
    text: &str,
    metrics: &FontMetricTable,
    width: f32,
) {
    out.extend(
        metrics
            .wrap(text, width)
            .into_iter()
            .map(|line| PrintLine::new(kind, line)),
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
