//! HTML renderings of the projected document: a flat clipboard fragment and the
//! self-contained paginated print document.

use std::fmt::Write;

use crate::export::font_metrics::PageConfig;
use crate::export::paginate::{LineKind, PrintDocument};
use crate::resume::projection::{BlockBody, RenderedDocument, RenderedEntry};

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `<div class="resume">` fragment for pasting into other editors.
pub fn render_fragment(document: &RenderedDocument) -> String {
    let mut html = String::from(r#"<div class="resume">"#);
    for block in &document.blocks {
        html.push_str("<section>");
        if let Some(heading) = &block.heading {
            let _ = write!(html, "<h2>{}</h2>", escape_html(heading));
        }
        match &block.body {
            BlockBody::Contact(card) => {
                let _ = write!(html, "<h1>{}</h1>", escape_html(&card.name));
                push_joined(&mut html, "p", &card.details, " | ");
                push_joined(&mut html, "p", &card.links, " | ");
            }
            BlockBody::Entries(entries) => {
                for entry in entries {
                    push_entry(&mut html, entry);
                }
            }
            BlockBody::List(items) => push_joined(&mut html, "p", items, " • "),
        }
        html.push_str("</section>");
    }
    html.push_str("</div>");
    html
}

fn push_entry(html: &mut String, entry: &RenderedEntry) {
    html.push_str("<div>");
    let _ = write!(html, "<h3>{}</h3>", escape_html(&entry.title));
    if let Some(subtitle) = &entry.subtitle {
        let _ = write!(html, "<p><strong>{}</strong></p>", escape_html(subtitle));
    }
    push_joined(html, "p", &entry.aside, " | ");
    if let Some(description) = &entry.description {
        let _ = write!(html, "<p>{}</p>", escape_html(description));
    }
    if let Some(note) = &entry.note {
        let _ = write!(html, "<p><em>{}</em></p>", escape_html(note));
    }
    html.push_str("</div>");
}

fn push_joined(html: &mut String, tag: &str, items: &[String], separator: &str) {
    if items.is_empty() {
        return;
    }
    let escaped: Vec<String> = items.iter().map(|s| escape_html(s)).collect();
    let _ = write!(html, "<{tag}>{}</{tag}>", escaped.join(separator));
}

/// Full print document: `@page` rules for the configured paper and one element per page.
pub fn render_print_html(document: &PrintDocument, config: &PageConfig) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n\
         @page {{ size: {size}; margin: {margin}in }}\n\
         body {{ margin: 0; font-family: {font}; font-size: {size_pt}pt; line-height: {leading}pt }}\n\
         .page {{ break-after: page; page-break-after: always }}\n\
         .page:last-child {{ break-after: auto; page-break-after: auto }}\n\
         .line {{ margin: 0; min-height: {leading}pt }}\n\
         .name {{ font-weight: 700; text-align: center }}\n\
         .contact-detail {{ text-align: center }}\n\
         .heading {{ font-weight: 700; border-bottom: 1px solid #000 }}\n\
         .entry-title {{ font-weight: 600 }}\n\
         .entry-meta, .note {{ font-style: italic }}\n\
         </style>\n</head>\n<body>\n",
        title = escape_html(&document.file_name),
        size = document.page_size,
        margin = document.margin_in,
        font = config.font.css_stack(),
        size_pt = config.font_size_pt,
        leading = config.line_height_pt,
    );
    for page in &document.pages {
        let _ = writeln!(html, "<div class=\"page\" data-page=\"{}\">", page.number);
        for line in &page.lines {
            let _ = writeln!(
                html,
                "<p class=\"line {}\">{}</p>",
                line_class(line.kind),
                escape_html(&line.text)
            );
        }
        html.push_str("</div>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn line_class(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Name => "name",
        LineKind::ContactDetail => "contact-detail",
        LineKind::Heading => "heading",
        LineKind::EntryTitle => "entry-title",
        LineKind::EntryMeta => "entry-meta",
        LineKind::Body => "body",
        LineKind::Note => "note",
        LineKind::Spacer => "spacer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::font_metrics::{letter_page_config, FontFamily};
    use crate::export::paginate::build_print_document;
    use crate::resume::models::{ContactPatch, ResumeState, SkillDraft};
    use crate::resume::projection::project;
    use crate::resume::store::DocumentStore;

    #[test]
    fn test_escape_html_special_characters() {
        assert_eq!(
            escape_html(r#"<b>"R&D" 'lead'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &#39;lead&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_fragment_wraps_in_resume_div() {
        let html = render_fragment(&project(&ResumeState::default()));
        assert!(html.starts_with(r#"<div class="resume">"#));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_fragment_escapes_user_text() {
        let mut store = DocumentStore::default();
        store.update_contact(&ContactPatch {
            full_name: Some("<script>alert(1)</script>".to_string()),
            ..Default::default()
        });
        store.add_skill(SkillDraft {
            name: "C & C++".to_string(),
        });
        let html = render_fragment(&project(&store.state()));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<h2>SKILLS</h2><p>C &amp; C++</p>"));
    }

    #[test]
    fn test_print_html_sets_page_rule() {
        let config = letter_page_config(FontFamily::Inter);
        let doc = build_print_document(&ResumeState::default(), &config);
        let html = render_print_html(&doc, &config);
        assert!(html.contains("@page { size: letter; margin: 0.5in }"));
        assert_eq!(html.matches("class=\"page\"").count(), doc.pages.len());
    }
}
