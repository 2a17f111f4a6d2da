//! HTML rendering of the single page
//!
//! The page is built by hand with `fmt::Write`; every piece of workbook or
//! user data goes through [`escape_html`].

use std::fmt::{self, Write};

use tradedocs::{
    export_columns, DocumentType, FieldKind, FieldSpec, ReferenceLists, Session, Table,
};

use crate::state::Notice;

/// Everything one render needs
pub struct PageView<'a> {
    /// Spreadsheet file names found in the data directory
    pub files: &'a [String],
    pub session: &'a Session,
    pub notice: Option<&'a Notice>,
    /// Sheet chosen for the preview, if any
    pub preview_sheet: Option<&'a str>,
    pub preview_rows: usize,
}

/// Render the full page
pub fn render(view: &PageView<'_>) -> String {
    let mut out = String::with_capacity(16 * 1024);
    if let Err(e) = write_page(&mut out, view) {
        tracing::error!("Failed to render page: {e}");
    }
    out
}

/// Escape text for element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLE: &str = "body{font-family:sans-serif;margin:2em auto;max-width:72em;padding:0 1em}\
table{border-collapse:collapse;margin:.5em 0}\
td,th{border:1px solid #ccc;padding:.2em .5em;text-align:left}\
th{background:#f3f3f3}\
.notice{padding:.5em 1em;margin:1em 0;border-radius:4px}\
.success{background:#e6f4ea}.error{background:#fce8e6}.warning{background:#fef7e0}\
form.doc label{display:block;margin:.4em 0}\
form.doc input,form.doc select{margin-left:.5em;min-width:18em}\
section{border-top:1px solid #ddd;margin-top:1.5em}";

// Copies the data-a{i} attributes of the chosen option into the read-only
// inputs listed in data-targets.
const SCRIPT: &str = "document.querySelectorAll('select[data-targets]').forEach(function(s){\
function fill(){var o=s.options[s.selectedIndex];\
s.dataset.targets.split(' ').forEach(function(id,i){\
var t=document.getElementById(id);if(t){t.value=o?(o.getAttribute('data-a'+i)||''):'';}});}\
s.addEventListener('change',fill);fill();});";

fn write_page(out: &mut String, view: &PageView<'_>) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\"><head><meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Trade documents</title>")?;
    writeln!(out, "<style>{STYLE}</style></head><body>")?;
    writeln!(out, "<h1>Trade documents: CMR, Specification and Invoice</h1>")?;

    if let Some(notice) = view.notice {
        write_notice(out, notice)?;
    }

    write_source_section(out, view)?;

    match view.session.references() {
        None => {
            writeln!(
                out,
                "<p class=\"notice error\">No workbook loaded. Upload a file or place one in the data directory.</p>"
            )?;
        }
        Some(refs) => {
            write_workbook_section(out, view)?;
            write_warnings(out, refs)?;
            for document_type in DocumentType::ALL {
                write_document_section(out, view.session, refs, document_type)?;
            }
            writeln!(out, "<script>{SCRIPT}</script>")?;
        }
    }

    writeln!(out, "</body></html>")
}

fn write_notice(out: &mut String, notice: &Notice) -> fmt::Result {
    let (class, text) = match notice {
        Notice::Success(text) => ("success", text),
        Notice::Error(text) => ("error", text),
    };
    writeln!(out, "<p class=\"notice {class}\">{}</p>", escape_html(text))
}

fn write_source_section(out: &mut String, view: &PageView<'_>) -> fmt::Result {
    writeln!(out, "<section id=\"source\"><h2>Workbook</h2>")?;

    if view.files.is_empty() {
        writeln!(out, "<p>No spreadsheet files in the data directory.</p>")?;
    } else {
        writeln!(out, "<form method=\"post\" action=\"/source/select\">")?;
        writeln!(out, "<label>Local file <select name=\"file\">")?;
        for file in view.files {
            let selected = if view.session.source_name() == Some(file.as_str()) {
                " selected"
            } else {
                ""
            };
            let file = escape_html(file);
            writeln!(out, "<option value=\"{file}\"{selected}>{file}</option>")?;
        }
        writeln!(out, "</select></label> <button type=\"submit\">Open</button></form>")?;
    }

    writeln!(
        out,
        "<form method=\"post\" action=\"/source/upload\" enctype=\"multipart/form-data\">"
    )?;
    writeln!(
        out,
        "<label>Or upload <input type=\"file\" name=\"file\" accept=\".xlsx,.xlsm,.xlsb\"></label> \
         <button type=\"submit\">Upload</button></form>"
    )?;
    writeln!(out, "</section>")
}

fn write_workbook_section(out: &mut String, view: &PageView<'_>) -> fmt::Result {
    let Some(workbook) = view.session.workbook() else {
        return Ok(());
    };
    let name = view.session.source_name().unwrap_or_default();
    writeln!(
        out,
        "<p class=\"notice success\">Workbook opened: {}</p>",
        escape_html(name)
    )?;

    let sheets = workbook.sheet_names();
    writeln!(out, "<form method=\"get\" action=\"/\">")?;
    writeln!(out, "<label>Preview sheet <select name=\"sheet\">")?;
    for sheet in &sheets {
        let selected = if view.preview_sheet == Some(*sheet) {
            " selected"
        } else {
            ""
        };
        let sheet = escape_html(sheet);
        writeln!(out, "<option value=\"{sheet}\"{selected}>{sheet}</option>")?;
    }
    writeln!(out, "</select></label> <button type=\"submit\">Show</button></form>")?;

    if let Some(table) = view.preview_sheet.and_then(|s| workbook.table(s)) {
        write_preview(out, table, view.preview_rows)?;
    }
    Ok(())
}

fn write_preview(out: &mut String, table: &Table, max_rows: usize) -> fmt::Result {
    writeln!(
        out,
        "<p>First {} of {} rows of <b>{}</b></p>",
        table.row_count().min(max_rows),
        table.row_count(),
        escape_html(table.name())
    )?;
    writeln!(out, "<table><thead><tr>")?;
    for column in table.columns() {
        write!(out, "<th>{}</th>", escape_html(column))?;
    }
    writeln!(out, "</tr></thead><tbody>")?;
    for row in table.head(max_rows) {
        write!(out, "<tr>")?;
        for cell in row {
            write!(out, "<td>{}</td>", escape_html(&cell.to_text()))?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody></table>")
}

fn write_warnings(out: &mut String, refs: &ReferenceLists) -> fmt::Result {
    if refs.warnings.is_empty() {
        return Ok(());
    }
    writeln!(out, "<div class=\"notice warning\"><ul>")?;
    for warning in &refs.warnings {
        writeln!(out, "<li>{}</li>", escape_html(&warning.to_string()))?;
    }
    writeln!(out, "</ul></div>")
}

fn write_document_section(
    out: &mut String,
    session: &Session,
    refs: &ReferenceLists,
    document_type: DocumentType,
) -> fmt::Result {
    let slug = document_type.slug();
    writeln!(
        out,
        "<section id=\"{slug}\"><h2>{}</h2>",
        escape_html(document_type.title())
    )?;

    writeln!(
        out,
        "<form class=\"doc\" method=\"post\" action=\"/documents/{slug}\">"
    )?;
    for field in document_type.fields() {
        write_field(out, refs, slug, field)?;
    }
    writeln!(
        out,
        "<button type=\"submit\">Add {}</button></form>",
        escape_html(document_type.title())
    )?;

    let records = session.records(document_type);
    if records.is_empty() {
        writeln!(out, "<p>No records yet.</p>")?;
    } else {
        let columns = export_columns(records);
        writeln!(out, "<table><thead><tr>")?;
        for column in &columns {
            write!(out, "<th>{}</th>", escape_html(column))?;
        }
        writeln!(out, "</tr></thead><tbody>")?;
        for record in records {
            write!(out, "<tr>")?;
            for column in &columns {
                let text = record.get(column).map(|v| v.to_text()).unwrap_or_default();
                write!(out, "<td>{}</td>", escape_html(&text))?;
            }
            writeln!(out, "</tr>")?;
        }
        writeln!(out, "</tbody></table>")?;
    }

    writeln!(
        out,
        "<p><a href=\"/documents/{slug}/export\" download=\"{}\">Download {}</a></p>",
        document_type.file_name(),
        document_type.file_name()
    )?;
    writeln!(out, "</section>")
}

fn write_field(
    out: &mut String,
    refs: &ReferenceLists,
    slug: &str,
    field: &FieldSpec,
) -> fmt::Result {
    let label = escape_html(field.column);
    let key = field.key;
    match field.kind {
        FieldKind::Text => writeln!(
            out,
            "<label>{label}<input type=\"text\" name=\"{key}\"></label>"
        ),
        FieldKind::Date => writeln!(
            out,
            "<label>{label}<input type=\"date\" name=\"{key}\"></label>"
        ),
        FieldKind::Choice { options, attach } => {
            let targets: Vec<String> = (0..attach.len())
                .map(|i| format!("{slug}-{key}-a{i}"))
                .collect();

            write!(out, "<label>{label}<select name=\"{key}\"")?;
            if !targets.is_empty() {
                write!(out, " data-targets=\"{}\"", targets.join(" "))?;
            }
            writeln!(out, ">")?;
            for name in options.options(refs) {
                let escaped = escape_html(name);
                write!(out, "<option value=\"{escaped}\"")?;
                for (i, (_, lookup)) in attach.iter().enumerate() {
                    let value = refs.resolve(*lookup, name).unwrap_or_default();
                    write!(out, " data-a{i}=\"{}\"", escape_html(value))?;
                }
                writeln!(out, ">{escaped}</option>")?;
            }
            writeln!(out, "</select></label>")?;

            for ((column, _), id) in attach.iter().zip(&targets) {
                writeln!(
                    out,
                    "<label>{}<input type=\"text\" id=\"{id}\" readonly></label>",
                    escape_html(column)
                )?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedocs::{FormValues, WorkbookSource};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A&B's"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_without_workbook() {
        let session = Session::default();
        let html = render(&PageView {
            files: &["ref.xlsx".to_string()],
            session: &session,
            notice: Some(&Notice::Error("Bad <file>".into())),
            preview_sheet: None,
            preview_rows: 50,
        });

        assert!(html.contains("No workbook loaded"));
        assert!(html.contains("<option value=\"ref.xlsx\">"));
        assert!(html.contains("Bad &lt;file&gt;"));
        assert!(!html.contains("action=\"/documents/cmr\""));
    }

    #[test]
    fn test_render_forms_with_empty_lists() {
        let mut table = Table::new("Other", ["x"]);
        table.push_row(vec!["1".into()]).unwrap();
        let bytes = tradedocs::write_tables(&[table]).unwrap();

        let mut session = Session::default();
        session
            .open(WorkbookSource::bytes("bare.xlsx", bytes))
            .unwrap();
        session
            .submit(DocumentType::Invoice, &FormValues::new())
            .unwrap();

        let html = render(&PageView {
            files: &[],
            session: &session,
            notice: None,
            preview_sheet: Some("Other"),
            preview_rows: 50,
        });

        for dt in DocumentType::ALL {
            assert!(html.contains(&format!("action=\"/documents/{}\"", dt.slug())));
        }
        assert!(html.contains("<select name=\"sender\" data-targets=\"cmr-sender-a0\">\n</select>"));
        assert!(html.contains("<select name=\"incoterms\">\n</select>"));
        assert!(html.contains("First 1 of 1 rows"));
        assert!(html.contains("Sheet &#39;Sender&#39; not found"));
        assert!(html.contains("<th>Invoice No.</th>"));
    }
}
