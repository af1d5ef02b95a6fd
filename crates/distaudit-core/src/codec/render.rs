//! Markup rendering for snapshots, diff fragments and report pages.
//!
//! Everything rendered here parses back with [`crate::codec::parse_snapshot`].
//! Directory names sit in their own closed `dir` element so that the parser's
//! directory channel never absorbs resource text.

use crate::diff::model::Reconciliation;
use crate::model::{DigestKind, ResourceRecord, Snapshot};
use quick_xml::escape::escape;
use std::collections::BTreeMap;
use std::fmt::Write as _;

const DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\"\n \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">\n";

/// Group records by directory (lexicographic), each group sorted by name
/// then by the full key.
fn group_by_directory(records: &[ResourceRecord]) -> BTreeMap<&str, Vec<&ResourceRecord>> {
    let mut groups: BTreeMap<&str, Vec<&ResourceRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.directory.as_str())
            .or_default()
            .push(record);
    }
    for members in groups.values_mut() {
        members.sort();
    }
    groups
}

fn page(date: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 512);
    out.push_str(DOCTYPE);
    out.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"en\" lang=\"en\">\n");
    let _ = write!(
        out,
        "<head><title>Audited On {}</title></head><body>\n",
        escape(date)
    );
    out.push_str(body);
    out.push_str("</body></html>\n");
    out
}

/// One scanned tree within a snapshot document
#[derive(Debug, Clone, Copy)]
pub struct AuditSection<'a> {
    /// Root the tree was scanned from, rendered as `base-dir`
    pub base_dir: &'a str,
    pub records: &'a [ResourceRecord],
}

fn render_section(body: &mut String, base_dir: Option<&str>, records: &[ResourceRecord]) {
    if let Some(base_dir) = base_dir {
        let _ = writeln!(
            body,
            "<p>Base directory <span class='base-dir'>{}</span></p>",
            escape(base_dir)
        );
    }
    body.push_str("<ul class='dirs'>\n");
    for (directory, records) in group_by_directory(records) {
        let _ = writeln!(
            body,
            "<li class='group'><span class='dir'>{}</span>\n<ul>",
            escape(directory)
        );
        for record in records {
            let _ = write!(
                body,
                "<li><span class='resource'>{}</span>",
                escape(&record.name)
            );
            for kind in DigestKind::ALL {
                let _ = write!(
                    body,
                    " <span class='{}'>{}</span>",
                    kind.class(),
                    escape(record.digest(kind))
                );
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n</li>\n");
    }
    body.push_str("</ul>\n");
}

fn render_document(created_at: &str, sections: &[(Option<&str>, &[ResourceRecord])]) -> String {
    let mut body = String::new();
    for (position, (base_dir, records)) in sections.iter().enumerate() {
        body.push_str("<div class='audit'>\n");
        // The created marker appears once; the parser appends repeated text.
        if position == 0 {
            let _ = writeln!(
                body,
                "<p>Audit ran on <span class='created'>{}</span></p>",
                escape(created_at)
            );
        }
        render_section(&mut body, *base_dir, records);
        body.push_str("</div>\n");
    }
    page(created_at, &body)
}

/// Render a full snapshot as a self-contained XHTML document.
pub fn render_snapshot(snapshot: &Snapshot) -> String {
    render_document(&snapshot.created_at, &[(None, snapshot.resources.as_slice())])
}

/// Render several scanned trees as one snapshot document, one `div.audit`
/// per tree tagged with its `base-dir`.
///
/// Parsing the result yields the records of every section in order.
pub fn render_audit(created_at: &str, sections: &[AuditSection<'_>]) -> String {
    if sections.is_empty() {
        let empty: &[ResourceRecord] = &[];
        return render_document(created_at, &[(None, empty)]);
    }
    let sections: Vec<(Option<&str>, &[ResourceRecord])> = sections
        .iter()
        .map(|section| (Some(section.base_dir), section.records))
        .collect();
    render_document(created_at, &sections)
}

fn render_groups(out: &mut String, records: &[ResourceRecord]) {
    for (directory, members) in group_by_directory(records) {
        let _ = write!(
            out,
            "<li class='group'><span class='dir'>{}</span><ul>",
            escape(directory)
        );
        for record in members {
            let _ = write!(out, "<li class='resource'>{}</li>", escape(&record.name));
        }
        out.push_str("</ul></li>");
    }
}

/// Render one reconciliation as a diff fragment.
///
/// The heading links the two snapshot documents (`{prefix}-{created}.html`);
/// sections appear in the order Added, Modified, Removed and list names only.
pub fn render_diff_fragment(
    prefix: &str,
    newer: &Snapshot,
    older: &Snapshot,
    reconciliation: &Reconciliation,
) -> String {
    let older_on = escape(&older.created_at);
    let newer_on = escape(&newer.created_at);
    let prefix = escape(prefix);

    let mut out = String::new();
    let _ = write!(
        out,
        "<div class='diff'><h1>From <a href='{prefix}-{older_on}.html' class='start-date'>{older_on}</a> \
         Till <a href='{prefix}-{newer_on}.html' class='end-date'>{newer_on}</a></h1>",
    );

    let sections: [(&str, &str, &[ResourceRecord]); 3] = [
        ("Added Resources", "added", &reconciliation.added),
        ("Modified Resources", "modified", &reconciliation.modified),
        ("Removed Resources", "deleted", &reconciliation.removed),
    ];
    for (title, class, records) in sections {
        let _ = write!(out, "<h2>{}</h2><ul class='{}'>", title, class);
        render_groups(&mut out, records);
        out.push_str("</ul>");
    }

    out.push_str("</div>");
    out
}

/// Wrap a fragment in XHTML page chrome dated `date`.
pub fn wrap_page(date: &str, fragment: &str) -> String {
    let body = format!(
        "<p>Audit ran on <span class='created'>{}</span></p>{}\n",
        escape(date),
        fragment
    );
    page(date, &body)
}
