//! Shared output formatting for scan and migrate.

use std::path::Path;

use notemigrate_core::migrate::{
    ATTACHMENT_DIR, CLEAN_DIR, LINK_DIR, MigrationReport, REMOTE_CONTENTS_DIR, ScannedNote,
};
use tabled::{Table, Tabled, settings::Style};

/// Row for the scan table.
#[derive(Tabled)]
struct ScanRow {
    #[tabled(rename = "Note")]
    path: String,
    #[tabled(rename = "Links")]
    links: usize,
    #[tabled(rename = "Attachments")]
    attachments: usize,
    #[tabled(rename = "Category")]
    category: &'static str,
}

fn category(note: &ScannedNote) -> &'static str {
    match (note.class.remote_links, note.class.attachments) {
        (false, false) => "clean",
        (true, false) => "link",
        (false, true) => "attachment",
        (true, true) => "link+attachment",
    }
}

/// Print scanned notes as a table followed by per-category totals.
pub fn print_scan_table(notes: &[ScannedNote]) {
    if notes.is_empty() {
        println!("(no notes found)");
        return;
    }

    let rows = notes.iter().map(|n| ScanRow {
        path: n.path.display().to_string(),
        links: n.link_refs,
        attachments: n.attachment_refs,
        category: category(n),
    });
    println!("{}", Table::new(rows).with(Style::rounded()));

    let clean = notes.iter().filter(|n| n.class.is_clean()).count();
    let links = notes.iter().filter(|n| n.class.remote_links).count();
    let attachments = notes.iter().filter(|n| n.class.attachments).count();
    println!();
    println!("Notes:            {}", notes.len());
    println!("  clean:          {}", clean);
    println!("  with links:     {}", links);
    println!("  with attachments: {}", attachments);
}

pub fn print_scan_json(notes: &[ScannedNote]) {
    println!("{}", serde_json::to_string_pretty(notes).unwrap_or_default());
}

pub fn print_scan_quiet(notes: &[ScannedNote]) {
    for note in notes {
        println!("{}", note.path.display());
    }
}

/// Print the end-of-run summary.
pub fn print_summary(report: &MigrationReport, output_dir: &Path) {
    let att = &report.attachments;
    let remote = &report.remote;

    println!();
    println!("Migration complete:");
    println!("  Notes found:               {}", report.notes_found);
    println!("  Clean notes copied:        {}", report.clean.copied);
    println!("  Link notes copied:         {}", report.links.copied);
    println!("  Attachment notes copied:   {}", att.notes.copied);
    println!("  Attachments copied:        {}", att.attachments_copied);
    if att.attachments_missing > 0 {
        println!("  Attachments missing:       {}", att.attachments_missing);
    }
    if att.attachments_failed > 0 {
        println!("  Attachments failed:        {}", att.attachments_failed);
    }
    println!("  Archives extracted:        {}", att.archives_extracted);
    if att.archives_failed > 0 {
        println!("  Archives failed:           {}", att.archives_failed);
    }
    println!("  Remote folders fetched:    {}", remote.folders_fetched);
    if remote.folders_failed + remote.folders_unresolved > 0 {
        println!(
            "  Remote folders failed:     {}",
            remote.folders_failed + remote.folders_unresolved
        );
    }
    println!("  Remote files downloaded:   {}", remote.files_downloaded);
    println!("  Notes failed:              {}", report.notes_failed());
    println!();
    println!("Output written to {}:", output_dir.display());
    println!("  {CLEAN_DIR}/                      notes without links or attachments");
    println!("  {LINK_DIR}/<note>/                notes with remote links");
    println!("  {LINK_DIR}/<note>/{REMOTE_CONTENTS_DIR}/ downloaded remote files");
    println!("  {ATTACHMENT_DIR}/<note>/          notes with their attachments");
    println!("    (archives are unpacked into <archive>_extracted/)");
}

pub fn print_report_json(report: &MigrationReport) {
    println!("{}", serde_json::to_string_pretty(report).unwrap_or_default());
}
