//! Embed files into a PDF, read them straight back, and pack them into a zip.
//!
//! Usage:
//!   cargo run --example round_trip -- report.pdf notes.txt "données.csv"

use pdf_attachments::{
    archive, archive_filename, embed_attachments, embedded_pdf_filename, extract_attachments,
    Attachment,
};
use std::path::Path;
use std::{env, fs, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <base.pdf> <file>...", args[0]);
        process::exit(1);
    }

    let base = fs::read(&args[1]).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", args[1]);
        process::exit(1);
    });

    let attachments: Vec<Attachment> = args[2..]
        .iter()
        .map(|path| {
            Attachment::from_path(path).unwrap_or_else(|e| {
                eprintln!("Cannot read {path}: {e}");
                process::exit(1);
            })
        })
        .collect();

    // 1. Embed.
    let pdf = embed_attachments(&base, &attachments).unwrap_or_else(|e| {
        eprintln!("Embedding failed: {e}");
        process::exit(1);
    });
    let base_name = Path::new(&args[1])
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let pdf_name = embedded_pdf_filename(&base_name);
    println!("✓ {} attachment(s) embedded into {pdf_name}", attachments.len());

    // 2. Extract again.
    let outcome = extract_attachments(&pdf).unwrap_or_else(|e| {
        eprintln!("Extraction failed: {e}");
        process::exit(1);
    });
    for (original, file) in attachments.iter().zip(outcome.attachments()) {
        let same = if original.data == file.data { "✓" } else { "✗" };
        println!("  {same} {} → {} ({} bytes)", original.name, file.name, file.data.len());
    }

    // 3. Pack into a zip next to the new PDF.
    let zip = archive::write_zip(outcome.attachments()).unwrap_or_else(|e| {
        eprintln!("Zip failed: {e}");
        process::exit(1);
    });
    let zip_name = archive_filename(&pdf_name);

    if let Err(e) = fs::write(&pdf_name, &pdf).and_then(|_| fs::write(&zip_name, &zip)) {
        eprintln!("Save failed: {e}");
        process::exit(1);
    }
    println!("✓ Saved {pdf_name} and {zip_name}");
}
