//! CLI for embedding files into a PDF and extracting them back into a zip.
//!
//! This binary is the front end for the pdf_attachments crate: it reads the
//! files from disk, applies the file-type policy, and writes the results.

use pdf_attachments::{
    archive, archive_filename, embedded_pdf_filename, policy, Attachment, AttachmentConfig,
    AttachmentEmbedder, AttachmentExtractor, ExtractOutcome, Result,
};
use std::path::{Path, PathBuf};
use std::{env, fs, process};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("pdf-attachments");

    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage(program);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let outcome = match args[1].as_str() {
        "embed" => run_embed(&args[2..]),
        "extract" => run_extract(&args[2..]),
        other => {
            eprintln!("❌ Unknown command '{other}'\n");
            print_usage(program);
            process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("\n❌ Error: {e}");
        process::exit(1);
    }
}

fn print_usage(program_name: &str) {
    println!("📎 pdf-attachments - embed files into a PDF, or pull them back out");
    println!();
    println!("USAGE:");
    println!("    {program_name} embed <base.pdf> <file>... [--out <output.pdf>]");
    println!("    {program_name} extract <file.pdf> [output_dir]");
    println!();
    println!("COMMANDS:");
    println!("    embed      Copy every page of <base.pdf> and attach each <file>");
    println!("    extract    Write every embedded file of <file.pdf> into a zip archive");
    println!();
    println!("OPTIONS:");
    println!("    --out <path>   Output PDF (default: '<stem>_with_attachments.pdf')");
    println!("    -h, --help     Show this help message");
    println!();
    println!("Accepted attachment types: {}", policy::ACCEPTED_EXTENSIONS.join(", "));
    println!("Set RUST_LOG=debug for per-file logging.");
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn usage_error(message: impl Into<String>) -> pdf_attachments::AttachmentError {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message.into()).into()
}

fn run_embed(args: &[String]) -> Result<()> {
    let mut out: Option<PathBuf> = None;
    let mut paths: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--out" {
            let value = iter
                .next()
                .ok_or_else(|| usage_error("--out needs a path"))?;
            out = Some(PathBuf::from(value));
        } else {
            paths.push(arg.as_str());
        }
    }

    let (base_path, attachment_paths) = match paths.split_first() {
        Some((base, rest)) => (Path::new(*base), rest),
        None => return Err(usage_error("missing <base.pdf>")),
    };

    let base_name = display_name(base_path);
    if !policy::is_pdf_filename(&base_name) {
        return Err(usage_error(format!("the base file must be a PDF: {base_name}")));
    }
    if attachment_paths.is_empty() {
        return Err(usage_error("please select at least one file to attach"));
    }

    let mut attachments = Vec::with_capacity(attachment_paths.len());
    for path in attachment_paths {
        let attachment = Attachment::from_path(path)?;
        if !policy::is_accepted_extension(&attachment.name) {
            return Err(usage_error(format!("unsupported attachment type: {}", attachment.name)));
        }
        println!("📄 {} ({})", attachment.name, human_size(attachment.data.len()));
        attachments.push(attachment);
    }

    let embedder = AttachmentEmbedder::new(AttachmentConfig {
        max_attachment_size: Some(100 * 1024 * 1024), // 100MB limit
        compress_attachments: true,
        ..Default::default()
    });

    let base = fs::read(base_path)?;
    let pdf = embedder.embed(&base, &attachments)?;

    let out = out.unwrap_or_else(|| PathBuf::from(embedded_pdf_filename(&base_name)));
    fs::write(&out, &pdf)?;

    println!("\n✅ {} attachment(s) embedded", attachments.len());
    println!("💾 Saved to: {} ({})", out.display(), human_size(pdf.len()));
    Ok(())
}

fn run_extract(args: &[String]) -> Result<()> {
    let pdf_path = match args.first() {
        Some(path) => Path::new(path),
        None => return Err(usage_error("missing <file.pdf>")),
    };
    let output_dir = Path::new(args.get(1).map(String::as_str).unwrap_or("."));

    println!("🔍 Scanning: {}", pdf_path.display());
    println!("{}", "─".repeat(60));

    let extractor = AttachmentExtractor::new(AttachmentConfig {
        max_attachment_size: Some(100 * 1024 * 1024),
        ..Default::default()
    });
    let pdf = fs::read(pdf_path)?;

    let extraction = match extractor.extract(&pdf)? {
        ExtractOutcome::NoAttachments => {
            println!("ℹ️  This PDF has no embedded files");
            return Ok(());
        }
        ExtractOutcome::Extracted(extraction) => extraction,
    };

    for (i, file) in extraction.attachments.iter().enumerate() {
        println!("📄 File #{}: {} ({})", i + 1, file.name, human_size(file.data.len()));
    }
    for skipped in &extraction.skipped {
        println!(
            "⚠️  Skipped entry #{} ({}): {}",
            skipped.index,
            skipped.declared_name.as_deref().unwrap_or("<unnamed>"),
            skipped.reason
        );
    }

    if extraction.attachments.is_empty() {
        println!("ℹ️  No embedded file could be recovered");
        return Ok(());
    }

    let zip = archive::write_zip(&extraction.attachments)?;
    fs::create_dir_all(output_dir)?;
    let dest = output_dir.join(archive_filename(&display_name(pdf_path)));
    fs::write(&dest, &zip)?;

    println!("\n{}", "─".repeat(60));
    println!("📊 Summary:");
    println!("   • {} file(s) extracted", extraction.attachments.len());
    println!("   • {} broken entries skipped", extraction.skipped.len());
    println!("   • Archive: {} ({})", dest.display(), human_size(zip.len()));
    Ok(())
}

/// Human-readable size for progress lines: exact bytes below 1 KiB,
/// otherwise one decimal in the largest binary unit that fits.
fn human_size(bytes: usize) -> String {
    const STEPS: [(f64, &str); 3] = [
        (1024.0 * 1024.0 * 1024.0, "GiB"),
        (1024.0 * 1024.0, "MiB"),
        (1024.0, "KiB"),
    ];

    let value = bytes as f64;
    STEPS
        .iter()
        .find(|(scale, _)| value >= *scale)
        .map(|(scale, unit)| format!("{:.1} {unit}", value / scale))
        .unwrap_or_else(|| format!("{bytes} B"))
}

#[cfg(test)]
mod tests {
    use super::human_size;

    #[test]
    fn sizes_pick_the_largest_fitting_unit() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1536), "1.5 KiB");
        assert_eq!(human_size(100 * 1024 * 1024), "100.0 MiB");
        assert_eq!(human_size(2 * 1024 * 1024 * 1024), "2.0 GiB");
    }
}
