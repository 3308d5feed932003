use anyhow::{bail, Context, Result};
use launcher_icons::{icon_gen::ICON_FILE, png};
use std::path::Path;
use walkdir::WalkDir;

fn main() -> Result<()> {
    env_logger::init();
    let root = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "android/app/src".to_string());

    println!("Checking launcher icons under: {}", root);

    let mut checked = 0;
    let mut failed = 0;
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.context("Failed to walk icon directory")?;
        if entry.file_name() != ICON_FILE {
            continue;
        }

        checked += 1;
        match check_icon(entry.path()) {
            Ok(summary) => println!("  ✓ {}: {}", entry.path().display(), summary),
            Err(err) => {
                failed += 1;
                println!("  ✗ {}: {:#}", entry.path().display(), err);
            }
        }
    }

    if checked == 0 {
        bail!("No {} files found under {}", ICON_FILE, root);
    }
    if failed > 0 {
        bail!("{} of {} icons failed verification", failed, checked);
    }

    println!("\nAll {} icons verified", checked);
    Ok(())
}

/// Check chunk framing, then decode and describe the pixels
fn check_icon(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).context("Failed to read icon")?;
    let chunks = png::chunks(&bytes)?;
    png::validate(&chunks)?;
    let header = png::Header::parse(&chunks[0])?;

    let img = image::load_from_memory(&bytes).context("Failed to decode icon")?;
    if (img.width(), img.height()) != (header.width, header.height) {
        bail!(
            "IHDR says {}x{} but decoded {}x{}",
            header.width,
            header.height,
            img.width(),
            img.height()
        );
    }

    let rgba = img.to_rgba8();
    let first = rgba.pixels().next().copied();
    let solid = first.filter(|first| rgba.pixels().all(|p| p == first));
    let fill = match solid {
        Some(p) => format!("solid [{}, {}, {}, {}]", p[0], p[1], p[2], p[3]),
        None => "multi-colour".to_string(),
    };

    Ok(format!("{}x{}, {}", img.width(), img.height(), fill))
}
