use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const LAUNCHER_ICONS: &str = env!("CARGO_BIN_EXE_launcher-icons");
const VERIFY_ICONS: &str = env!("CARGO_BIN_EXE_verify_icons");

/// Runs `launcher-icons placeholders -o <dir>` and checks every flavor tree.
#[test]
fn test_placeholders_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("src");

    let output = run(Command::new(LAUNCHER_ICONS)
        .arg("placeholders")
        .arg("-o")
        .arg(&output_dir));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Created: ").count(), 15);
    assert!(stdout.contains("All placeholder icons created successfully!"));

    for flavor in ["customer", "barber", "admin"] {
        for density in ["mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"] {
            let path = output_dir
                .join(flavor)
                .join("res")
                .join(format!("mipmap-{density}"))
                .join("ic_launcher.png");
            assert!(path.exists(), "Missing icon at: {}", path.display());
        }
    }

    let img = image::open(output_dir.join("barber/res/mipmap-xxhdpi/ic_launcher.png"))
        .expect("Failed to decode generated icon")
        .to_rgb8();
    assert_eq!(img.dimensions(), (144, 144));
    assert_eq!(img.get_pixel(71, 71).0, [78, 205, 196]);
}

/// Runs `launcher-icons barber --output <dir>` and checks the mipmap folders.
#[test]
fn test_barber_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("res");

    let output = run(Command::new(LAUNCHER_ICONS)
        .arg("barber")
        .arg("--output")
        .arg(&output_dir));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("✓ Generated ").count(), 5);
    assert!(stdout.contains("All icons generated successfully!"));

    for (density, size) in [("mdpi", 48), ("hdpi", 72), ("xhdpi", 96), ("xxhdpi", 144), ("xxxhdpi", 192)] {
        let path = output_dir
            .join(format!("mipmap-{density}"))
            .join("ic_launcher.png");
        let img = image::open(&path).expect("Failed to decode generated icon");
        assert_eq!(img.width(), size, "Wrong width for {}", path.display());
        assert_eq!(img.height(), size, "Wrong height for {}", path.display());
    }
}

#[test]
fn test_reruns_are_byte_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("src");
    let icon = output_dir.join("customer/res/mipmap-mdpi/ic_launcher.png");

    run(Command::new(LAUNCHER_ICONS)
        .arg("placeholders")
        .arg("-o")
        .arg(&output_dir));
    let first = std::fs::read(&icon).unwrap();

    run(Command::new(LAUNCHER_ICONS)
        .arg("placeholders")
        .arg("-o")
        .arg(&output_dir));
    let second = std::fs::read(&icon).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_verify_icons_accepts_generated_tree() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("src");

    run(Command::new(LAUNCHER_ICONS)
        .arg("placeholders")
        .arg("-o")
        .arg(&output_dir));

    let output = run(Command::new(VERIFY_ICONS).arg(&output_dir));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All 15 icons verified"));
    assert!(stdout.contains("48x48, solid [255, 107, 107, 255]"));
}

#[test]
fn test_verify_icons_rejects_corrupted_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("src");

    run(Command::new(LAUNCHER_ICONS)
        .arg("placeholders")
        .arg("-o")
        .arg(&output_dir));
    corrupt_last_byte(&output_dir.join("admin/res/mipmap-hdpi/ic_launcher.png"));

    let output = Command::new(VERIFY_ICONS)
        .arg(&output_dir)
        .output()
        .expect("Failed to run verify_icons");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("CRC mismatch in IEND chunk"));
}

#[test]
fn test_unwritable_output_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let output = Command::new(LAUNCHER_ICONS)
        .arg("barber")
        .arg("-o")
        .arg(&blocker)
        .output()
        .expect("Failed to run launcher-icons");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Can't create directory"));
}

fn run(command: &mut Command) -> Output {
    let output = command.output().expect("Failed to run command");

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("command failed");
    }

    output
}

fn corrupt_last_byte(path: &Path) {
    let mut bytes = std::fs::read(path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    std::fs::write(path, bytes).unwrap();
}
