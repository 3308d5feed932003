use crate::{barber, png};
use anyhow::{Context, Result};
use image::Rgb;
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// A product variant that gets its own solid placeholder colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flavor {
    pub name: &'static str,
    pub color: Rgb<u8>,
}

/// An Android screen density bucket and the launcher icon size it expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub name: &'static str,
    pub size: u32,
}

impl Density {
    pub fn mipmap_dir(&self) -> String {
        format!("mipmap-{}", self.name)
    }
}

pub const FLAVORS: [Flavor; 3] = [
    Flavor {
        name: "customer",
        color: Rgb([255, 107, 107]),
    },
    Flavor {
        name: "barber",
        color: Rgb([78, 205, 196]),
    },
    Flavor {
        name: "admin",
        color: Rgb([149, 225, 211]),
    },
];

pub const DENSITIES: [Density; 5] = [
    Density {
        name: "mdpi",
        size: 48,
    },
    Density {
        name: "hdpi",
        size: 72,
    },
    Density {
        name: "xhdpi",
        size: 96,
    },
    Density {
        name: "xxhdpi",
        size: 144,
    },
    Density {
        name: "xxxhdpi",
        size: 192,
    },
];

pub const ICON_FILE: &str = "ic_launcher.png";

/// `<root>/<flavor>/res/mipmap-<density>/ic_launcher.png`
pub fn placeholder_icon_path(root: &Path, flavor: &Flavor, density: &Density) -> PathBuf {
    root.join(flavor.name)
        .join("res")
        .join(density.mipmap_dir())
        .join(ICON_FILE)
}

/// `<root>/mipmap-<density>/ic_launcher.png`
pub fn barber_icon_path(root: &Path, density: &Density) -> PathBuf {
    root.join(density.mipmap_dir()).join(ICON_FILE)
}

/// Write a solid-colour icon for every flavor at every density.
///
/// Returns the written paths in the order they were created.
pub fn generate_placeholder_icons(root: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(FLAVORS.len() * DENSITIES.len());

    for flavor in &FLAVORS {
        for density in &DENSITIES {
            let path = placeholder_icon_path(root, flavor, density);
            let data = png::encode_solid_square(density.size, flavor.color).with_context(|| {
                format!("Failed to encode {} icon for {}", density.name, flavor.name)
            })?;
            write_icon(&path, &data)?;
            println!("Created: {}", path.display());
            written.push(path);
        }
    }

    println!("\nAll placeholder icons created successfully!");
    Ok(written)
}

/// Write the barber icon at every density into a single `res` directory.
pub fn generate_barber_icons(root: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(DENSITIES.len());

    for density in &DENSITIES {
        let path = barber_icon_path(root, density);
        let data = barber::encode_barber_icon(density.size)?;
        write_icon(&path, &data)?;
        println!("✓ Generated {}", path.display());
        written.push(path);
    }

    println!("\n✓ All icons generated successfully!");
    Ok(written)
}

fn write_icon(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        create_dir_all(dir)
            .with_context(|| format!("Can't create directory {}", dir.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write PNG file {}", path.display()))?;
    log::debug!("wrote {} bytes to {}", data.len(), path.display());

    Ok(())
}
