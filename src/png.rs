//! Hand-assembled PNG files for solid-colour placeholder icons
//!
//! A file is the 8-byte signature followed by `IHDR`, a single `IDAT` and an
//! empty `IEND`. Every chunk is framed as a big-endian length, the 4-byte type,
//! the data and a CRC32 computed over type and data.
//!
//! The reading half ([`chunks`], [`validate`], [`Header::parse`]) only
//! understands the chunk framing. Pixel decoding is left to the `image` crate.

use anyhow::{bail, ensure, Context, Result};
use flate2::{write::ZlibEncoder, Compression};
use image::Rgb;
use std::io::Write;

/// Magic bytes every PNG file starts with
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGB: u8 = 2;
const IHDR_LEN: usize = 13;
// length + type + crc
const CHUNK_OVERHEAD: usize = 12;

/// A single chunk as found in a PNG byte stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: [u8; 4],
    pub data: Vec<u8>,
    pub crc: u32,
}

impl Chunk {
    pub fn kind_str(&self) -> &str {
        std::str::from_utf8(&self.kind).unwrap_or("????")
    }

    /// Recomputes the CRC over type and data and compares it with the stored one
    pub fn crc_is_valid(&self) -> bool {
        chunk_crc(&self.kind, &self.data) == self.crc
    }
}

/// Decoded contents of an `IHDR` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
}

impl Header {
    pub fn parse(chunk: &Chunk) -> Result<Self> {
        ensure!(
            &chunk.kind == b"IHDR",
            "Expected IHDR chunk, found {}",
            chunk.kind_str()
        );
        let data = &chunk.data;
        ensure!(
            data.len() == IHDR_LEN,
            "IHDR must be {} bytes, found {}",
            IHDR_LEN,
            data.len()
        );

        Ok(Self {
            width: u32::from_be_bytes(data[0..4].try_into()?),
            height: u32::from_be_bytes(data[4..8].try_into()?),
            bit_depth: data[8],
            color_type: data[9],
            compression: data[10],
            filter: data[11],
            interlace: data[12],
        })
    }

    fn to_bytes(self) -> [u8; IHDR_LEN] {
        let mut out = [0; IHDR_LEN];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_type;
        out[10] = self.compression;
        out[11] = self.filter;
        out[12] = self.interlace;
        out
    }
}

/// Encode a `size`×`size` square filled with `color` as an 8-bit RGB PNG
pub fn encode_solid_square(size: u32, color: Rgb<u8>) -> Result<Vec<u8>> {
    if size == 0 {
        bail!("Icon size must be greater than zero");
    }

    let header = Header {
        width: size,
        height: size,
        bit_depth: BIT_DEPTH,
        color_type: COLOR_TYPE_RGB,
        compression: 0,
        filter: 0,
        interlace: 0,
    };

    let raw = solid_scanlines(size, color)?;
    let idat = deflate(&raw)?;
    log::debug!(
        "{size}x{size} square: {} bytes of scanlines deflated to {}",
        raw.len(),
        idat.len()
    );

    let mut png =
        Vec::with_capacity(SIGNATURE.len() + 3 * CHUNK_OVERHEAD + IHDR_LEN + idat.len());
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header.to_bytes())?;
    write_chunk(&mut png, b"IDAT", &idat)?;
    write_chunk(&mut png, b"IEND", &[])?;

    Ok(png)
}

// Every row is a filter byte of 0 (none) followed by `size` RGB triples.
fn solid_scanlines(size: u32, color: Rgb<u8>) -> Result<Vec<u8>> {
    let side = usize::try_from(size).context("Icon size does not fit in memory")?;
    let total = side
        .checked_mul(3)
        .and_then(|row| row.checked_add(1))
        .and_then(|row| row.checked_mul(side))
        .with_context(|| format!("Scanline buffer for a {size}x{size} icon overflows"))?;

    let mut raw = Vec::with_capacity(total);
    for _ in 0..side {
        raw.push(0);
        for _ in 0..side {
            raw.extend_from_slice(&color.0);
        }
    }

    Ok(raw)
}

fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(raw)
        .context("Failed to compress image data")?;
    encoder.finish().context("Failed to finish zlib stream")
}

fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len()).with_context(|| {
        format!(
            "{} chunk of {} bytes exceeds the PNG length field",
            String::from_utf8_lossy(kind),
            data.len()
        )
    })?;

    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&chunk_crc(kind, data).to_be_bytes());
    Ok(())
}

fn chunk_crc(kind: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    hasher.finalize()
}

/// Split a PNG byte stream into its chunks without interpreting them
pub fn chunks(bytes: &[u8]) -> Result<Vec<Chunk>> {
    let mut rest = bytes
        .strip_prefix(SIGNATURE.as_slice())
        .context("Missing PNG signature")?;
    let mut chunks = Vec::new();

    while !rest.is_empty() {
        let offset = bytes.len() - rest.len();
        ensure!(
            rest.len() >= CHUNK_OVERHEAD,
            "Truncated chunk header at byte {offset}"
        );

        let len = u32::from_be_bytes(rest[0..4].try_into()?) as usize;
        let kind: [u8; 4] = rest[4..8].try_into()?;
        let data_end = 8usize
            .checked_add(len)
            .filter(|end| end.checked_add(4).map_or(false, |e| e <= rest.len()))
            .with_context(|| {
                format!(
                    "{} chunk at byte {offset} claims {len} bytes past the end of the file",
                    String::from_utf8_lossy(&kind)
                )
            })?;

        chunks.push(Chunk {
            kind,
            data: rest[8..data_end].to_vec(),
            crc: u32::from_be_bytes(rest[data_end..data_end + 4].try_into()?),
        });
        rest = &rest[data_end + 4..];
    }

    Ok(chunks)
}

/// Check CRCs and the IHDR, IDAT..., IEND ordering of a chunk list
pub fn validate(chunks: &[Chunk]) -> Result<()> {
    for chunk in chunks {
        ensure!(
            chunk.crc_is_valid(),
            "CRC mismatch in {} chunk",
            chunk.kind_str()
        );
    }

    match (chunks.first(), chunks.last()) {
        (Some(first), Some(last)) if &first.kind == b"IHDR" && &last.kind == b"IEND" => {}
        _ => bail!("Chunks must start with IHDR and end with IEND"),
    }
    Header::parse(&chunks[0])?;

    let count = |kind: &[u8; 4]| chunks.iter().filter(|c| &c.kind == kind).count();
    ensure!(count(b"IHDR") == 1, "More than one IHDR chunk");
    ensure!(count(b"IEND") == 1, "More than one IEND chunk");
    ensure!(count(b"IDAT") > 0, "No IDAT chunk");

    let idat_runs = chunks
        .windows(2)
        .filter(|pair| &pair[0].kind != b"IDAT" && &pair[1].kind == b"IDAT")
        .count();
    ensure!(idat_runs == 1, "IDAT chunks are not consecutive");

    Ok(())
}
