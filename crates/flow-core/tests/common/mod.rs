#![allow(dead_code)]

use std::path::{Path, PathBuf};

use flow_core::asset::{Asset, GeoSample};

/// Asset list `a0, a1, ...` numbered in order.
pub fn assets(n: usize) -> Vec<Asset> {
    Asset::from_urls((0..n).map(|i| format!("a{i}")))
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn put_u16(buf: &mut Vec<u8>, v: u16, big_endian: bool) {
    if big_endian {
        buf.extend_from_slice(&v.to_be_bytes());
    } else {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn put_u32(buf: &mut Vec<u8>, v: u32, big_endian: bool) {
    if big_endian {
        buf.extend_from_slice(&v.to_be_bytes());
    } else {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

/// Split absolute decimal degrees into degree/minute/second rationals.
fn dms_rationals(value: f64) -> [(u32, u32); 3] {
    let v = value.abs();
    let degrees = v.floor();
    let minutes_f = (v - degrees) * 60.0;
    let minutes = minutes_f.floor();
    let seconds = (minutes_f - minutes) * 60.0;
    [
        (degrees as u32, 1),
        (minutes as u32, 1),
        ((seconds * 1_000_000.0).round() as u32, 1_000_000),
    ]
}

fn put_entry(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4], big_endian: bool) {
    put_u16(buf, tag, big_endian);
    put_u16(buf, kind, big_endian);
    put_u32(buf, count, big_endian);
    buf.extend_from_slice(&value);
}

fn offset_bytes(v: u32, big_endian: bool) -> [u8; 4] {
    if big_endian {
        v.to_be_bytes()
    } else {
        v.to_le_bytes()
    }
}

/// TIFF block (what follows `Exif\0\0`) with a GPS IFD holding the given
/// signed decimal coordinates. `None` leaves that axis out entirely.
pub fn build_gps_tiff(latitude: Option<f64>, longitude: Option<f64>, big_endian: bool) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(if big_endian { b"MM" } else { b"II" });
    put_u16(&mut buf, 42, big_endian);
    put_u32(&mut buf, 8, big_endian);

    // IFD0: a single GPS pointer
    let gps_ifd: u32 = 8 + 2 + 12 + 4;
    put_u16(&mut buf, 1, big_endian);
    put_entry(&mut buf, 0x8825, 4, 1, offset_bytes(gps_ifd, big_endian), big_endian);
    put_u32(&mut buf, 0, big_endian);
    assert_eq!(buf.len() as u32, gps_ifd);

    let axes: Vec<(u16, u16, u8, f64)> = [
        latitude.map(|v| (1u16, 2u16, if v < 0.0 { b'S' } else { b'N' }, v)),
        longitude.map(|v| (3u16, 4u16, if v < 0.0 { b'W' } else { b'E' }, v)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let entry_count = axes.len() * 2;
    let data_start = gps_ifd + 2 + 12 * entry_count as u32 + 4;

    put_u16(&mut buf, entry_count as u16, big_endian);
    for (i, (ref_tag, value_tag, reference, _)) in axes.iter().enumerate() {
        put_entry(&mut buf, *ref_tag, 2, 2, [*reference, 0, 0, 0], big_endian);
        let offset = data_start + 24 * i as u32;
        put_entry(&mut buf, *value_tag, 5, 3, offset_bytes(offset, big_endian), big_endian);
    }
    put_u32(&mut buf, 0, big_endian);
    assert_eq!(buf.len() as u32, data_start);

    for (_, _, _, value) in &axes {
        for (num, den) in dms_rationals(*value) {
            put_u32(&mut buf, num, big_endian);
            put_u32(&mut buf, den, big_endian);
        }
    }
    buf
}

/// TIFF block whose IFD0 carries only a camera make, no GPS pointer.
pub fn build_tiff_without_gps() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"II");
    put_u16(&mut buf, 42, false);
    put_u32(&mut buf, 8, false);
    put_u16(&mut buf, 1, false);
    put_entry(&mut buf, 0x010F, 2, 4, *b"Cam\0", false);
    put_u32(&mut buf, 0, false);
    buf
}

/// Minimal JPEG: SOI, APP0, optional APP1 Exif, SOS, EOI.
pub fn build_jpeg(tiff: Option<&[u8]>) -> Vec<u8> {
    let mut buf = vec![0xFF, 0xD8];

    // APP0 JFIF
    buf.extend_from_slice(&[0xFF, 0xE0]);
    buf.extend_from_slice(&16u16.to_be_bytes());
    buf.extend_from_slice(b"JFIF\0");
    buf.extend_from_slice(&[1, 1, 0, 0, 1, 0, 1, 0, 0]);

    if let Some(tiff) = tiff {
        buf.extend_from_slice(&[0xFF, 0xE1]);
        buf.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        buf.extend_from_slice(b"Exif\0\0");
        buf.extend_from_slice(tiff);
    }

    buf.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x12, 0x34, 0xFF, 0xD9]);
    buf
}

fn png_chunk(buf: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
    buf.extend_from_slice(kind);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&[0, 0, 0, 0]);
}

/// PNG container with an `eXIf` chunk before the image data.
pub fn build_png_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut buf = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png_chunk(&mut buf, b"IHDR", &[0u8; 13]);
    png_chunk(&mut buf, b"eXIf", tiff);
    png_chunk(&mut buf, b"IDAT", &[0u8; 4]);
    png_chunk(&mut buf, b"IEND", &[]);
    buf
}

/// WebP (RIFF) container with an `EXIF` chunk.
pub fn build_webp_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(b"WEBP");
    body.extend_from_slice(b"VP8X");
    body.extend_from_slice(&10u32.to_le_bytes());
    body.extend_from_slice(&[0u8; 10]);
    body.extend_from_slice(b"EXIF");
    body.extend_from_slice(&(tiff.len() as u32).to_le_bytes());
    body.extend_from_slice(tiff);
    if tiff.len() % 2 == 1 {
        body.push(0);
    }

    let mut buf = Vec::new();
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(body.len() as u32).to_le_bytes());
    buf.extend_from_slice(&body);
    buf
}

/// Write a JPEG carrying `sample` (or no EXIF at all when `None`).
pub fn write_jpeg(dir: &Path, name: &str, sample: Option<GeoSample>) -> PathBuf {
    let tiff = sample.map(|s| build_gps_tiff(s.latitude, s.longitude, false));
    let path = dir.join(name);
    std::fs::write(&path, build_jpeg(tiff.as_deref())).unwrap();
    path
}
