use std::fs::File;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use memmap2::Mmap;
use tracing::debug;

use crate::asset::GeoSample;
use crate::consts::EXIF_SCAN_LIMIT;
use crate::error::{FlowError, Result};

use super::source::url_to_path;

/// Reads a photo's geolocation.
///
/// Implementations may fail; the batch loader turns failures into an
/// absent sample for that photo only.
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, url: &str) -> Result<GeoSample>;
}

/// Reads GPS latitude/longitude from the EXIF block of local photo files.
///
/// Handles JPEG (APP1), TIFF, PNG (`eXIf` chunk) and WebP (`EXIF` chunk).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExifGpsExtractor;

impl MetadataExtractor for ExifGpsExtractor {
    fn extract(&self, url: &str) -> Result<GeoSample> {
        let path = url_to_path(url);
        let file = File::open(&path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let sample = read_gps(&mmap)?;
        debug!(path = %path.display(), %sample, "GPS read");
        Ok(sample)
    }
}

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

const TAG_GPS_IFD: u16 = 0x8825;
const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
const TAG_GPS_LATITUDE: u16 = 0x0002;
const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
const TAG_GPS_LONGITUDE: u16 = 0x0004;

const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;
const TYPE_SRATIONAL: u16 = 10;

const IFD_ENTRY_SIZE: usize = 12;

/// Extract the GPS sample from a whole photo file.
///
/// A photo without EXIF or without GPS tags yields an absent sample. A
/// container or TIFF structure that is present but broken is an error.
pub fn read_gps(bytes: &[u8]) -> Result<GeoSample> {
    let tiff = if bytes.starts_with(&JPEG_SOI) {
        find_jpeg_exif(bytes)?
    } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
        Some(bytes)
    } else if bytes.starts_with(&PNG_SIGNATURE) {
        find_png_exif(bytes)?
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        find_webp_exif(bytes)?
    } else if let Some(rest) = bytes.strip_prefix(EXIF_HEADER) {
        Some(rest)
    } else {
        return Err(FlowError::UnsupportedFormat(
            "not a JPEG, TIFF, PNG or WebP file".into(),
        ));
    };

    match tiff {
        Some(tiff) => read_tiff_gps(tiff),
        None => Ok(GeoSample::absent()),
    }
}

/// TIFF block of the first APP1 Exif segment, if any.
fn find_jpeg_exif(bytes: &[u8]) -> Result<Option<&[u8]>> {
    let limit = bytes.len().min(EXIF_SCAN_LIMIT);
    let mut pos = 2;

    while pos + 4 <= limit {
        if bytes[pos] != 0xFF {
            return Err(FlowError::InvalidMetadata(format!(
                "expected JPEG marker at offset {pos}"
            )));
        }
        let marker = bytes[pos + 1];
        match marker {
            // fill byte
            0xFF => {
                pos += 1;
                continue;
            }
            // start of scan or end of image: no metadata past this point
            0xDA | 0xD9 => return Ok(None),
            // standalone markers
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            _ => {}
        }

        let len = BigEndian::read_u16(&bytes[pos + 2..pos + 4]) as usize;
        let end = pos + 2 + len;
        if len < 2 || end > bytes.len() {
            return Err(FlowError::InvalidMetadata(format!(
                "JPEG segment 0x{marker:02X} at offset {pos} overruns the file"
            )));
        }
        let data = &bytes[pos + 4..end];
        if marker == 0xE1 {
            if let Some(tiff) = data.strip_prefix(EXIF_HEADER) {
                return Ok(Some(tiff));
            }
        }
        pos = end;
    }
    Ok(None)
}

/// Payload of the `eXIf` chunk, if any.
fn find_png_exif(bytes: &[u8]) -> Result<Option<&[u8]>> {
    let mut pos = PNG_SIGNATURE.len();
    while pos + 8 <= bytes.len() {
        let len = BigEndian::read_u32(&bytes[pos..pos + 4]) as usize;
        let kind = &bytes[pos + 4..pos + 8];
        let start = pos + 8;
        let end = start
            .checked_add(len)
            .filter(|&e| e + 4 <= bytes.len())
            .ok_or_else(|| {
                FlowError::InvalidMetadata(format!("PNG chunk at offset {pos} overruns the file"))
            })?;
        match kind {
            b"eXIf" => {
                let data = &bytes[start..end];
                return Ok(Some(data.strip_prefix(EXIF_HEADER).unwrap_or(data)));
            }
            b"IDAT" | b"IEND" => return Ok(None),
            _ => {}
        }
        pos = end + 4; // skip CRC
    }
    Ok(None)
}

/// Payload of the `EXIF` chunk of a RIFF/WebP container, if any.
fn find_webp_exif(bytes: &[u8]) -> Result<Option<&[u8]>> {
    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let kind = &bytes[pos..pos + 4];
        let len = LittleEndian::read_u32(&bytes[pos + 4..pos + 8]) as usize;
        let start = pos + 8;
        let end = start
            .checked_add(len)
            .filter(|&e| e <= bytes.len())
            .ok_or_else(|| {
                FlowError::InvalidMetadata(format!("WebP chunk at offset {pos} overruns the file"))
            })?;
        if kind == b"EXIF" {
            let data = &bytes[start..end];
            return Ok(Some(data.strip_prefix(EXIF_HEADER).unwrap_or(data)));
        }
        // chunks are padded to an even size
        pos = end + (len & 1);
    }
    Ok(None)
}

/// Bounds-checked reader over a TIFF block in either byte order.
struct Tiff<'a> {
    data: &'a [u8],
    big_endian: bool,
}

impl<'a> Tiff<'a> {
    fn parse(data: &'a [u8]) -> Result<Self> {
        let big_endian = match data.get(0..2) {
            Some(b"II") => false,
            Some(b"MM") => true,
            _ => {
                return Err(FlowError::InvalidMetadata(
                    "missing TIFF byte-order mark".into(),
                ))
            }
        };
        let tiff = Self { data, big_endian };
        if tiff.u16(2)? != 42 {
            return Err(FlowError::InvalidMetadata("bad TIFF magic".into()));
        }
        Ok(tiff)
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| {
                FlowError::InvalidMetadata(format!(
                    "TIFF read of {len} bytes at offset {offset} is out of bounds"
                ))
            })
    }

    fn u16(&self, offset: usize) -> Result<u16> {
        let b = self.slice(offset, 2)?;
        Ok(if self.big_endian {
            BigEndian::read_u16(b)
        } else {
            LittleEndian::read_u16(b)
        })
    }

    fn u32(&self, offset: usize) -> Result<u32> {
        let b = self.slice(offset, 4)?;
        Ok(if self.big_endian {
            BigEndian::read_u32(b)
        } else {
            LittleEndian::read_u32(b)
        })
    }

    fn entries(&self, ifd_offset: usize) -> Result<Vec<IfdEntry>> {
        let count = self.u16(ifd_offset)? as usize;
        (0..count)
            .map(|i| {
                let at = ifd_offset + 2 + i * IFD_ENTRY_SIZE;
                Ok(IfdEntry {
                    tag: self.u16(at)?,
                    kind: self.u16(at + 2)?,
                    count: self.u32(at + 4)?,
                    value_at: at + 8,
                })
            })
            .collect()
    }

    /// Degrees/minutes/seconds triple as decimal degrees.
    fn dms(&self, entry: &IfdEntry) -> Result<f64> {
        if !matches!(entry.kind, TYPE_RATIONAL | TYPE_SRATIONAL) || entry.count < 3 {
            return Err(FlowError::InvalidMetadata(format!(
                "GPS tag {} is not a rational triple",
                entry.tag
            )));
        }
        let offset = self.u32(entry.value_at)? as usize;
        let mut parts = [0.0f64; 3];
        for (i, part) in parts.iter_mut().enumerate() {
            let at = offset + i * 8;
            let (num, den) = if entry.kind == TYPE_SRATIONAL {
                (self.u32(at)? as i32 as f64, self.u32(at + 4)? as i32 as f64)
            } else {
                (self.u32(at)? as f64, self.u32(at + 4)? as f64)
            };
            if den == 0.0 {
                return Err(FlowError::InvalidMetadata(format!(
                    "GPS tag {} has a zero denominator",
                    entry.tag
                )));
            }
            *part = num / den;
        }
        Ok(parts[0] + parts[1] / 60.0 + parts[2] / 3600.0)
    }

    /// First character of an inline ASCII value.
    fn reference(&self, entry: &IfdEntry) -> Option<u8> {
        if entry.kind != TYPE_ASCII || entry.count == 0 {
            return None;
        }
        self.data.get(entry.value_at).copied()
    }
}

struct IfdEntry {
    tag: u16,
    kind: u16,
    count: u32,
    /// Offset of the 4-byte value/offset field.
    value_at: usize,
}

/// GPS sample from a TIFF block (the part after `Exif\0\0`).
///
/// Each axis is decoded on its own; a broken latitude does not discard a
/// good longitude.
pub fn read_tiff_gps(data: &[u8]) -> Result<GeoSample> {
    let tiff = Tiff::parse(data)?;
    let ifd0 = tiff.u32(4)? as usize;

    let gps_pointer = tiff
        .entries(ifd0)?
        .into_iter()
        .find(|e| e.tag == TAG_GPS_IFD && matches!(e.kind, TYPE_LONG | 13));
    let Some(pointer) = gps_pointer else {
        return Ok(GeoSample::absent());
    };
    let gps_offset = tiff.u32(pointer.value_at)? as usize;
    let entries = tiff.entries(gps_offset)?;

    let find = |tag: u16| entries.iter().find(|e| e.tag == tag);
    let axis = |value_tag: u16, ref_tag: u16, negative_ref: u8, limit: f64| -> Option<f64> {
        let entry = find(value_tag)?;
        let degrees = match tiff.dms(entry) {
            Ok(d) => d,
            Err(e) => {
                debug!(error = %e, "Ignoring unreadable GPS axis");
                return None;
            }
        };
        let sign = match find(ref_tag).and_then(|r| tiff.reference(r)) {
            Some(r) if r.eq_ignore_ascii_case(&negative_ref) => -1.0,
            _ => 1.0,
        };
        let value = sign * degrees;
        (value.is_finite() && value.abs() <= limit).then_some(value)
    };

    Ok(GeoSample {
        latitude: axis(TAG_GPS_LATITUDE, TAG_GPS_LATITUDE_REF, b'S', 90.0),
        longitude: axis(TAG_GPS_LONGITUDE, TAG_GPS_LONGITUDE_REF, b'W', 180.0),
    })
}
