//! Hand-built EXIF containers for tests.
//!
//! [`ExifBuilder`] lays out a little-endian TIFF block (IFD0, Exif IFD,
//! GPS IFD) and wraps it in a complete baseline JPEG: an 8x8 grey frame with
//! the EXIF block in APP1. The parser reads a 128-byte header before it
//! looks at any segment, so a fixture must never fit inside that header.

const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

const TAG_MODEL: u16 = 0x0110;
const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_GPS_IFD: u16 = 0x8825;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TAG_FOCAL_LENGTH: u16 = 0x920A;
const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
const TAG_GPS_LATITUDE: u16 = 0x0002;
const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
const TAG_GPS_LONGITUDE: u16 = 0x0004;

#[derive(Debug, Clone)]
struct Field {
    tag: u16,
    kind: u16,
    count: u32,
    payload: Vec<u8>,
}

impl Field {
    fn ascii(tag: u16, value: &str) -> Self {
        let mut payload = value.as_bytes().to_vec();
        payload.push(0);
        Self { tag, kind: TYPE_ASCII, count: payload.len() as u32, payload }
    }

    fn rationals(tag: u16, values: &[(u32, u32)]) -> Self {
        let payload = values
            .iter()
            .flat_map(|(n, d)| n.to_le_bytes().into_iter().chain(d.to_le_bytes()))
            .collect();
        Self { tag, kind: TYPE_RATIONAL, count: values.len() as u32, payload }
    }

    fn long(tag: u16, value: u32) -> Self {
        Self { tag, kind: TYPE_LONG, count: 1, payload: value.to_le_bytes().to_vec() }
    }

    /// Bytes this field occupies in the IFD's data area (word aligned).
    fn external_len(&self) -> usize {
        if self.payload.len() > 4 {
            self.payload.len() + self.payload.len() % 2
        } else {
            0
        }
    }
}

fn ifd_len(fields: &[Field]) -> usize {
    if fields.is_empty() {
        return 0;
    }
    2 + 12 * fields.len() + 4 + fields.iter().map(Field::external_len).sum::<usize>()
}

fn write_ifd(out: &mut Vec<u8>, fields: &[Field]) {
    let data_start = out.len() + 2 + 12 * fields.len() + 4;
    let mut data = Vec::new();

    out.extend((fields.len() as u16).to_le_bytes());
    for f in fields {
        out.extend(f.tag.to_le_bytes());
        out.extend(f.kind.to_le_bytes());
        out.extend(f.count.to_le_bytes());
        if f.payload.len() <= 4 {
            let mut inline = f.payload.clone();
            inline.resize(4, 0);
            out.extend(inline);
        } else {
            out.extend(((data_start + data.len()) as u32).to_le_bytes());
            data.extend(&f.payload);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    // No next IFD
    out.extend(0u32.to_le_bytes());
    out.extend(data);
}

/// Builds an EXIF block tag by tag.
///
/// ```ignore
/// let jpeg = ExifBuilder::default().model("Pixel 7").focal_length(50, 1).jpeg();
/// ```
#[derive(Debug, Clone, Default)]
pub(crate) struct ExifBuilder {
    ifd0: Vec<Field>,
    exif: Vec<Field>,
    gps: Vec<Field>,
}

impl ExifBuilder {
    pub(crate) fn model(mut self, model: &str) -> Self {
        self.ifd0.push(Field::ascii(TAG_MODEL, model));
        self
    }

    pub(crate) fn date_time(mut self, value: &str) -> Self {
        self.ifd0.push(Field::ascii(TAG_DATE_TIME, value));
        self
    }

    pub(crate) fn date_time_original(mut self, value: &str) -> Self {
        self.exif.push(Field::ascii(TAG_DATE_TIME_ORIGINAL, value));
        self
    }

    pub(crate) fn focal_length(mut self, numerator: u32, denominator: u32) -> Self {
        self.exif
            .push(Field::rationals(TAG_FOCAL_LENGTH, &[(numerator, denominator)]));
        self
    }

    /// GPS position as degree/minute/second rationals plus N/S and E/W refs.
    pub(crate) fn gps(
        mut self,
        lat_ref: char,
        lat: [(u32, u32); 3],
        lon_ref: char,
        lon: [(u32, u32); 3],
    ) -> Self {
        self.gps.push(Field::ascii(TAG_GPS_LATITUDE_REF, &lat_ref.to_string()));
        self.gps.push(Field::rationals(TAG_GPS_LATITUDE, &lat));
        self.gps.push(Field::ascii(TAG_GPS_LONGITUDE_REF, &lon_ref.to_string()));
        self.gps.push(Field::rationals(TAG_GPS_LONGITUDE, &lon));
        self
    }

    /// The raw little-endian TIFF block.
    pub(crate) fn tiff(&self) -> Vec<u8> {
        let mut ifd0 = self.ifd0.clone();
        if !self.exif.is_empty() {
            ifd0.push(Field::long(TAG_EXIF_IFD, 0));
        }
        if !self.gps.is_empty() {
            ifd0.push(Field::long(TAG_GPS_IFD, 0));
        }
        ifd0.sort_by_key(|f| f.tag);

        let mut exif = self.exif.clone();
        exif.sort_by_key(|f| f.tag);
        let mut gps = self.gps.clone();
        gps.sort_by_key(|f| f.tag);

        let ifd0_offset = 8;
        let exif_offset = ifd0_offset + ifd_len(&ifd0);
        let gps_offset = exif_offset + ifd_len(&exif);

        for f in &mut ifd0 {
            match f.tag {
                TAG_EXIF_IFD => f.payload = (exif_offset as u32).to_le_bytes().to_vec(),
                TAG_GPS_IFD => f.payload = (gps_offset as u32).to_le_bytes().to_vec(),
                _ => {}
            }
        }

        let mut out = Vec::new();
        out.extend(b"II");
        out.extend(42u16.to_le_bytes());
        out.extend((ifd0_offset as u32).to_le_bytes());

        write_ifd(&mut out, &ifd0);
        if !exif.is_empty() {
            debug_assert_eq!(out.len(), exif_offset);
            write_ifd(&mut out, &exif);
        }
        if !gps.is_empty() {
            debug_assert_eq!(out.len(), gps_offset);
            write_ifd(&mut out, &gps);
        }
        out
    }

    /// A baseline JPEG: SOI, APP1 "Exif", then a decodable 8x8 grey frame.
    pub(crate) fn jpeg(&self) -> Vec<u8> {
        let tiff = self.tiff();
        let segment_len = (2 + 6 + tiff.len()) as u16;

        let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
        out.extend(segment_len.to_be_bytes());
        out.extend(b"Exif\0\0");
        out.extend(tiff);
        out.extend(grey_frame());
        out
    }
}

/// DQT, SOF0, DHT and SOS for a single flat 8x8 block, then the entropy
/// coded scan and EOI.
fn grey_frame() -> Vec<u8> {
    let mut out = Vec::new();
    // DQT: table 0, all ones
    out.extend([0xFF, 0xDB, 0x00, 0x43, 0x00]);
    out.extend([1u8; 64]);
    // SOF0: 8-bit, 8x8, one component (id 1, 1x1 sampling, table 0)
    out.extend([0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x08, 0x00, 0x08, 0x01]);
    out.extend([0x01, 0x11, 0x00]);
    // DHT: DC table 0 then AC table 0, each a single one-bit code for symbol 0
    for class in [0x00, 0x10] {
        out.extend([0xFF, 0xC4, 0x00, 0x14, class, 0x01]);
        out.extend([0u8; 15]);
        out.push(0x00);
    }
    // SOS: one component, tables 0/0, full spectral range
    out.extend([0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
    // DC diff 0, then EOB, padded with ones
    out.push(0x3F);
    out.extend([0xFF, 0xD9]);
    out
}

/// A PNG with a header chunk and nothing else, so no EXIF.
pub(crate) fn png_without_exif() -> Vec<u8> {
    let mut out = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    // IHDR: 1x1, 8-bit greyscale
    out.extend(13u32.to_be_bytes());
    out.extend(b"IHDR");
    out.extend(1u32.to_be_bytes());
    out.extend(1u32.to_be_bytes());
    out.extend([8, 0, 0, 0, 0]);
    out.extend(0x3A7E9B55u32.to_be_bytes());
    // IEND
    out.extend(0u32.to_be_bytes());
    out.extend(b"IEND");
    out.extend(0xAE426082u32.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiff_header_and_entry_count() {
        let tiff = ExifBuilder::default().model("Pixel 7").tiff();
        assert_eq!(&tiff[..4], b"II*\0");
        assert_eq!(u32::from_le_bytes([tiff[4], tiff[5], tiff[6], tiff[7]]), 8);
        assert_eq!(u16::from_le_bytes([tiff[8], tiff[9]]), 1);
    }

    #[test]
    fn sub_ifd_offsets_line_up() {
        let b = ExifBuilder::default()
            .model("Pixel 7")
            .focal_length(50, 1)
            .gps('N', [(1, 1), (2, 1), (3, 1)], 'E', [(4, 1), (5, 1), (6, 1)]);
        let tiff = b.tiff();
        // IFD0: Model, ExifIFD pointer, GPS pointer
        assert_eq!(u16::from_le_bytes([tiff[8], tiff[9]]), 3);
        // GPS IFD holds four entries
        let gps_ptr_entry = 10 + 12 * 2;
        let at = gps_ptr_entry + 8;
        let gps_offset =
            u32::from_le_bytes([tiff[at], tiff[at + 1], tiff[at + 2], tiff[at + 3]]) as usize;
        assert_eq!(u16::from_le_bytes([tiff[gps_offset], tiff[gps_offset + 1]]), 4);
    }

    #[test]
    fn jpeg_wraps_tiff() {
        let jpeg = ExifBuilder::default().model("x").jpeg();
        assert_eq!(&jpeg[..4], &[0xFF, 0xD8, 0xFF, 0xE1]);
        assert_eq!(&jpeg[6..12], b"Exif\0\0");
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn jpeg_outgrows_header_read() {
        // Smallest builder there is: no tags at all.
        assert!(ExifBuilder::default().jpeg().len() > 128);
        assert!(ExifBuilder::default().model("x").jpeg().len() > 128);
    }

    #[test]
    fn jpeg_frame_follows_exif() {
        let jpeg = ExifBuilder::default().model("x").jpeg();
        let app1_len = u16::from_be_bytes([jpeg[4], jpeg[5]]) as usize;
        let next = 4 + app1_len;
        assert_eq!(&jpeg[next..next + 2], &[0xFF, 0xDB]);
        assert!(jpeg.windows(2).any(|w| w == [0xFF, 0xC0]));
        assert!(jpeg.windows(2).any(|w| w == [0xFF, 0xDA]));
    }
}
