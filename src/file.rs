//! Whole-file reading and writing.
//!
//! A [ReadHandle] decodes a complete file from one buffer and then only answers lookups. A
//! [WriteBuilder] collects a header, vlrs, and point records, then encodes them into one freshly
//! sized buffer. Keeping the two apart means that a write-only or read-only misuse is a compile
//! error:
//!
//! ```
//! use lasfile::{PointData, PointRecord, ReadHandle, WriteBuilder};
//!
//! let mut builder = WriteBuilder::new();
//! let point = PointData { x: 1., y: 2., z: 3., ..Default::default() };
//! builder.add_point_record(PointRecord::Format0 { point }).unwrap();
//! let las = ReadHandle::from_bytes(&builder.into_bytes().unwrap()).unwrap();
//! assert_eq!(1., las[0].x);
//! ```
//!
//! Callers that pick the mode at runtime use [LasFile], which reports misuse as an error
//! instead.

use crate::{
    Color, Error, Header, PointData, PointRecord, Result, Vlr,
    header::HEADER_SIZE,
};
use log::{debug, warn};
use std::{
    ffi::OsStr,
    fs,
    io::Write,
    ops::Index,
    path::{Path, PathBuf},
    str::FromStr,
};

/// How a [LasFile] is opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileMode {
    /// Read the whole file, `"r"`.
    Read,
    /// Read only the header and vlrs, `"rh"`.
    ReadHeader,
    /// Build a new file, `"w"`.
    Write,
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<FileMode> {
        match s {
            "r" => Ok(FileMode::Read),
            "rh" => Ok(FileMode::ReadHeader),
            "w" => Ok(FileMode::Write),
            _ => Err(Error::UnsupportedFileMode(s.to_string())),
        }
    }
}

/// Options for reading a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    read_points: bool,
}

impl ReadOptions {
    /// Sets whether the point records are decoded.
    ///
    /// When false, only the header and vlrs are read and the handle has no points.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::ReadOptions;
    /// let options = ReadOptions::default().with_read_points(false);
    /// assert!(!options.read_points());
    /// ```
    pub fn with_read_points(mut self, read_points: bool) -> ReadOptions {
        self.read_points = read_points;
        self
    }

    /// Returns whether the point records are decoded.
    pub fn read_points(&self) -> bool {
        self.read_points
    }
}

impl Default for ReadOptions {
    fn default() -> ReadOptions {
        ReadOptions { read_points: true }
    }
}

/// A decoded las file that answers lookups.
///
/// The gps time and color arrays run parallel to the points when the point format has them, and
/// are empty otherwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadHandle {
    path: Option<PathBuf>,
    header: Header,
    vlrs: Vec<Vlr>,
    points: Vec<PointData>,
    gps_times: Vec<f64>,
    colors: Vec<Color>,
}

impl ReadHandle {
    /// Reads and decodes the file at `path`.
    ///
    /// The path must have a `.las` extension, which is checked before the file is touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Error, ReadHandle};
    /// assert!(matches!(ReadHandle::open("points.txt"), Err(Error::WrongFileExtension(_))));
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ReadHandle> {
        ReadHandle::open_with_options(path, ReadOptions::default())
    }

    /// Reads and decodes the file at `path` with options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<ReadHandle> {
        let path = path.as_ref();
        check_extension(path)?;
        let bytes = fs::read(path)?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        let mut read_handle = ReadHandle::from_bytes_with_options(&bytes, options)?;
        read_handle.path = Some(path.to_path_buf());
        Ok(read_handle)
    }

    /// Decodes a complete file from a buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<ReadHandle> {
        ReadHandle::from_bytes_with_options(bytes, ReadOptions::default())
    }

    /// Decodes a file from a buffer with options.
    ///
    /// The header comes first, then the vlrs starting at the header size, then the points starting
    /// at the offset to point data.
    pub fn from_bytes_with_options(bytes: &[u8], options: ReadOptions) -> Result<ReadHandle> {
        let header = Header::decode(bytes)?;
        let vlrs = Vlr::decode_all(
            bytes,
            usize::from(header.header_size),
            usize::try_from(header.number_of_variable_length_records).unwrap_or(usize::MAX),
        )?;
        let vlr_end = usize::from(header.header_size) + vlrs.iter().map(Vlr::len).sum::<usize>();
        let offset_to_points = usize::try_from(header.offset_to_point_data).unwrap_or(usize::MAX);
        if vlr_end > offset_to_points {
            return Err(Error::VlrOverrun {
                end: vlr_end,
                offset_to_points: header.offset_to_point_data,
            });
        } else if vlr_end < offset_to_points {
            warn!(
                "{} bytes between the last vlr and the point data",
                offset_to_points - vlr_end
            );
        }

        let mut read_handle = ReadHandle {
            path: None,
            header,
            vlrs,
            points: Vec::new(),
            gps_times: Vec::new(),
            colors: Vec::new(),
        };
        if options.read_points {
            read_handle.decode_points(bytes, offset_to_points)?;
        }
        Ok(read_handle)
    }

    fn decode_points(&mut self, bytes: &[u8], offset_to_points: usize) -> Result<()> {
        let format = self.header.point_format;
        let stride = usize::from(self.header.point_data_record_length);
        if stride > usize::from(format.record_length()) {
            warn!(
                "point records are {} bytes, format {} only needs {}",
                stride,
                format,
                format.record_length()
            );
        }
        let count = usize::try_from(self.header.number_of_point_records).unwrap_or(usize::MAX);
        let needed = count
            .checked_mul(stride)
            .and_then(|n| n.checked_add(offset_to_points))
            .unwrap_or(usize::MAX);
        if bytes.len() < needed {
            return Err(Error::Truncated {
                what: "point records",
                needed,
                available: bytes.len(),
            });
        }
        self.points = Vec::with_capacity(count);
        if format.has_gps_time() {
            self.gps_times = Vec::with_capacity(count);
        }
        if format.has_color() {
            self.colors = Vec::with_capacity(count);
        }
        for i in 0..count {
            let record =
                PointRecord::decode(bytes, offset_to_points + i * stride, format, &self.header.transforms);
            self.points.push(*record.point_data());
            if let Some(gps_time) = record.gps_time() {
                self.gps_times.push(gps_time);
            }
            if let Some(color) = record.color() {
                self.colors.push(color);
            }
        }
        debug!("decoded {} format {} points", count, format);
        Ok(())
    }

    /// The path this file was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The variable length records.
    pub fn vlrs(&self) -> &[Vlr] {
        &self.vlrs
    }

    /// The number of decoded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points were decoded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Does this file's point format carry gps time?
    pub fn has_gps_time(&self) -> bool {
        self.header.has_gps_time()
    }

    /// Does this file's point format carry color?
    pub fn has_color(&self) -> bool {
        self.header.has_color()
    }

    /// The base fields of the point at `index`.
    pub fn point(&self, index: usize) -> Option<&PointData> {
        self.points.get(index)
    }

    /// The point at `index` as a record of this file's format.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{ReadHandle, WriteBuilder};
    /// let las = ReadHandle::from_bytes(&WriteBuilder::new().into_bytes().unwrap()).unwrap();
    /// assert!(las.get_record(0).is_none());
    /// ```
    pub fn get_record(&self, index: usize) -> Option<PointRecord> {
        let point = self.points.get(index)?;
        Some(PointRecord::new(
            self.header.point_format,
            *point,
            self.gps_time(index),
            self.color(index),
        ))
    }

    /// The gps time of the point at `index`, if the format has one.
    pub fn gps_time(&self, index: usize) -> Option<f64> {
        self.gps_times.get(index).copied()
    }

    /// The color of the point at `index`, if the format has one.
    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Iterates over every point as a record.
    pub fn records(&self) -> impl Iterator<Item = PointRecord> + '_ {
        (0..self.len()).filter_map(move |i| self.get_record(i))
    }
}

impl Index<usize> for ReadHandle {
    type Output = PointData;

    fn index(&self, index: usize) -> &PointData {
        &self.points[index]
    }
}

/// Collects a header, vlrs, and point records, then encodes them as a las 1.3 file.
///
/// The header's summary fields (point count, per-return counts, and bounds) start at their
/// sentinels and are updated as each record is added.
#[derive(Clone, Debug, PartialEq)]
pub struct WriteBuilder {
    path: Option<PathBuf>,
    header: Header,
    vlrs: Vec<Vlr>,
    points: Vec<PointData>,
    gps_times: Vec<f64>,
    colors: Vec<Color>,
}

impl WriteBuilder {
    /// Creates a builder that encodes to memory, with a default header.
    pub fn new() -> WriteBuilder {
        let mut header = Header::default();
        header.clear_summary();
        WriteBuilder {
            path: None,
            header,
            vlrs: Vec::new(),
            points: Vec::new(),
            gps_times: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Creates a builder that will write to `path`.
    ///
    /// Nothing is written until [WriteBuilder::write].
    pub fn create<P: AsRef<Path>>(path: P) -> Result<WriteBuilder> {
        let path = path.as_ref();
        check_extension(path)?;
        let mut builder = WriteBuilder::new();
        builder.path = Some(path.to_path_buf());
        Ok(builder)
    }

    /// Creates a builder for `path` that starts with the header and vlrs of another file.
    ///
    /// No points are copied.
    pub fn from_template<P: AsRef<Path>>(path: P, template: &ReadHandle) -> Result<WriteBuilder> {
        let mut builder = WriteBuilder::create(path)?;
        builder.add_header(template.header.clone())?;
        for vlr in &template.vlrs {
            builder.add_vlr(vlr.clone());
        }
        Ok(builder)
    }

    /// Creates an in-memory builder holding everything in a decoded file, points included.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{ReadHandle, WriteBuilder};
    /// let bytes = WriteBuilder::new().into_bytes().unwrap();
    /// let las = ReadHandle::from_bytes(&bytes).unwrap();
    /// let copy = WriteBuilder::copy_from(&las).unwrap();
    /// assert_eq!(bytes, copy.into_bytes().unwrap());
    /// ```
    pub fn copy_from(read_handle: &ReadHandle) -> Result<WriteBuilder> {
        let mut builder = WriteBuilder::new();
        builder.add_header(read_handle.header.clone())?;
        for vlr in &read_handle.vlrs {
            builder.add_vlr(vlr.clone());
        }
        for record in read_handle.records() {
            builder.add_point_record(record)?;
        }
        Ok(builder)
    }

    /// The header as it stands.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The vlrs added so far.
    pub fn vlrs(&self) -> &[Vlr] {
        &self.vlrs
    }

    /// The number of points added so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points have been added.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replaces the header, resetting its summary fields.
    ///
    /// Fails once points have been added, since they were quantized against the old header.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Header, PointRecord, WriteBuilder};
    /// let mut builder = WriteBuilder::new();
    /// builder.add_header(Header::default()).unwrap();
    /// builder.add_point_record(PointRecord::default()).unwrap();
    /// assert!(builder.add_header(Header::default()).is_err());
    /// ```
    pub fn add_header(&mut self, mut header: Header) -> Result<()> {
        if !self.points.is_empty() {
            return Err(Error::HeaderAfterPoints);
        }
        header.clear_summary();
        header.point_data_record_length = header.point_format.record_length();
        self.header = header;
        Ok(())
    }

    /// Appends a vlr.
    pub fn add_vlr(&mut self, vlr: Vlr) {
        self.vlrs.push(vlr);
    }

    /// Appends a point record, updating the header's summary fields.
    ///
    /// The record must be of the header's point format. The bounds grow by the coordinates as
    /// they will be stored, after quantization.
    pub fn add_point_record(&mut self, record: PointRecord) -> Result<()> {
        let format = self.header.point_format;
        if record.format() != format {
            return Err(Error::PointFormatMismatch {
                expected: format,
                found: record.format(),
            });
        }
        let point = *record.point_data();
        let transforms = &self.header.transforms;
        let x = transforms.x.direct(transforms.x.inverse(point.x)?);
        let y = transforms.y.direct(transforms.y.inverse(point.y)?);
        let z = transforms.z.direct(transforms.z.inverse(point.z)?);
        self.header.bounds.grow_xyz(x, y, z);

        let return_number = point.return_number();
        match usize::from(return_number)
            .checked_sub(1)
            .and_then(|i| self.header.number_of_points_by_return.get_mut(i))
        {
            Some(count) => *count += 1,
            None => warn!("return number {return_number} is not counted"),
        }
        self.header.number_of_point_records = self.header.number_of_point_records.saturating_add(1);

        self.points.push(point);
        if let Some(gps_time) = record.gps_time() {
            self.gps_times.push(gps_time);
        }
        if let Some(color) = record.color() {
            self.colors.push(color);
        }
        Ok(())
    }

    /// Encodes the file into a new buffer.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        self.encode()
    }

    /// Encodes the file and writes it to `write`.
    pub fn write_to<W: Write>(mut self, mut write: W) -> Result<()> {
        let bytes = self.encode()?;
        write.write_all(&bytes)?;
        write.flush()?;
        Ok(())
    }

    /// Encodes the file and writes it to the path this builder was created with.
    pub fn write(mut self) -> Result<()> {
        let path = self.path.take().ok_or(Error::MissingPath)?;
        let bytes = self.encode()?;
        fs::write(&path, &bytes)?;
        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn encode(&mut self) -> Result<Vec<u8>> {
        let format = self.header.point_format;
        let record_length = usize::from(format.record_length());
        let vlr_len: usize = self.vlrs.iter().map(Vlr::len).sum();
        let offset_to_points = usize::from(HEADER_SIZE) + vlr_len;
        self.header.offset_to_point_data =
            u32::try_from(offset_to_points).map_err(|_| Error::VlrTooLong(vlr_len))?;
        self.header.number_of_variable_length_records =
            u32::try_from(self.vlrs.len()).map_err(|_| Error::VlrTooLong(vlr_len))?;
        self.header.number_of_point_records =
            u32::try_from(self.points.len()).map_err(|_| Error::TooManyPoints(self.points.len()))?;
        self.header.point_data_record_length = format.record_length();

        let mut buf = vec![0; offset_to_points + self.points.len() * record_length];
        let mut offset = self.header.encode(&mut buf, 0);
        offset += Vlr::encode_all(&self.vlrs, &mut buf, offset);
        for (i, point) in self.points.iter().enumerate() {
            let record = PointRecord::new(
                format,
                *point,
                self.gps_times.get(i).copied(),
                self.colors.get(i).copied(),
            );
            offset += record.encode(&mut buf, offset, &self.header.transforms)?;
        }
        debug!(
            "encoded {} vlrs and {} format {} points into {} bytes",
            self.vlrs.len(),
            self.points.len(),
            format,
            offset
        );
        Ok(buf)
    }
}

impl Default for WriteBuilder {
    fn default() -> WriteBuilder {
        WriteBuilder::new()
    }
}

/// A las file opened by path and mode string, for callers that choose the mode at runtime.
///
/// # Examples
///
/// ```
/// use lasfile::{Error, LasFile, Vlr};
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("points.las");
///
/// let mut las = LasFile::new(&path, "w").unwrap();
/// las.add_vlr(Vlr::default()).unwrap();
/// las.write().unwrap();
///
/// let mut las = LasFile::new(&path, "r").unwrap();
/// assert!(matches!(las.add_vlr(Vlr::default()), Err(Error::ReadOnlyViolation)));
/// assert_eq!(1, las.vlrs().len());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum LasFile {
    /// Opened with `"r"` or `"rh"`.
    Read(ReadHandle),
    /// Opened with `"w"`.
    Write(WriteBuilder),
}

impl LasFile {
    /// Opens `path` in `mode`: `"r"` reads everything, `"rh"` reads the header and vlrs, and
    /// `"w"` starts a new file.
    ///
    /// The extension is checked before anything else.
    pub fn new<P: AsRef<Path>>(path: P, mode: &str) -> Result<LasFile> {
        let path = path.as_ref();
        check_extension(path)?;
        match mode.parse::<FileMode>()? {
            FileMode::Read => ReadHandle::open(path).map(LasFile::Read),
            FileMode::ReadHeader => {
                ReadHandle::open_with_options(path, ReadOptions::default().with_read_points(false))
                    .map(LasFile::Read)
            }
            FileMode::Write => WriteBuilder::create(path).map(LasFile::Write),
        }
    }

    /// The header.
    pub fn header(&self) -> &Header {
        match self {
            LasFile::Read(read_handle) => read_handle.header(),
            LasFile::Write(builder) => builder.header(),
        }
    }

    /// The variable length records.
    pub fn vlrs(&self) -> &[Vlr] {
        match self {
            LasFile::Read(read_handle) => read_handle.vlrs(),
            LasFile::Write(builder) => builder.vlrs(),
        }
    }

    /// The number of points.
    pub fn len(&self) -> usize {
        match self {
            LasFile::Read(read_handle) => read_handle.len(),
            LasFile::Write(builder) => builder.len(),
        }
    }

    /// Returns true if there are no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the header of a file opened for writing.
    pub fn add_header(&mut self, header: Header) -> Result<()> {
        self.builder()?.add_header(header)
    }

    /// Appends a vlr to a file opened for writing.
    pub fn add_vlr(&mut self, vlr: Vlr) -> Result<()> {
        self.builder()?.add_vlr(vlr);
        Ok(())
    }

    /// Appends a point record to a file opened for writing.
    pub fn add_point_record(&mut self, record: PointRecord) -> Result<()> {
        self.builder()?.add_point_record(record)
    }

    /// Looks up a point record in a file opened for reading.
    pub fn get_record(&self, index: usize) -> Result<PointRecord> {
        match self {
            LasFile::Read(read_handle) => read_handle
                .get_record(index)
                .ok_or(Error::NoSuchPoint(index)),
            LasFile::Write(_) => Err(Error::WriteOnlyLookup),
        }
    }

    /// Writes a file opened for writing to its path.
    pub fn write(self) -> Result<()> {
        match self {
            LasFile::Read(_) => Err(Error::ReadOnlyViolation),
            LasFile::Write(builder) => builder.write(),
        }
    }

    fn builder(&mut self) -> Result<&mut WriteBuilder> {
        match self {
            LasFile::Read(_) => Err(Error::ReadOnlyViolation),
            LasFile::Write(builder) => Ok(builder),
        }
    }
}

fn check_extension(path: &Path) -> Result<()> {
    if path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| extension.eq_ignore_ascii_case("las"))
    {
        Ok(())
    } else {
        Err(Error::WrongFileExtension(path.to_path_buf()))
    }
}
