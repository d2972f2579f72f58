//! A small GeoTIFF dictionary for the projection records that las files carry.
//!
//! Las files store their coordinate reference system as GeoTIFF tags inside variable length
//! records: the GeoKeyDirectoryTag (34735) holds the keys, and the GeoDoubleParamsTag (34736) and
//! GeoAsciiParamsTag (34737) hold any values that don't fit in a key entry. This module only names
//! things so that those records can be shown to a person. It does not interpret a crs.

use crate::{Error, Result, field};

/// The record id of the GeoKeyDirectoryTag vlr.
pub const GEO_KEY_DIRECTORY_TAG: u16 = 34735;

/// The record id of the GeoDoubleParamsTag vlr.
pub const GEO_DOUBLE_PARAMS_TAG: u16 = 34736;

/// The record id of the GeoAsciiParamsTag vlr.
pub const GEO_ASCII_PARAMS_TAG: u16 = 34737;

const DATA_TYPE_LENGTHS: [usize; 13] = [0, 1, 1, 2, 4, 8, 1, 2, 2, 4, 8, 8, 16];

/// Returns the name of a tiff tag, if it is one we know.
///
/// # Examples
///
/// ```
/// use lasfile::geotiff;
/// assert_eq!(Some("GeoKeyDirectoryTag"), geotiff::tag_name(34735));
/// assert_eq!(None, geotiff::tag_name(1));
/// ```
pub fn tag_name(code: u16) -> Option<&'static str> {
    Some(match code {
        256 => "ImageWidth",
        257 => "ImageLength",
        258 => "BitsPerSample",
        259 => "Compression",
        262 => "PhotometricInterpretation",
        273 => "StripOffsets",
        277 => "SamplesPerPixel",
        278 => "RowsPerStrip",
        279 => "StripByteCounts",
        284 => "PlanarConfiguration",
        339 => "SampleFormat",
        33550 => "ModelPixelScaleTag",
        33922 => "ModelTiepointTag",
        34264 => "ModelTransformationTag",
        34735 => "GeoKeyDirectoryTag",
        34736 => "GeoDoubleParamsTag",
        34737 => "GeoAsciiParamsTag",
        42112 => "GDAL_METADATA",
        42113 => "GDAL_NODATA",
        _ => return None,
    })
}

/// Returns the name of a GeoKey, if it is one we know.
///
/// # Examples
///
/// ```
/// use lasfile::geotiff;
/// assert_eq!(Some("ProjectedCSTypeGeoKey"), geotiff::key_name(3072));
/// ```
pub fn key_name(id: u16) -> Option<&'static str> {
    Some(match id {
        1024 => "GTModelTypeGeoKey",
        1025 => "GTRasterTypeGeoKey",
        1026 => "GTCitationGeoKey",
        2048 => "GeographicTypeGeoKey",
        2049 => "GeogCitationGeoKey",
        2050 => "GeogGeodeticDatumGeoKey",
        2051 => "GeogPrimeMeridianGeoKey",
        2052 => "GeogLinearUnitsGeoKey",
        2053 => "GeogLinearUnitSizeGeoKey",
        2054 => "GeogAngularUnitsGeoKey",
        2055 => "GeogAngularUnitSizeGeoKey",
        2056 => "GeogEllipsoidGeoKey",
        2057 => "GeogSemiMajorAxisGeoKey",
        2058 => "GeogSemiMinorAxisGeoKey",
        2059 => "GeogInvFlatteningGeoKey",
        2060 => "GeogAzimuthUnitsGeoKey",
        2061 => "GeogPrimeMeridianLongGeoKey",
        3072 => "ProjectedCSTypeGeoKey",
        3073 => "PCSCitationGeoKey",
        3074 => "ProjectionGeoKey",
        3075 => "ProjCoordTransGeoKey",
        3076 => "ProjLinearUnitsGeoKey",
        3077 => "ProjLinearUnitSizeGeoKey",
        3078 => "ProjStdParallel1GeoKey",
        3079 => "ProjStdParallel2GeoKey",
        3080 => "ProjNatOriginLongGeoKey",
        3081 => "ProjNatOriginLatGeoKey",
        3082 => "ProjFalseEastingGeoKey",
        3083 => "ProjFalseNorthingGeoKey",
        3084 => "ProjFalseOriginLongGeoKey",
        3085 => "ProjFalseOriginLatGeoKey",
        3086 => "ProjFalseOriginEastingGeoKey",
        3087 => "ProjFalseOriginNorthingGeoKey",
        3088 => "ProjCenterLongGeoKey",
        3089 => "ProjCenterLatGeoKey",
        3090 => "ProjCenterEastingGeoKey",
        3091 => "ProjCenterNorthingGeoKey",
        3092 => "ProjScaleAtNatOriginGeoKey",
        3093 => "ProjScaleAtCenterGeoKey",
        3094 => "ProjAzimuthAngleGeoKey",
        3095 => "ProjStraightVertPoleLongGeoKey",
        4096 => "VerticalCSTypeGeoKey",
        4097 => "VerticalCitationGeoKey",
        4098 => "VerticalDatumGeoKey",
        4099 => "VerticalUnitsGeoKey",
        _ => return None,
    })
}

/// Returns the byte length of one value of a data type code, 0 through 12.
///
/// Codes past the end of the table have no length.
///
/// # Examples
///
/// ```
/// use lasfile::geotiff;
/// assert_eq!(Some(2), geotiff::data_type_len(3));
/// assert_eq!(Some(16), geotiff::data_type_len(12));
/// assert_eq!(None, geotiff::data_type_len(13));
/// ```
pub fn data_type_len(code: u16) -> Option<usize> {
    DATA_TYPE_LENGTHS.get(usize::from(code)).copied()
}

/// The parsed payload of a GeoKeyDirectoryTag record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeoKeyDirectory {
    /// The key directory version, always 1.
    pub key_directory_version: u16,
    /// The key revision.
    pub key_revision: u16,
    /// The minor revision.
    pub minor_revision: u16,
    /// The key entries.
    pub entries: Vec<GeoKeyEntry>,
}

/// One entry of a GeoKeyDirectoryTag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeoKeyEntry {
    /// The GeoKey id, e.g. 3072 for the projected crs.
    pub key_id: u16,
    /// Zero if the value is stored inline, otherwise the tag holding it (34736 or 34737).
    pub tiff_tag_location: u16,
    /// The number of values.
    pub count: u16,
    /// The value itself when inline, otherwise an index into the referenced record.
    pub value_offset: u16,
}

impl GeoKeyDirectory {
    /// Parses a GeoKeyDirectoryTag payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::geotiff::GeoKeyDirectory;
    /// let data: Vec<u8> = [1u16, 1, 0, 1, 3072, 0, 1, 32611]
    ///     .iter()
    ///     .flat_map(|n| n.to_le_bytes())
    ///     .collect();
    /// let directory = GeoKeyDirectory::parse(&data).unwrap();
    /// assert_eq!(32611, directory.entries[0].value_offset);
    /// ```
    pub fn parse(data: &[u8]) -> Result<GeoKeyDirectory> {
        if data.len() < 8 {
            return Err(Error::Truncated {
                what: "geokey directory",
                needed: 8,
                available: data.len(),
            });
        }
        let number_of_keys = usize::from(field::read_u16(data, 6));
        let needed = 8 + number_of_keys * 8;
        if data.len() < needed {
            return Err(Error::Truncated {
                what: "geokey directory",
                needed,
                available: data.len(),
            });
        }
        let entries = (0..number_of_keys)
            .map(|i| {
                let offset = 8 + i * 8;
                GeoKeyEntry {
                    key_id: field::read_u16(data, offset),
                    tiff_tag_location: field::read_u16(data, offset + 2),
                    count: field::read_u16(data, offset + 4),
                    value_offset: field::read_u16(data, offset + 6),
                }
            })
            .collect();
        Ok(GeoKeyDirectory {
            key_directory_version: field::read_u16(data, 0),
            key_revision: field::read_u16(data, 2),
            minor_revision: field::read_u16(data, 4),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|n| n.to_le_bytes()).collect()
    }

    #[test]
    fn data_type_lengths() {
        let lengths: Vec<_> = (0..13).filter_map(data_type_len).collect();
        assert_eq!(vec![0, 1, 1, 2, 4, 8, 1, 2, 2, 4, 8, 8, 16], lengths);
    }

    #[test]
    fn projection_tags_are_named() {
        assert_eq!(Some("GeoDoubleParamsTag"), tag_name(GEO_DOUBLE_PARAMS_TAG));
        assert_eq!(Some("GeoAsciiParamsTag"), tag_name(GEO_ASCII_PARAMS_TAG));
        assert_eq!(Some("GTModelTypeGeoKey"), key_name(1024));
        assert_eq!(None, key_name(1));
    }

    #[test]
    fn parse_directory() {
        let data = bytes(&[1, 1, 0, 2, 1024, 0, 1, 1, 3072, 0, 1, 26910]);
        let directory = GeoKeyDirectory::parse(&data).unwrap();
        assert_eq!(1, directory.key_directory_version);
        assert_eq!(2, directory.entries.len());
        assert_eq!(1024, directory.entries[0].key_id);
        assert_eq!(26910, directory.entries[1].value_offset);
    }

    #[test]
    fn parse_truncated() {
        assert!(GeoKeyDirectory::parse(&[1, 0]).is_err());
        let data = bytes(&[1, 1, 0, 2, 1024, 0, 1, 1]);
        assert!(GeoKeyDirectory::parse(&data).is_err());
    }
}
