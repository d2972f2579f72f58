//! Roundtrip (write-read) tests for every supported point format and attribute.

use lasfile::{Color, Header, PointData, PointRecord, ReadHandle, WriteBuilder, point::Format};

fn roundtrip(format: Format, record: PointRecord) {
    let mut header = Header::default();
    header.point_format = format;
    let mut builder = WriteBuilder::new();
    builder.add_header(header).unwrap();
    builder.add_point_record(record).unwrap();
    let expected_header = builder.header().clone();
    let first = builder.into_bytes().unwrap();

    let las = ReadHandle::from_bytes(&first).unwrap();
    assert_eq!(1, las.len());
    assert_eq!(Some(record), las.get_record(0));
    assert!(las.get_record(1).is_none());
    assert_eq!(expected_header.bounds, las.header().bounds);
    assert_eq!(
        expected_header.number_of_points_by_return,
        las.header().number_of_points_by_return
    );

    let second = WriteBuilder::copy_from(&las).unwrap().into_bytes().unwrap();
    assert_eq!(first, second);
}

macro_rules! roundtrip_point {
    ($name:ident, $modify_point:expr) => {
        #[test]
        fn $name() {
            let mut point = PointData::default();
            $modify_point(&mut point);
            let record = PointRecord::new(
                super::format(),
                point,
                Some(1234.5678),
                Some(Color::new(1, 2, 3)),
            );
            crate::roundtrip(super::format(), record);
        }
    };
}

macro_rules! point_format {
    ($name:ident, $format:expr) => {
        mod $name {
            use lasfile::point::Format;

            fn format() -> Format {
                $format
            }

            mod point {
                use lasfile::{Color, PointData, PointRecord};

                roundtrip_point!(xyz, |p: &mut PointData| {
                    p.x = 1.;
                    p.y = 2.;
                    p.z = 3.;
                });
                roundtrip_point!(negative_xyz, |p: &mut PointData| {
                    p.x = -1000.5;
                    p.y = -0.001;
                    p.z = -42.;
                });
                roundtrip_point!(intensity, |p: &mut PointData| p.intensity = 42);
                roundtrip_point!(return_number, |p: &mut PointData| {
                    p.return_info.set_return_number(2)
                });
                roundtrip_point!(number_of_returns, |p: &mut PointData| {
                    p.return_info.set_number_of_returns(7)
                });
                roundtrip_point!(scan_direction, |p: &mut PointData| {
                    p.return_info.set_scan_direction_flag(true)
                });
                roundtrip_point!(edge_of_flight_line, |p: &mut PointData| {
                    p.return_info.set_edge_of_flight_line(true)
                });
                roundtrip_point!(classification, |p: &mut PointData| {
                    p.classification.set_class_code(9)
                });
                roundtrip_point!(synthetic, |p: &mut PointData| {
                    p.classification.set_synthetic(true)
                });
                roundtrip_point!(key_point, |p: &mut PointData| {
                    p.classification.set_key_point(true)
                });
                roundtrip_point!(withheld, |p: &mut PointData| {
                    p.classification.set_withheld(true)
                });
                roundtrip_point!(scan_angle_rank, |p: &mut PointData| p.scan_angle_rank = -90);
                roundtrip_point!(user_data, |p: &mut PointData| p.user_data = 255);
                roundtrip_point!(point_source_id, |p: &mut PointData| {
                    p.point_source_id = 65535
                });
            }
        }
    };
}

point_format!(format_0, Format::Format0);
point_format!(format_1, Format::Format1);
point_format!(format_2, Format::Format2);
point_format!(format_3, Format::Format3);

#[test]
fn extension_fields() {
    let record = PointRecord::Format3 {
        point: PointData::default(),
        gps_time: -1.5e9,
        color: Color::new(65535, 0, 32768),
    };
    roundtrip(Format::Format3, record);
}

#[test]
fn many_points() {
    let mut header = Header::default();
    header.point_format = Format::Format1;
    let mut builder = WriteBuilder::new();
    builder.add_header(header).unwrap();
    for i in 0..1000 {
        let n = f64::from(i);
        let mut point = PointData {
            x: n * 0.731,
            y: -n * 1.113,
            z: n * 0.017,
            ..Default::default()
        };
        point.return_info.set_return_number((i % 5 + 1) as u8);
        builder
            .add_point_record(PointRecord::Format1 {
                point,
                gps_time: n,
            })
            .unwrap();
    }
    assert_eq!(vec![200; 5], builder.header().number_of_points_by_return);
    let first = builder.into_bytes().unwrap();
    let las = ReadHandle::from_bytes(&first).unwrap();
    assert_eq!(1000, las.len());
    assert_eq!(Some(999.), las.gps_time(999));
    let second = WriteBuilder::copy_from(&las).unwrap().into_bytes().unwrap();
    assert_eq!(first, second);
}
