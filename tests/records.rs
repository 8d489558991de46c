use std::fs;

use trackwarp::{read_track, read_track_file, write_track_file, Error, TrackPoint};

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flight_path.csv");

    let track = vec![
        TrackPoint::new(1_400_000_000, 51.5, -0.45, 10.0),
        TrackPoint::new(1_400_000_060, 51.512345678, -0.4412, 250.5),
        TrackPoint::new(1_400_000_120, -33.9, 151.2, 1e4),
    ];

    write_track_file(&path, &track).unwrap();
    assert_eq!(read_track_file(&path).unwrap(), track);

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("1400000000,51.5,-0.45,10.0\n"));
}

#[test]
fn test_reads_padded_rows() {
    let rows = "0, 51.0, -1.0, 0\n60 ,51.01,-1.0 , 500.5\n";
    let track = read_track(rows.as_bytes()).unwrap();

    assert_eq!(track.len(), 2);
    assert_eq!(track[1], TrackPoint::new(60, 51.01, -1.0, 500.5));
}

#[test]
fn test_malformed_rows() {
    for rows in ["0,51.0,-1.0\n", "0,51.0,-1.0,abc\n", "1.5,51.0,-1.0,0\n"] {
        let err = read_track(rows.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Record(_)), "accepted {:?}", rows);
    }
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_track_file(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
