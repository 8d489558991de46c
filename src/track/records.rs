//! Header-less `time,lat,lon,alt` rows
//!
//! This is the storage boundary: the core never calls these itself, the
//! binaries and the HTTP layer do.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::{Track, TrackPoint};

type Row = (i64, f64, f64, f64);

/// Reads a track from delimited rows
pub fn read_track<R: Read>(reader: R) -> Result<Track> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut track = Vec::new();
    for row in csv_reader.deserialize::<Row>() {
        let (time, lat, lon, alt) = row?;
        track.push(TrackPoint::new(time, lat, lon, alt));
    }

    Ok(track)
}

/// Writes a track as delimited rows
pub fn write_track<W: Write>(writer: W, track: &[TrackPoint]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for point in track {
        csv_writer.serialize((point.time, point.lat, point.lon, point.alt))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Reads a track from a file
pub fn read_track_file<P: AsRef<Path>>(path: P) -> Result<Track> {
    let file = File::open(path)?;
    read_track(file)
}

/// Writes a track to a file, replacing any existing content
pub fn write_track_file<P: AsRef<Path>>(path: P, track: &[TrackPoint]) -> Result<()> {
    let file = File::create(path)?;
    write_track(file, track)
}
