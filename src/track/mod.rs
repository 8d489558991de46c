//! Track slicing, assembly and row I/O

pub mod builder;
pub mod records;
pub mod splitter;

pub use builder::TrackBuilder;
pub use records::{read_track, read_track_file, write_track, write_track_file};
pub use splitter::{burst_index, split, split_with_trim, BurstPolicy, SplitTrack};
