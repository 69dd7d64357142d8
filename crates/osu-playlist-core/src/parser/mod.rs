//! .osu file and .osz archive parsing

mod osu_file;
mod osz;

pub use osu_file::parse_osu_file;
pub use osz::{extract_osz, find_difficulty, ExtractedDifficulty};
