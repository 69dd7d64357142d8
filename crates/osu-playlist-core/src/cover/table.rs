//! Fixed-width difficulty table drawn on match covers

use crate::api::ApiBeatmap;
use crate::difficulty::DifficultyResult;

const RULE: &str = "+---------------------------+";

/// Values shown in the difficulty table
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyTable {
    pub heading: String,
    pub star: String,
    pub cs: f64,
    pub hp: f64,
    pub ar: f64,
    pub od: f64,
    pub bpm: f64,
    /// Drain time in seconds
    pub length: u32,
}

impl DifficultyTable {
    /// Table of the unmodified beatmap as reported by the API
    pub fn original(beatmap: &ApiBeatmap) -> Self {
        Self {
            heading: "Original Difficulty".to_string(),
            star: format!("{:.2}", beatmap.difficulty_rating),
            cs: beatmap.cs,
            hp: beatmap.drain,
            ar: beatmap.ar,
            od: beatmap.accuracy,
            bpm: beatmap.bpm.unwrap_or_default(),
            length: beatmap.hit_length,
        }
    }

    /// Table of a recalculated difficulty
    pub fn adjusted(beatmap: &ApiBeatmap, result: &DifficultyResult) -> Self {
        let heading = if result.mods.is_empty() {
            "Difficulty".to_string()
        } else {
            format!("{} Difficulty", result.mods)
        };

        Self {
            heading,
            star: result.star_rating.to_string(),
            cs: result.cs,
            hp: result.hp,
            ar: result.ar,
            od: result.od,
            bpm: result.bpm,
            length: (f64::from(beatmap.hit_length) / result.clock_rate).round() as u32,
        }
    }

    /// Rendered lines, each 29 characters wide
    pub fn lines(&self) -> Vec<String> {
        vec![
            RULE.to_string(),
            format!("|{:^27}|", self.heading),
            RULE.to_string(),
            format!("| Star  {:<19} |", self.star),
            format!("| CS  {:<8.2} HP  {:<8.2} |", self.cs, self.hp),
            format!("| AR  {:<8.2} OD  {:<8.2} |", self.ar, self.od),
            format!("| BPM {:<8.2} LEN {:<8} |", self.bpm, format_length(self.length)),
            RULE.to_string(),
        ]
    }
}

fn format_length(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::StarRating;

    fn beatmap() -> ApiBeatmap {
        ApiBeatmap {
            difficulty_rating: 6.421,
            cs: 4.0,
            drain: 5.5,
            accuracy: 9.0,
            ar: 9.4,
            bpm: Some(185.0),
            hit_length: 203,
            ..Default::default()
        }
    }

    #[test]
    fn test_original_table_lines() {
        let lines = DifficultyTable::original(&beatmap()).lines();
        assert!(lines.iter().all(|l| l.chars().count() == 29), "{lines:#?}");
        assert_eq!(lines[1], "|    Original Difficulty    |");
        assert_eq!(lines[3], "| Star  6.42                |");
        assert_eq!(lines[4], "| CS  4.00     HP  5.50     |");
        assert_eq!(lines[6], "| BPM 185.00   LEN 3:23     |");
    }

    #[test]
    fn test_adjusted_table_with_dt() {
        let result = DifficultyResult {
            mods: "HDDT".to_string(),
            clock_rate: 1.5,
            cs: 4.0,
            hp: 5.5,
            od: 10.33,
            ar: 10.53,
            bpm: 277.5,
            max_combo: 1532,
            star_rating: StarRating::Single(8.91),
        };
        let table = DifficultyTable::adjusted(&beatmap(), &result);
        assert_eq!(table.heading, "HDDT Difficulty");
        assert_eq!(table.length, 135);

        let lines = table.lines();
        assert!(lines.iter().all(|l| l.chars().count() == 29));
    }

    #[test]
    fn test_adjusted_table_keeps_length_without_speed_change() {
        struct Unrated;
        impl crate::difficulty::DifficultyEngine for Unrated {
            fn calculate(
                &self,
                _path: &std::path::Path,
                _mods: u32,
            ) -> crate::Result<crate::difficulty::EngineAttributes> {
                Ok(Default::default())
            }
        }

        let base = crate::difficulty::BaseAttributes {
            bpm: 185.0,
            ..Default::default()
        };
        let mods = crate::mods::ModSet::parse("HD TD");
        let result =
            crate::difficulty::recalculate(&Unrated, &base, std::path::Path::new("x"), &mods)
                .unwrap();

        let table = DifficultyTable::adjusted(&beatmap(), &result);
        assert_eq!(table.heading, "HDTD Difficulty");
        assert_eq!(table.bpm, 185.0);
        assert_eq!(table.length, 203);
    }
}
