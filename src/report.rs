use chrono::NaiveDate;
use serde::Serialize;

use crate::stats::{MatchRecord, Outcome, StringTable};

/// One player's history, as fetched for the report.
#[derive(Clone, Debug)]
pub struct PlayerHistory {
    pub name: String,
    pub profile_id: i64,
    pub matches: Vec<MatchRecord>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CivReportRow {
    pub player: String,
    pub civ: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(rename = "custom")]
    pub undetermined: u32,
    pub total: u32,
    /// Game mode of the latest match counted in this row.
    pub mode: Option<String>,
}

impl CivReportRow {
    fn new(player: &str, civ: &str) -> Self {
        Self {
            player: player.to_string(),
            civ: civ.to_string(),
            wins: 0,
            losses: 0,
            undetermined: 0,
            total: 0,
            mode: None,
        }
    }

    fn record(&mut self, outcome: Outcome, mode: Option<&str>) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Undetermined => self.undetermined += 1,
        }
        self.total += 1;
        if let Some(mode) = mode {
            self.mode = Some(mode.to_string());
        }
    }
}

/// Folds match history into one row per (player, civilization). Players keep
/// their input order and civilizations their first-seen order. A match whose
/// civilization code has no label is skipped.
pub fn build_civ_report(players: &[PlayerHistory], strings: &StringTable) -> Vec<CivReportRow> {
    let mut rows = Vec::new();

    for player in players {
        let mut player_rows: Vec<CivReportRow> = Vec::new();

        for record in &player.matches {
            let Some(entry) = record
                .participants
                .iter()
                .find(|p| p.profile_id == Some(player.profile_id))
            else {
                continue;
            };

            let Some(civ) = entry.civ.and_then(|code| strings.lookup("civ", code)) else {
                continue;
            };
            let mode = record
                .game_type
                .and_then(|code| strings.lookup("game_type", code));

            let index = match player_rows.iter().position(|r| r.civ == civ) {
                Some(i) => i,
                None => {
                    player_rows.push(CivReportRow::new(&player.name, civ));
                    player_rows.len() - 1
                }
            };
            player_rows[index].record(entry.outcome(), mode);
        }

        rows.extend(player_rows);
    }

    rows
}

pub fn to_csv(rows: &[CivReportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(["player", "civ", "wins", "losses", "custom", "total", "mode"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// `YYYYMMDD_<player1>_<player2>....csv`
pub fn report_file_name(date: NaiveDate, players: &[String]) -> String {
    format!("{}_{}.csv", date.format("%Y%m%d"), players.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Participant;

    fn strings() -> StringTable {
        StringTable::from_value(&serde_json::json!({
            "civ": [
                {"id": 1, "string": "Britons"},
                {"id": 2, "string": "Franks"}
            ],
            "game_type": [{"id": 0, "string": "Random Map"}]
        }))
    }

    fn game(profile_id: i64, civ: i64, won: Option<bool>) -> MatchRecord {
        MatchRecord {
            match_id: None,
            game_type: Some(0),
            leaderboard_id: Some(3),
            ranked: Some(true),
            participants: vec![
                Participant {
                    profile_id: Some(999),
                    name: Some("opponent".to_string()),
                    civ: Some(1),
                    won: won.map(|w| !w),
                },
                Participant {
                    profile_id: Some(profile_id),
                    name: None,
                    civ: Some(civ),
                    won,
                },
            ],
        }
    }

    fn history(name: &str, profile_id: i64, matches: Vec<MatchRecord>) -> PlayerHistory {
        PlayerHistory {
            name: name.to_string(),
            profile_id,
            matches,
        }
    }

    #[test]
    fn test_one_row_per_player() {
        let players = vec![
            history("a", 1, vec![game(1, 2, Some(true)), game(1, 2, Some(false))]),
            history("b", 2, vec![game(2, 2, Some(false)), game(2, 2, Some(true))]),
        ];
        let rows = build_civ_report(&players, &strings());

        assert_eq!(rows.len(), 2);
        for (row, player) in rows.iter().zip(["a", "b"]) {
            assert_eq!(row.player, player);
            assert_eq!(row.civ, "Franks");
            assert_eq!((row.wins, row.losses, row.undetermined, row.total), (1, 1, 0, 2));
        }
    }

    #[test]
    fn test_first_seen_civ_order() {
        let players = vec![history(
            "a",
            1,
            vec![
                game(1, 2, Some(true)),
                game(1, 1, None),
                game(1, 2, Some(true)),
            ],
        )];
        let rows = build_civ_report(&players, &strings());

        let civs: Vec<&str> = rows.iter().map(|r| r.civ.as_str()).collect();
        assert_eq!(civs, ["Franks", "Britons"]);
        assert_eq!(rows[0].wins, 2);
        assert_eq!(rows[1].undetermined, 1);
        assert_eq!(rows[1].mode.as_deref(), Some("Random Map"));
    }

    #[test]
    fn test_unknown_civ_skipped() {
        let players = vec![history("a", 1, vec![game(1, 77, Some(true))])];
        assert!(build_civ_report(&players, &strings()).is_empty());
    }

    #[test]
    fn test_match_without_player_skipped() {
        let players = vec![history("a", 5, vec![game(1, 2, Some(true))])];
        assert!(build_civ_report(&players, &strings()).is_empty());
    }

    #[test]
    fn test_csv_output() {
        let players = vec![history("GL.TheViper", 1, vec![game(1, 1, Some(true))])];
        let rows = build_civ_report(&players, &strings());
        let csv = String::from_utf8(to_csv(&rows).unwrap()).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("player,civ,wins,losses,custom,total,mode")
        );
        assert_eq!(lines.next(), Some("GL.TheViper,Britons,1,0,0,1,Random Map"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_csv_has_header() {
        let csv = String::from_utf8(to_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "player,civ,wins,losses,custom,total,mode\n");
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        let players = vec!["GL.TheViper".to_string(), "[aM] Liereyy".to_string()];
        assert_eq!(
            report_file_name(date, &players),
            "20210307_GL.TheViper_[aM] Liereyy.csv"
        );
    }
}
