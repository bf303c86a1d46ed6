use serde::Deserialize;

/// Leaderboards exposed by aoe2.net, keyed by their numeric id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LeaderboardKind {
    Unranked,
    Deathmatch,
    TeamDeathmatch,
    #[default]
    RandomMap,
    TeamRandomMap,
    EmpireWars,
    TeamEmpireWars,
}

impl LeaderboardKind {
    pub const ALL: [LeaderboardKind; 7] = [
        Self::Unranked,
        Self::Deathmatch,
        Self::TeamDeathmatch,
        Self::RandomMap,
        Self::TeamRandomMap,
        Self::EmpireWars,
        Self::TeamEmpireWars,
    ];

    pub fn id(self) -> i64 {
        match self {
            Self::Unranked => 0,
            Self::Deathmatch => 1,
            Self::TeamDeathmatch => 2,
            Self::RandomMap => 3,
            Self::TeamRandomMap => 4,
            Self::EmpireWars => 13,
            Self::TeamEmpireWars => 14,
        }
    }

    /// Boards selected by the optional `elo` argument. Anything unrecognised
    /// means every board.
    pub fn for_selector(selector: &str) -> Vec<Self> {
        match selector.to_lowercase().as_str() {
            "unranked" => vec![Self::Unranked],
            "solo" => vec![Self::RandomMap],
            "team" => vec![Self::TeamRandomMap],
            _ => Self::ALL.to_vec(),
        }
    }
}

impl std::fmt::Display for LeaderboardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unranked => write!(f, "Unranked"),
            Self::Deathmatch => write!(f, "1v1 Deathmatch"),
            Self::TeamDeathmatch => write!(f, "Team Deathmatch"),
            Self::RandomMap => write!(f, "1v1 Random Map"),
            Self::TeamRandomMap => write!(f, "Team Random Map"),
            Self::EmpireWars => write!(f, "1v1 Empire Wars"),
            Self::TeamEmpireWars => write!(f, "Team Empire Wars"),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub name: String,
    pub profile_id: i64,
    pub rating: Option<i64>,
    pub steam_id: Option<String>,
    pub rank: Option<i64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    /// Not part of the payload; set to the board that was searched.
    #[serde(skip_deserializing)]
    pub kind: LeaderboardKind,
}

#[derive(Deserialize, Clone, Debug)]
pub struct MatchRecord {
    pub match_id: Option<String>,
    pub game_type: Option<i64>,
    pub leaderboard_id: Option<i64>,
    pub ranked: Option<bool>,
    #[serde(default, rename = "players")]
    pub participants: Vec<Participant>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Participant {
    pub profile_id: Option<i64>,
    pub name: Option<String>,
    pub civ: Option<i64>,
    /// `None` for custom or unfinished games.
    pub won: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Undetermined,
}

impl Participant {
    pub fn outcome(&self) -> Outcome {
        match self.won {
            Some(true) => Outcome::Win,
            Some(false) => Outcome::Loss,
            None => Outcome::Undetermined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaderboard_ids() {
        let ids: Vec<i64> = LeaderboardKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 13, 14]);
    }

    #[test]
    fn test_selector() {
        assert_eq!(
            LeaderboardKind::for_selector("SOLO"),
            vec![LeaderboardKind::RandomMap]
        );
        assert_eq!(
            LeaderboardKind::for_selector("team"),
            vec![LeaderboardKind::TeamRandomMap]
        );
        assert_eq!(
            LeaderboardKind::for_selector("unranked"),
            vec![LeaderboardKind::Unranked]
        );
        assert_eq!(LeaderboardKind::for_selector("all").len(), 7);
        assert_eq!(LeaderboardKind::for_selector("whatever").len(), 7);
    }

    #[test]
    fn test_deserialize_leaderboard() {
        let json = r#"{
            "total": 1, "leaderboard_id": 3, "start": 1, "count": 1,
            "leaderboard": [{
                "profile_id": 196240, "rank": 1, "rating": 2493,
                "steam_id": "76561198040356713", "name": "GL.TheViper",
                "wins": 1500, "losses": 400, "clan": null
            }]
        }"#;
        let resp: LeaderboardResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.leaderboard.len(), 1);
        let entry = &resp.leaderboard[0];
        assert_eq!(entry.name, "GL.TheViper");
        assert_eq!(entry.rating, Some(2493));
        assert_eq!(entry.kind, LeaderboardKind::RandomMap);
    }

    #[test]
    fn test_deserialize_match() {
        let json = r#"{
            "match_id": "1234", "game_type": 0, "leaderboard_id": 3,
            "ranked": true, "num_players": 2,
            "players": [
                {"profile_id": 1, "name": "a", "civ": 5, "won": true, "team": 1},
                {"profile_id": 2, "name": "b", "civ": 9, "won": null, "team": 2}
            ]
        }"#;
        let record: MatchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.participants.len(), 2);
        assert_eq!(record.participants[0].outcome(), Outcome::Win);
        assert_eq!(record.participants[1].outcome(), Outcome::Undetermined);
    }
}
