use serde::de::{self, Deserialize, Deserializer};

use rank::{self, QueueRank, QueueType, Score};

use std::fmt;

pub type MemberId = u64;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position
{
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
}

/// Every team fills each of these exactly once. The order is the order left over positions get handed out in.
pub const POSITIONS: [Position; 5] = [
    Position::Top,
    Position::Jungle,
    Position::Middle,
    Position::Bottom,
    Position::Utility,
];

impl Position
{
    pub fn from_name(name: &str) -> Option<Position>
    {
        match name.trim().to_uppercase().as_str()
        {
            "TOP" => Some(Position::Top),
            "JUNGLE" => Some(Position::Jungle),
            "MIDDLE" | "MID" => Some(Position::Middle),
            "BOTTOM" | "ADC" => Some(Position::Bottom),
            "UTILITY" | "SUPPORT" => Some(Position::Utility),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str
    {
        match *self
        {
            Position::Top => "TOP",
            Position::Jungle => "JUNGLE",
            Position::Middle => "MIDDLE",
            Position::Bottom => "BOTTOM",
            Position::Utility => "UTILITY",
        }
    }
}

impl fmt::Display for Position
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "{}", self.name())
    }
}

/// One ladder entry as the vendor API reports it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry
{
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl LeagueEntry
{
    pub fn queue_rank(&self) -> QueueRank
    {
        QueueRank::from_names(&self.tier, &self.rank, self.league_points)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct Player
{
    pub id: MemberId,
    pub name: String,
    #[serde(default, deserialize_with = "rank::lenient_rank")]
    pub solo: QueueRank,
    #[serde(default, deserialize_with = "rank::lenient_rank")]
    pub flex: QueueRank,
    /// Most wanted first
    #[serde(default, deserialize_with = "lenient_positions")]
    pub preferred_positions: Vec<Position>,
    #[serde(default, deserialize_with = "lenient_positions")]
    pub avoided_positions: Vec<Position>,
}

impl Player
{
    /// Builds a player out of whatever ladder entries they have, the first solo and flex entries win.
    /// A ladder without an entry counts as unranked.
    pub fn from_entries<S>(id: MemberId, name: S, entries: &[LeagueEntry], preferred_positions: Vec<Position>, avoided_positions: Vec<Position>) -> Player
        where S: Into<String>
    {
        let mut solo = None;
        let mut flex = None;

        for entry in entries.iter()
        {
            match QueueType::from_name(&entry.queue_type)
            {
                Some(QueueType::Solo) if solo.is_none() => solo = Some(entry.queue_rank()),
                Some(QueueType::Flex) if flex.is_none() => flex = Some(entry.queue_rank()),
                Some(_) => {},
                None => trace!("Ignoring entry for queue: {}", entry.queue_type),
            }
        }

        Player {
            id,
            name: name.into(),
            solo: solo.unwrap_or_else(QueueRank::unranked),
            flex: flex.unwrap_or_else(QueueRank::unranked),
            preferred_positions,
            avoided_positions,
        }
    }

    pub fn score(&self) -> Score
    {
        rank::combined_score(&self.solo, &self.flex)
    }

    pub fn avoids(&self, position: Position) -> bool
    {
        self.avoided_positions.contains(&position)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct ScoredPlayer
{
    pub player: Player,
    pub score: Score,
}

impl ScoredPlayer
{
    pub fn from_player(player: Player) -> ScoredPlayer
    {
        let score = player.score();

        ScoredPlayer {
            player,
            score,
        }
    }
}

fn lenient_positions<'de, D>(deserializer: D) -> ::std::result::Result<Vec<Position>, D::Error>
    where D: Deserializer<'de>
{
    let raw: Option<Vec<String>> = Deserialize::deserialize(deserializer)?;

    let positions = raw.unwrap_or_default()
        .into_iter()
        .filter_map(|name| match Position::from_name(&name)
        {
            Some(position) => Some(position),
            None =>
            {
                warn!("Dropping unknown position: {:?}", name);
                None
            },
        })
        .collect();

    Ok(positions)
}

/// Same names and aliases as preference lists, but a position that must be filled can't be dropped
pub(crate) fn position_by_name<'de, D>(deserializer: D) -> ::std::result::Result<Position, D::Error>
    where D: Deserializer<'de>
{
    let name = String::deserialize(deserializer)?;

    Position::from_name(&name)
        .ok_or_else(|| de::Error::custom(format!("unknown position: {}", name)))
}
