use serde::{Deserialize, Deserializer};

/// Points a player is worth. Sums and differences of team scores use the same type.
pub type Score = i64;

const SOLO_WEIGHT: f64 = 0.7;
const FLEX_WEIGHT: f64 = 0.3;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "String", rename_all = "UPPERCASE")]
pub enum Tier
{
    Unranked,
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier
{
    /// Unknown names are treated as `Unranked` instead of failing, rank data is often incomplete.
    pub fn from_name(name: &str) -> Tier
    {
        match name.trim().to_uppercase().as_str()
        {
            "IRON" => Tier::Iron,
            "BRONZE" => Tier::Bronze,
            "SILVER" => Tier::Silver,
            "GOLD" => Tier::Gold,
            "PLATINUM" => Tier::Platinum,
            "EMERALD" => Tier::Emerald,
            "DIAMOND" => Tier::Diamond,
            "MASTER" => Tier::Master,
            "GRANDMASTER" => Tier::Grandmaster,
            "CHALLENGER" => Tier::Challenger,
            "UNRANKED" | "" => Tier::Unranked,
            unknown =>
            {
                warn!("Unknown tier: {:?}, scoring it as unranked", unknown);
                Tier::Unranked
            },
        }
    }

    pub fn base_score(&self) -> Score
    {
        match *self
        {
            Tier::Unranked => 0,
            Tier::Iron => 100,
            Tier::Bronze => 500,
            Tier::Silver => 900,
            Tier::Gold => 1300,
            Tier::Platinum => 1700,
            Tier::Emerald => 2100,
            Tier::Diamond => 2500,
            Tier::Master => 2900,
            Tier::Grandmaster => 3200,
            Tier::Challenger => 3500,
        }
    }

    /// Only the ladder tiers between IRON and DIAMOND are split into divisions
    pub fn has_divisions(&self) -> bool
    {
        match *self
        {
            Tier::Unranked | Tier::Master | Tier::Grandmaster | Tier::Challenger => false,
            _ => true,
        }
    }
}

impl Default for Tier
{
    fn default() -> Tier
    {
        Tier::Unranked
    }
}

impl From<String> for Tier
{
    fn from(name: String) -> Tier
    {
        Tier::from_name(&name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Division
{
    #[serde(rename = "IV")]
    Four,
    #[serde(rename = "III")]
    Three,
    #[serde(rename = "II")]
    Two,
    #[serde(rename = "I")]
    One,
}

impl Division
{
    pub fn from_name(name: &str) -> Option<Division>
    {
        match name.trim().to_uppercase().as_str()
        {
            "IV" => Some(Division::Four),
            "III" => Some(Division::Three),
            "II" => Some(Division::Two),
            "I" => Some(Division::One),
            _ => None,
        }
    }

    pub fn offset(&self) -> Score
    {
        match *self
        {
            Division::Four => 0,
            Division::Three => 100,
            Division::Two => 200,
            Division::One => 300,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueType
{
    #[serde(rename = "RANKED_SOLO_5x5")]
    Solo,
    #[serde(rename = "RANKED_FLEX_SR")]
    Flex,
}

impl QueueType
{
    pub fn from_name(name: &str) -> Option<QueueType>
    {
        match name
        {
            "RANKED_SOLO_5x5" => Some(QueueType::Solo),
            "RANKED_FLEX_SR" => Some(QueueType::Flex),
            _ => None,
        }
    }
}

/// Where a player stands on one ranked ladder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default, new)]
pub struct QueueRank
{
    #[serde(default, deserialize_with = "lenient_tier")]
    pub tier: Tier,
    #[serde(default, deserialize_with = "lenient_division")]
    pub division: Option<Division>,
    #[serde(default, deserialize_with = "lenient_league_points")]
    pub league_points: u32,
}

impl QueueRank
{
    pub fn unranked() -> QueueRank
    {
        QueueRank::default()
    }

    /// Parses the raw strings handed out by the ladder API. Nothing here fails.
    pub fn from_names(tier: &str, division: &str, league_points: u32) -> QueueRank
    {
        QueueRank {
            tier: Tier::from_name(tier),
            division: Division::from_name(division),
            league_points,
        }
    }

    pub fn score(&self) -> Score
    {
        score(self.tier, self.division, self.league_points)
    }
}

/// Tier base + division offset + league points.
///
/// The division is ignored for tiers that aren't split into divisions and a missing division counts as 0.
pub fn score(tier: Tier, division: Option<Division>, league_points: u32) -> Score
{
    let division_offset = match division
    {
        Some(ref division) if tier.has_divisions() => division.offset(),
        _ => 0,
    };

    tier.base_score() + division_offset + Score::from(league_points)
}

/// Blend of both ladders, solo queue counts for 70%.
pub fn combined_score(solo: &QueueRank, flex: &QueueRank) -> Score
{
    let blended = solo.score() as f64 * SOLO_WEIGHT + flex.score() as f64 * FLEX_WEIGHT;

    blended.round() as Score
}

fn lenient_division<'de, D>(deserializer: D) -> ::std::result::Result<Option<Division>, D::Error>
    where D: Deserializer<'de>
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;

    Ok(raw.and_then(|name| Division::from_name(&name)))
}

/* Ladder data arrives with nulls for players who never placed, they count as unranked */

fn lenient_tier<'de, D>(deserializer: D) -> ::std::result::Result<Tier, D::Error>
    where D: Deserializer<'de>
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;

    Ok(raw.map(|name| Tier::from_name(&name)).unwrap_or_default())
}

fn lenient_league_points<'de, D>(deserializer: D) -> ::std::result::Result<u32, D::Error>
    where D: Deserializer<'de>
{
    let raw: Option<u32> = Deserialize::deserialize(deserializer)?;

    Ok(raw.unwrap_or(0))
}

pub(crate) fn lenient_rank<'de, D>(deserializer: D) -> ::std::result::Result<QueueRank, D::Error>
    where D: Deserializer<'de>
{
    let raw: Option<QueueRank> = Deserialize::deserialize(deserializer)?;

    Ok(raw.unwrap_or_else(QueueRank::unranked))
}
