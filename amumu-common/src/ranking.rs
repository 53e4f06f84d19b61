use ::errors::*;

use chrono::{DateTime, Utc};

use model::{self, MemberId, Position};

use std::collections::{BTreeMap, HashSet, VecDeque};

pub const WIN_RATING: i64 = 10;
pub const LOSS_RATING: i64 = -7;
pub const MATCH_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Winner
{
    Blue,
    Red,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct Participant
{
    pub id: MemberId,
    pub name: String,
    #[serde(deserialize_with = "model::position_by_name")]
    pub position: Position,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchResult
{
    pub match_name: String,
    pub blue_team: Vec<Participant>,
    pub red_team: Vec<Participant>,
    pub winner: Winner,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchRecord
{
    pub result: MatchResult,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MemberRanking
{
    pub member_id: MemberId,
    pub name: String,
    pub rating: i64,
    pub wins: u32,
    pub losses: u32,
    pub total_matches: u32,
}

impl MemberRanking
{
    pub fn new<S>(member_id: MemberId, name: S) -> MemberRanking
        where S: Into<String>
    {
        MemberRanking {
            member_id,
            name: name.into(),
            rating: 0,
            wins: 0,
            losses: 0,
            total_matches: 0,
        }
    }

    /// Percentage rounded to one decimal, 0 before the first match
    pub fn win_rate(&self) -> f64
    {
        if self.total_matches == 0
        {
            return 0.0;
        }

        let rate = f64::from(self.wins) / f64::from(self.total_matches) * 100.0;
        (rate * 10.0).round() / 10.0
    }

    fn record(&mut self, won: bool)
    {
        if won
        {
            self.rating += WIN_RATING;
            self.wins += 1;
        } else
        {
            self.rating += LOSS_RATING;
            self.losses += 1;
        }

        self.total_matches += 1;
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct RankingEntry
{
    pub member_id: MemberId,
    pub name: String,
    pub rating: i64,
    pub wins: u32,
    pub losses: u32,
    pub total_matches: u32,
    pub win_rate: f64,
}

/// In-house ratings for the members playing the custom games
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RatingLedger
{
    rankings: BTreeMap<MemberId, MemberRanking>,
    matches: VecDeque<MatchRecord>,
}

impl RatingLedger
{
    pub fn new() -> RatingLedger
    {
        RatingLedger::default()
    }

    pub fn register<S>(&mut self, member_id: MemberId, name: S)
        where S: Into<String>
    {
        let name = name.into();
        self.rankings.entry(member_id)
            .or_insert_with(|| MemberRanking::new(member_id, name));
    }

    pub fn ranking(&self, member_id: MemberId) -> Option<&MemberRanking>
    {
        self.rankings.get(&member_id)
    }

    /// Winners gain `WIN_RATING`, losers get `LOSS_RATING`. Members seen for the first time start at 0.
    pub fn record_match(&mut self, result: MatchResult, played_at: DateTime<Utc>) -> Result<()>
    {
        check_match_result(&result)?;

        let blue_won = result.winner == Winner::Blue;

        for (participant, won) in result.blue_team.iter().map(|p| (p, blue_won))
            .chain(result.red_team.iter().map(|p| (p, !blue_won)))
        {
            let ranking = self.rankings.entry(participant.id)
                .or_insert_with(|| MemberRanking::new(participant.id, participant.name.as_str()));
            ranking.record(won);

            trace!("{} ({}) now at rating: {}", ranking.name, ranking.member_id, ranking.rating);
        }

        info!("Recorded match: {:?}, winner: {:?}", result.match_name, result.winner);

        self.matches.push_front(MatchRecord::new(result, played_at));
        self.matches.truncate(MATCH_HISTORY_LIMIT);

        Ok(())
    }

    /// Most recent first
    pub fn recent_matches(&self) -> Vec<&MatchRecord>
    {
        self.matches.iter().collect()
    }

    /// Highest rating first, ties broken by name
    pub fn leaderboard(&self) -> Vec<RankingEntry>
    {
        let mut rankings: Vec<&MemberRanking> = self.rankings.values().collect();
        rankings.sort_by(|a, b| b.rating.cmp(&a.rating)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.member_id.cmp(&b.member_id)));

        rankings.into_iter()
            .map(|ranking| RankingEntry::new(ranking.member_id,
                                             ranking.name.clone(),
                                             ranking.rating,
                                             ranking.wins,
                                             ranking.losses,
                                             ranking.total_matches,
                                             ranking.win_rate()))
            .collect()
    }
}

fn check_match_result(result: &MatchResult) -> Result<()>
{
    if result.blue_team.is_empty() || result.red_team.is_empty()
    {
        bail!(ErrorKind::InvalidMatchResult(format!("blue: {} or red: {} has no players", result.blue_team.len(), result.red_team.len())));
    }

    let mut seen: HashSet<MemberId> = HashSet::new();
    for participant in result.blue_team.iter().chain(result.red_team.iter())
    {
        if !seen.insert(participant.id)
        {
            bail!(ErrorKind::InvalidMatchResult(format!("player id: {} is listed more than once", participant.id)));
        }
    }

    Ok(())
}
