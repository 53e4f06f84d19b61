use balance::{BalancedMatch, TeamMember};
use model::{MemberId, Player, Position};
use rank::Score;
use ranking::{MatchResult, RankingEntry};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request
{
    Balance { players: Vec<Player> },
    MatchResult(MatchResult),
    Rankings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response
{
    Balance(BalanceResponse),
    Rankings { rankings: Vec<RankingEntry> },
    Error { message: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct AssignedMember
{
    pub id: MemberId,
    pub name: String,
    pub score: Score,
    pub position: Position,
}

impl<'a> From<&'a TeamMember> for AssignedMember
{
    fn from(member: &'a TeamMember) -> AssignedMember
    {
        AssignedMember::new(member.player.id, member.player.name.clone(), member.score, member.position)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct BalanceResponse
{
    pub blue_team: Vec<AssignedMember>,
    pub red_team: Vec<AssignedMember>,
    pub blue_score: Score,
    pub red_score: Score,
    pub score_difference: Score,
}

impl From<BalancedMatch> for BalanceResponse
{
    fn from(balanced: BalancedMatch) -> BalanceResponse
    {
        BalanceResponse::new(balanced.blue.members.iter().map(AssignedMember::from).collect(),
                             balanced.red.members.iter().map(AssignedMember::from).collect(),
                             balanced.blue.score,
                             balanced.red.score,
                             balanced.score_difference)
    }
}
