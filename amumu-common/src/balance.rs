use ::errors::*;

use model::{MemberId, Player, Position, ScoredPlayer, POSITIONS};
use rank::Score;

use std::collections::HashSet;

pub const ROSTER_SIZE: usize = 10;
pub const TEAM_SIZE: usize = 5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct TeamMember
{
    pub player: Player,
    pub score: Score,
    pub position: Position,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct Team
{
    pub members: Vec<TeamMember>,
    pub score: Score,
}

/// Blue is the first team filled and wins every tie in the split
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct BalancedMatch
{
    pub blue: Team,
    pub red: Team,
    pub score_difference: Score,
}

/// Scores a roster of ten, splits it into two teams and hands each member a position.
pub fn balance_teams(players: Vec<Player>) -> Result<BalancedMatch>
{
    check_roster(&players)?;

    let scored: Vec<ScoredPlayer> = players.into_iter()
        .map(ScoredPlayer::from_player)
        .collect();

    let (blue, red) = split_teams(scored)?;

    let blue = build_team(blue)?;
    let red = build_team(red)?;
    let score_difference = (blue.score - red.score).abs();

    info!("Balanced teams - blue: {}, red: {}, difference: {}", blue.score, red.score, score_difference);

    Ok(BalancedMatch::new(blue, red, score_difference))
}

fn check_roster(players: &[Player]) -> Result<()>
{
    if players.len() != ROSTER_SIZE
    {
        bail!(ErrorKind::InvalidRosterSize(players.len()));
    }

    let mut seen: HashSet<MemberId> = HashSet::with_capacity(players.len());
    for player in players.iter()
    {
        if !seen.insert(player.id)
        {
            bail!(ErrorKind::DuplicatePlayer(player.id));
        }
    }

    Ok(())
}

/// Greedy split, highest score first. Each player goes to whichever team has the lower running total
/// (blue on ties) until one team is full, the rest fill the other.
///
/// Equal scores keep their input order, which is arbitrary but keeps the split deterministic.
pub fn split_teams(mut players: Vec<ScoredPlayer>) -> Result<(Vec<ScoredPlayer>, Vec<ScoredPlayer>)>
{
    if players.len() != ROSTER_SIZE
    {
        bail!(ErrorKind::InvalidRosterSize(players.len()));
    }

    /* sort_by is stable */
    players.sort_by(|a, b| b.score.cmp(&a.score));

    let mut blue: Vec<ScoredPlayer> = Vec::with_capacity(TEAM_SIZE);
    let mut red: Vec<ScoredPlayer> = Vec::with_capacity(TEAM_SIZE);
    let mut blue_score: Score = 0;
    let mut red_score: Score = 0;

    for player in players.into_iter()
    {
        if blue.len() < TEAM_SIZE && (red.len() == TEAM_SIZE || blue_score <= red_score)
        {
            trace!("{} ({}) -> blue", player.player.name, player.score);
            blue_score += player.score;
            blue.push(player);
        } else
        {
            trace!("{} ({}) -> red", player.player.name, player.score);
            red_score += player.score;
            red.push(player);
        }
    }

    debug!("Split teams - blue: {}, red: {}", blue_score, red_score);

    Ok((blue, red))
}

/// Hands out `positions` to the players of a team, in team order.
///
/// 1. Everyone gets their most wanted position that is still free. Earlier players win conflicts,
///    a player whose preferences are all taken gets nothing yet.
/// 2. Everyone still without a position gets the first free position they don't avoid,
///    or the first free one if they avoid all of them.
/// 3. Anyone left over takes whatever is free.
///
/// A slot is only `None` when there are more players than positions.
pub fn assign_positions(team: &[&Player], positions: &[Position]) -> Vec<Option<Position>>
{
    let mut available: Vec<Position> = positions.to_vec();
    let mut assigned: Vec<Option<Position>> = vec![None; team.len()];

    for (slot, player) in assigned.iter_mut().zip(team.iter())
    {
        let preferred = player.preferred_positions.iter()
            .filter_map(|position| available.iter().position(|free| free == position))
            .next();

        if let Some(index) = preferred
        {
            *slot = Some(available.remove(index));
        }
    }

    for (slot, player) in assigned.iter_mut().zip(team.iter())
    {
        if slot.is_some() || available.is_empty()
        {
            continue;
        }

        let index = match available.iter().position(|free| !player.avoids(*free))
        {
            Some(index) => index,
            None =>
            {
                debug!("{} avoids every free position, forcing {}", player.name, available[0]);
                0
            },
        };

        *slot = Some(available.remove(index));
    }

    for slot in assigned.iter_mut().filter(|slot| slot.is_none())
    {
        if available.is_empty()
        {
            break;
        }

        *slot = Some(available.remove(0));
    }

    assigned
}

fn build_team(players: Vec<ScoredPlayer>) -> Result<Team>
{
    let positions = {
        let team: Vec<&Player> = players.iter().map(|scored| &scored.player).collect();
        assign_positions(&team, &POSITIONS)
    };

    let mut members = Vec::with_capacity(players.len());
    let mut score = 0;

    for (scored, position) in players.into_iter().zip(positions.into_iter())
    {
        let position = position.ok_or(format!("No position left for player: {}", scored.player.name))?;

        score += scored.score;
        members.push(TeamMember::new(scored.player, scored.score, position));
    }

    Ok(Team::new(members, score))
}
