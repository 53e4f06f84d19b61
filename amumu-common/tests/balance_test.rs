extern crate amumu_common;

use amumu_common::balance::{self, ROSTER_SIZE, TEAM_SIZE};
use amumu_common::errors::ErrorKind;
use amumu_common::model::{MemberId, Player, Position, ScoredPlayer, POSITIONS};
use amumu_common::rank::{QueueRank, Score, Tier};

use std::collections::HashSet;

/// Unranked with `score` LP on both ladders scores exactly `score`
fn player(id: MemberId, score: u32) -> Player
{
    let rank = QueueRank::new(Tier::Unranked, None, score);
    Player::new(id, format!("player{}", id), rank.clone(), rank, Vec::new(), Vec::new())
}

fn scored(id: MemberId, score: Score) -> ScoredPlayer
{
    ScoredPlayer::new(player(id, 0), score)
}

fn with_positions(id: MemberId, preferred: Vec<Position>, avoided: Vec<Position>) -> Player
{
    let mut player = player(id, 0);
    player.preferred_positions = preferred;
    player.avoided_positions = avoided;
    player
}

fn ids(team: &[ScoredPlayer]) -> Vec<MemberId>
{
    team.iter().map(|scored| scored.player.id).collect()
}

fn assert_bijection(assigned: &[Option<Position>])
{
    assert_eq!(assigned.len(), POSITIONS.len());

    let unique: HashSet<Position> = assigned.iter().map(|position| position.unwrap()).collect();
    assert_eq!(unique.len(), POSITIONS.len(), "{:?}", assigned);
}

#[test]
fn test_split_balances_descending_scores()
{
    let scores = [900, 1500, 600, 1300, 1100, 700, 1400, 1000, 1200, 800];
    let players = scores.iter().enumerate().map(|(id, score)| scored(id as MemberId, *score)).collect();

    let (blue, red) = balance::split_teams(players).unwrap();

    let blue_scores: Vec<Score> = blue.iter().map(|scored| scored.score).collect();
    let red_scores: Vec<Score> = red.iter().map(|scored| scored.score).collect();

    assert_eq!(blue_scores, vec![1500, 1200, 1100, 800, 700]);
    assert_eq!(red_scores, vec![1400, 1300, 1000, 900, 600]);
}

#[test]
fn test_split_partitions_roster()
{
    let players = (0..ROSTER_SIZE as MemberId).map(|id| scored(id, (id as Score * 37) % 11 * 100)).collect();

    let (blue, red) = balance::split_teams(players).unwrap();

    assert_eq!(blue.len(), TEAM_SIZE);
    assert_eq!(red.len(), TEAM_SIZE);

    let mut all: Vec<MemberId> = ids(&blue);
    all.extend(ids(&red));
    all.sort();
    assert_eq!(all, (0..ROSTER_SIZE as MemberId).collect::<Vec<MemberId>>());
}

#[test]
fn test_split_ties_keep_input_order()
{
    let players = (0..ROSTER_SIZE as MemberId).map(|id| scored(id, 1000)).collect();

    let (blue, red) = balance::split_teams(players).unwrap();

    assert_eq!(ids(&blue), vec![0, 2, 4, 6, 8]);
    assert_eq!(ids(&red), vec![1, 3, 5, 7, 9]);
}

#[test]
fn test_split_isolates_outlier()
{
    let players = (0..ROSTER_SIZE as MemberId)
        .map(|id| scored(id, if id == 3 { 5000 } else { 1000 }))
        .collect();

    let (blue, red) = balance::split_teams(players).unwrap();

    assert_eq!(blue.len(), TEAM_SIZE);
    assert_eq!(red.len(), TEAM_SIZE);
    assert_eq!(blue[0].player.id, 3);

    /* The strongest player's team gets the last picks, not the next best ones */
    assert_eq!(ids(&red), vec![0, 1, 2, 4, 5]);
    assert_eq!(ids(&blue), vec![3, 6, 7, 8, 9]);

    let blue_score: Score = blue.iter().map(|scored| scored.score).sum();
    let red_score: Score = red.iter().map(|scored| scored.score).sum();

    /* 5000 + four others is the best any split can do */
    assert_eq!((blue_score - red_score).abs(), 4000);
}

#[test]
fn test_split_rejects_wrong_roster_size()
{
    for size in [0usize, 9, 11].iter()
    {
        let players = (0..*size as MemberId).map(|id| scored(id, 1000)).collect();

        match balance::split_teams(players)
        {
            Err(error) => match *error.kind()
            {
                ErrorKind::InvalidRosterSize(found) => assert_eq!(found, *size),
                ref kind => panic!("Unexpected error: {:?}", kind),
            },
            Ok(_) => panic!("Roster of {} should be rejected", size),
        }
    }
}

#[test]
fn test_taken_preference_falls_to_next_preference()
{
    let first = with_positions(0, vec![Position::Jungle], Vec::new());
    let second = with_positions(1, vec![Position::Jungle, Position::Top], Vec::new());
    let rest: Vec<Player> = (2..5).map(|id| player(id, 0)).collect();

    let team: Vec<&Player> = vec![&first, &second, &rest[0], &rest[1], &rest[2]];
    let assigned = balance::assign_positions(&team, &POSITIONS);

    assert_eq!(assigned, vec![
        Some(Position::Jungle),
        Some(Position::Top),
        Some(Position::Middle),
        Some(Position::Bottom),
        Some(Position::Utility),
    ]);
}

#[test]
fn test_forfeited_preference_waits_for_second_pass()
{
    let first = with_positions(0, vec![Position::Middle], Vec::new());
    let second = with_positions(1, vec![Position::Middle], Vec::new());
    let third = with_positions(2, vec![Position::Top], Vec::new());
    let rest: Vec<Player> = (3..5).map(|id| player(id, 0)).collect();

    let team: Vec<&Player> = vec![&first, &second, &third, &rest[0], &rest[1]];
    let assigned = balance::assign_positions(&team, &POSITIONS);

    /* TOP goes to the third player in the first pass before the second player gets another look */
    assert_eq!(assigned, vec![
        Some(Position::Middle),
        Some(Position::Jungle),
        Some(Position::Top),
        Some(Position::Bottom),
        Some(Position::Utility),
    ]);
}

#[test]
fn test_avoided_positions_are_skipped()
{
    let picky = with_positions(0, Vec::new(), vec![Position::Top, Position::Jungle]);
    let rest: Vec<Player> = (1..5).map(|id| player(id, 0)).collect();

    let team: Vec<&Player> = vec![&picky, &rest[0], &rest[1], &rest[2], &rest[3]];
    let assigned = balance::assign_positions(&team, &POSITIONS);

    assert_eq!(assigned, vec![
        Some(Position::Middle),
        Some(Position::Top),
        Some(Position::Jungle),
        Some(Position::Bottom),
        Some(Position::Utility),
    ]);
}

#[test]
fn test_avoided_position_forced_when_only_one_left()
{
    let top = with_positions(0, vec![Position::Top], Vec::new());
    let jungle = with_positions(1, vec![Position::Jungle], Vec::new());
    let middle = with_positions(2, vec![Position::Middle], Vec::new());
    let bottom = with_positions(3, vec![Position::Bottom], Vec::new());
    let no_support = with_positions(4, Vec::new(), vec![Position::Utility]);

    let team: Vec<&Player> = vec![&top, &jungle, &middle, &bottom, &no_support];
    let assigned = balance::assign_positions(&team, &POSITIONS);

    assert_eq!(assigned[4], Some(Position::Utility));
    assert_bijection(&assigned);
}

#[test]
fn test_assignment_is_always_a_bijection()
{
    let patterns: Vec<(Vec<Position>, Vec<Position>)> = vec![
        (vec![Position::Utility], Vec::new()),
        (vec![Position::Utility, Position::Middle], vec![Position::Top]),
        (Vec::new(), vec![Position::Top, Position::Jungle, Position::Middle, Position::Bottom, Position::Utility]),
        (vec![Position::Top, Position::Top], Vec::new()),
        (Vec::new(), Vec::new()),
        (vec![Position::Bottom], vec![Position::Utility]),
    ];

    for offset in 0..patterns.len()
    {
        let team: Vec<Player> = (0..TEAM_SIZE)
            .map(|index| {
                let (ref preferred, ref avoided) = patterns[(index + offset) % patterns.len()];
                with_positions(index as MemberId, preferred.clone(), avoided.clone())
            })
            .collect();

        let refs: Vec<&Player> = team.iter().collect();
        assert_bijection(&balance::assign_positions(&refs, &POSITIONS));
    }
}

#[test]
fn test_more_players_than_positions()
{
    let players: Vec<Player> = (0..6).map(|id| player(id, 0)).collect();
    let team: Vec<&Player> = players.iter().collect();

    let assigned = balance::assign_positions(&team, &POSITIONS);

    assert_eq!(assigned.len(), 6);
    assert_eq!(assigned[..5].iter().filter(|position| position.is_some()).count(), 5);
    assert_eq!(assigned[5], None);
}

#[test]
fn test_balance_teams_full_pipeline()
{
    let mut players: Vec<Player> = (0..ROSTER_SIZE as MemberId).map(|id| player(id, 1000 + id as u32 * 100)).collect();
    players[9].preferred_positions = vec![Position::Utility];
    players[8].preferred_positions = vec![Position::Utility, Position::Jungle];

    let balanced = balance::balance_teams(players).unwrap();

    assert_eq!(balanced.blue.members.len(), TEAM_SIZE);
    assert_eq!(balanced.red.members.len(), TEAM_SIZE);
    assert_eq!(balanced.blue.score, balanced.blue.members.iter().map(|member| member.score).sum::<Score>());
    assert_eq!(balanced.red.score, balanced.red.members.iter().map(|member| member.score).sum::<Score>());
    assert_eq!(balanced.score_difference, (balanced.blue.score - balanced.red.score).abs());
    assert_eq!(balanced.score_difference, 100);

    /* Highest scores land on different teams so both get their first pick */
    assert_eq!(balanced.blue.members[0].player.id, 9);
    assert_eq!(balanced.blue.members[0].position, Position::Utility);
    assert_eq!(balanced.red.members[0].player.id, 8);
    assert_eq!(balanced.red.members[0].position, Position::Utility);

    for team in [&balanced.blue, &balanced.red].iter()
    {
        let positions: HashSet<Position> = team.members.iter().map(|member| member.position).collect();
        assert_eq!(positions.len(), POSITIONS.len());
    }
}

#[test]
fn test_balance_teams_is_deterministic()
{
    let players: Vec<Player> = (0..ROSTER_SIZE as MemberId)
        .map(|id| with_positions(id, vec![POSITIONS[id as usize % 5]], vec![POSITIONS[(id as usize + 2) % 5]]))
        .collect();

    let first = balance::balance_teams(players.clone()).unwrap();
    let second = balance::balance_teams(players).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_balance_teams_rejects_duplicates()
{
    let mut players: Vec<Player> = (0..ROSTER_SIZE as MemberId).map(|id| player(id, 1000)).collect();
    players[7].id = 2;

    match balance::balance_teams(players)
    {
        Err(error) => match *error.kind()
        {
            ErrorKind::DuplicatePlayer(id) => assert_eq!(id, 2),
            ref kind => panic!("Unexpected error: {:?}", kind),
        },
        Ok(_) => panic!("Duplicate player should be rejected"),
    }
}

#[test]
fn test_balance_teams_rejects_short_roster()
{
    let players: Vec<Player> = (0..4).map(|id| player(id, 1000)).collect();

    match balance::balance_teams(players)
    {
        Err(error) => match *error.kind()
        {
            ErrorKind::InvalidRosterSize(found) => assert_eq!(found, 4),
            ref kind => panic!("Unexpected error: {:?}", kind),
        },
        Ok(_) => panic!("Short roster should be rejected"),
    }
}
