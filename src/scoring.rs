//! Matchup scoring, standings, and rankings.

use std::cmp::Ordering;
use std::io::BufRead;
use std::str::FromStr;

use crate::chain_map::ChainMap;
use crate::error::BlottoError;
use crate::roster::Roster;

/// Which rate the final ranking orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Wins per game played, ties worth half a win each.
    Win,
    /// Accumulated battlefield score per game played.
    Score,
}

impl FromStr for Mode {
    type Err = BlottoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Mode::Win),
            "score" => Ok(Mode::Score),
            other => Err(BlottoError::InvalidMode(other.to_string())),
        }
    }
}

/// One scheduled match between two players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub home: String,
    pub away: String,
}

/// Read one matchup per line: exactly two whitespace-separated ids.
/// Blank lines and lines with any other shape are malformed; an input with
/// no matchups at all is an error.
pub fn parse_matchups<R: BufRead>(reader: R) -> Result<Vec<Matchup>, BlottoError> {
    let mut matchups = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(home), Some(away), None) => matchups.push(Matchup {
                home: home.to_string(),
                away: away.to_string(),
            }),
            _ => return Err(BlottoError::MalformedMatchup(line)),
        }
    }
    if matchups.is_empty() {
        return Err(BlottoError::EmptyMatchups);
    }
    Ok(matchups)
}

/// Compare two distributions battlefield by battlefield: a strict winner
/// takes that battlefield's weight, a tie splits it evenly.
pub fn score_battlefields(a: &[u32], b: &[u32], weights: &[f64]) -> (f64, f64) {
    let mut score_a = 0.0;
    let mut score_b = 0.0;
    for ((&x, &y), &w) in a.iter().zip(b).zip(weights) {
        match x.cmp(&y) {
            Ordering::Greater => score_a += w,
            Ordering::Less => score_b += w,
            Ordering::Equal => {
                score_a += w / 2.0;
                score_b += w / 2.0;
            }
        }
    }
    (score_a, score_b)
}

/// Per-player accumulator across all of a player's matches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Standing {
    pub wins: f64,
    pub games: u32,
    pub total_score: f64,
}

impl Standing {
    fn record(&mut self, score: f64, wins: f64) {
        self.games += 1;
        self.wins += wins;
        self.total_score += score;
    }

    pub fn win_rate(&self) -> f64 {
        self.wins / f64::from(self.games)
    }

    pub fn average_score(&self) -> f64 {
        self.total_score / f64::from(self.games)
    }
}

/// A configured tournament: a roster plus one positive weight per
/// battlefield.
#[derive(Debug)]
pub struct Tournament<'a> {
    roster: &'a Roster,
    weights: &'a [f64],
}

impl<'a> Tournament<'a> {
    pub fn new(roster: &'a Roster, weights: &'a [f64]) -> Result<Self, BlottoError> {
        if weights.len() != roster.battlefields() {
            return Err(BlottoError::WeightCount {
                expected: roster.battlefields(),
                actual: weights.len(),
            });
        }
        if let Some(&bad) = weights.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            return Err(BlottoError::InvalidWeight(bad));
        }
        Ok(Self { roster, weights })
    }

    /// Score every matchup and accumulate standings. Both ids of every
    /// matchup must be on the roster; standings exist only for players that
    /// actually played.
    pub fn play(&self, matchups: &[Matchup]) -> Result<Standings, BlottoError> {
        let mut table: ChainMap<String, Standing> = ChainMap::new();

        for matchup in matchups {
            let home = self
                .roster
                .distribution(&matchup.home)
                .ok_or_else(|| BlottoError::UnknownPlayer(matchup.home.clone()))?;
            let away = self
                .roster
                .distribution(&matchup.away)
                .ok_or_else(|| BlottoError::UnknownPlayer(matchup.away.clone()))?;

            let (home_score, away_score) = score_battlefields(home, away, self.weights);
            let (home_wins, away_wins) = match home_score.total_cmp(&away_score) {
                Ordering::Greater => (1.0, 0.0),
                Ordering::Less => (0.0, 1.0),
                Ordering::Equal => (0.5, 0.5),
            };
            tracing::debug!(
                home = %matchup.home,
                away = %matchup.away,
                home_score,
                away_score,
                "matchup scored"
            );

            record(&mut table, &matchup.home, home_score, home_wins);
            record(&mut table, &matchup.away, away_score, away_wins);
        }

        Ok(Standings { table })
    }
}

fn record(table: &mut ChainMap<String, Standing>, id: &str, score: f64, wins: f64) {
    if !table.contains_key(id) {
        table.put(id, Standing::default());
    }
    if let Some(standing) = table.get_mut(id) {
        standing.record(score, wins);
    }
}

/// Accumulated results for every player that appeared in a matchup.
#[derive(Debug)]
pub struct Standings {
    table: ChainMap<String, Standing>,
}

impl Standings {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Standing> {
        self.table.get(id)
    }

    /// Rank every player descending by the mode's rate, ties broken by
    /// ascending id.
    pub fn rankings(&self, mode: Mode) -> Vec<Ranking> {
        let mut rows: Vec<Ranking> = self
            .table
            .iter()
            .map(|(id, standing)| Ranking {
                id: id.clone(),
                rate: match mode {
                    Mode::Win => standing.win_rate(),
                    Mode::Score => standing.average_score(),
                },
            })
            .collect();
        rows.sort_by(|a, b| b.rate.total_cmp(&a.rate).then_with(|| a.id.cmp(&b.id)));
        rows
    }
}

/// One line of the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub id: String,
    pub rate: f64,
}

impl Ranking {
    /// Fixed-width decimal followed by the id, e.g. `  0.750 alice`.
    pub fn report_row(&self) -> String {
        format!("{:7.3} {}", self.rate, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roster(input: &str, battlefields: usize) -> Roster {
        Roster::parse(Cursor::new(input.as_bytes()), battlefields).unwrap()
    }

    #[test]
    fn mode_parses_win_and_score_only() {
        assert_eq!("win".parse::<Mode>().unwrap(), Mode::Win);
        assert_eq!("score".parse::<Mode>().unwrap(), Mode::Score);
        assert!(matches!(
            "wins".parse::<Mode>().unwrap_err(),
            BlottoError::InvalidMode(_)
        ));
    }

    #[test]
    fn matchups_parse_two_ids_per_line() {
        let parsed = parse_matchups(Cursor::new(b"a b\nb  c\n")).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].home, "a");
        assert_eq!(parsed[1].away, "c");
    }

    #[test]
    fn matchups_reject_blank_and_malformed_lines() {
        for bad in ["a\n", "a b c\n", "\na b\n", "a b\n\n"] {
            let err = parse_matchups(Cursor::new(bad.as_bytes())).unwrap_err();
            assert!(matches!(err, BlottoError::MalformedMatchup(_)), "{bad:?}");
        }
        assert!(matches!(
            parse_matchups(Cursor::new(b"")).unwrap_err(),
            BlottoError::EmptyMatchups
        ));
    }

    #[test]
    fn battlefield_scoring_splits_ties() {
        // Battlefield 1: strict win for a; battlefield 2: tie.
        let (a, b) = score_battlefields(&[3, 1], &[2, 1], &[1.0, 1.0]);
        assert_eq!(a, 1.5);
        assert_eq!(b, 0.5);

        // Weights scale per battlefield.
        let (a, b) = score_battlefields(&[0, 5], &[5, 0], &[2.0, 3.0]);
        assert_eq!(a, 3.0);
        assert_eq!(b, 2.0);
    }

    #[test]
    fn tournament_rejects_bad_weights() {
        let roster = roster("a 1 1\nb 2 0\n", 2);
        assert!(matches!(
            Tournament::new(&roster, &[1.0]).unwrap_err(),
            BlottoError::WeightCount {
                expected: 2,
                actual: 1
            }
        ));
        for bad in [[1.0, 0.0], [1.0, -2.0], [1.0, f64::NAN], [1.0, f64::INFINITY]] {
            assert!(matches!(
                Tournament::new(&roster, &bad).unwrap_err(),
                BlottoError::InvalidWeight(_)
            ));
        }
    }

    #[test]
    fn play_rejects_unknown_players() {
        let roster = roster("a 1 1\nb 2 0\n", 2);
        let tournament = Tournament::new(&roster, &[1.0, 1.0]).unwrap();
        let matchups = [Matchup {
            home: "a".to_string(),
            away: "ghost".to_string(),
        }];
        assert!(matches!(
            tournament.play(&matchups).unwrap_err(),
            BlottoError::UnknownPlayer(id) if id == "ghost"
        ));
    }

    #[test]
    fn standings_accumulate_across_matches() {
        let roster = roster("a 3 1\nb 2 1\nc 0 4\n", 2);
        let tournament = Tournament::new(&roster, &[1.0, 1.0]).unwrap();
        let matchups = parse_matchups(Cursor::new(b"a b\na c\n")).unwrap();
        let standings = tournament.play(&matchups).unwrap();

        // a beat b 1.5 - 0.5, then tied c 1.0 - 1.0.
        let a = standings.get("a").unwrap();
        assert_eq!(a.games, 2);
        assert_eq!(a.wins, 1.5);
        assert_eq!(a.total_score, 2.5);

        let b = standings.get("b").unwrap();
        assert_eq!(b.games, 1);
        assert_eq!(b.wins, 0.0);
        assert_eq!(b.total_score, 0.5);

        let c = standings.get("c").unwrap();
        assert_eq!(c.games, 1);
        assert_eq!(c.wins, 0.5);
        assert_eq!(c.total_score, 1.0);
    }

    #[test]
    fn rankings_order_by_rate_then_id() {
        let roster = roster("a 3 1\nb 2 1\nc 0 4\n", 2);
        let tournament = Tournament::new(&roster, &[1.0, 1.0]).unwrap();
        let matchups = parse_matchups(Cursor::new(b"a b\na c\n")).unwrap();
        let standings = tournament.play(&matchups).unwrap();

        let by_win: Vec<(String, f64)> = standings
            .rankings(Mode::Win)
            .into_iter()
            .map(|r| (r.id, r.rate))
            .collect();
        assert_eq!(
            by_win,
            [
                ("a".to_string(), 0.75),
                ("c".to_string(), 0.5),
                ("b".to_string(), 0.0)
            ]
        );

        let by_score: Vec<(String, f64)> = standings
            .rankings(Mode::Score)
            .into_iter()
            .map(|r| (r.id, r.rate))
            .collect();
        assert_eq!(
            by_score,
            [
                ("a".to_string(), 1.25),
                ("c".to_string(), 1.0),
                ("b".to_string(), 0.5)
            ]
        );
    }

    #[test]
    fn equal_rates_break_ties_by_ascending_id() {
        let roster = roster("zed 1 1\nann 1 1\n", 2);
        let tournament = Tournament::new(&roster, &[1.0, 1.0]).unwrap();
        let matchups = parse_matchups(Cursor::new(b"zed ann\n")).unwrap();
        let standings = tournament.play(&matchups).unwrap();

        let ids: Vec<String> = standings
            .rankings(Mode::Win)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["ann", "zed"]);
    }

    #[test]
    fn unmatched_players_have_no_standing() {
        let roster = roster("a 1 1\nb 2 0\nc 0 2\n", 2);
        let tournament = Tournament::new(&roster, &[1.0, 1.0]).unwrap();
        let matchups = parse_matchups(Cursor::new(b"a b\n")).unwrap();
        let standings = tournament.play(&matchups).unwrap();
        assert_eq!(standings.len(), 2);
        assert!(standings.get("c").is_none());
    }

    #[test]
    fn report_rows_are_fixed_width() {
        let row = Ranking {
            id: "alice".to_string(),
            rate: 0.75,
        };
        assert_eq!(row.report_row(), "  0.750 alice");
        let row = Ranking {
            id: "bob".to_string(),
            rate: 12.0,
        };
        assert_eq!(row.report_row(), " 12.000 bob");
    }
}
