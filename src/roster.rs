//! Player roster: ids mapped to resource distributions.

use std::io::BufRead;

use crate::chain_map::ChainMap;
use crate::error::BlottoError;

/// Longest accepted player id, in bytes.
pub const MAX_ID_LEN: usize = 31;

/// The players of one tournament, keyed by id. Every distribution has the
/// same length, fixed at parse time by the battlefield count.
#[derive(Debug)]
pub struct Roster {
    players: ChainMap<String, Vec<u32>>,
    battlefields: usize,
}

impl Roster {
    /// Read `id n1 .. nk` lines until a blank line or end of input.
    ///
    /// Each line names a player once and allocates `battlefields`
    /// non-negative integers. Rejects duplicate ids, oversized ids, wrong
    /// arity, and non-integer allocations; an input with no players at all
    /// is also an error.
    pub fn parse<R: BufRead>(reader: R, battlefields: usize) -> Result<Self, BlottoError> {
        let mut players: ChainMap<String, Vec<u32>> = ChainMap::new();

        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }

            let mut tokens = trimmed.split_whitespace();
            let id = tokens.next().unwrap_or_default();
            if id.len() > MAX_ID_LEN {
                return Err(BlottoError::IdTooLong(id.to_string()));
            }
            if players.contains_key(id) {
                return Err(BlottoError::DuplicatePlayer(id.to_string()));
            }

            let mut distribution = Vec::with_capacity(battlefields);
            for token in tokens {
                let units = token.parse::<u32>().map_err(|_| {
                    BlottoError::InvalidDistribution {
                        id: id.to_string(),
                        reason: format!("allocation {token:?} is not a non-negative integer"),
                    }
                })?;
                distribution.push(units);
            }
            if distribution.len() != battlefields {
                return Err(BlottoError::InvalidDistribution {
                    id: id.to_string(),
                    reason: format!(
                        "expected {battlefields} allocations, got {}",
                        distribution.len()
                    ),
                });
            }

            players.put(id, distribution);
        }

        if players.is_empty() {
            return Err(BlottoError::EmptyRoster);
        }
        Ok(Self {
            players,
            battlefields,
        })
    }

    pub fn battlefields(&self) -> usize {
        self.battlefields
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.contains_key(id)
    }

    pub fn distribution(&self, id: &str) -> Option<&[u32]> {
        self.players.get(id).map(Vec::as_slice)
    }

    /// References to every player id, in no particular order.
    pub fn ids(&self) -> Vec<&String> {
        self.players.keys()
    }
}
