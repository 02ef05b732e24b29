//! Spatial matching: walks across adjacent keys ("qwerty", "zxcvfr", "7412").

use super::{Match, Pattern, SpatialMatch};
use crate::reference::KeyboardGraph;

const MIN_SPATIAL_LEN: usize = 3;

pub(super) fn match_all(graphs: &[KeyboardGraph], password: &[char]) -> Vec<Match> {
    graphs
        .iter()
        .flat_map(|graph| match_graph(graph, password))
        .collect()
}

fn match_graph(graph: &KeyboardGraph, password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut i = 0;
    while i + 1 < password.len() {
        let mut j = i + 1;
        let mut last_direction = None;
        let mut turns = 0;
        let mut shifted_count = usize::from(graph.is_shifted(password[i]));

        loop {
            let found = if j < password.len() {
                find_direction(graph, password[j - 1], password[j])
            } else {
                None
            };

            match found {
                Some((direction, shifted)) => {
                    if shifted {
                        shifted_count += 1;
                    }
                    // every walk starts with a turn
                    if last_direction != Some(direction) {
                        turns += 1;
                        last_direction = Some(direction);
                    }
                    j += 1;
                }
                None => {
                    if j - i >= MIN_SPATIAL_LEN {
                        matches.push(Match::candidate(
                            password,
                            i,
                            j,
                            Pattern::Spatial(SpatialMatch {
                                graph: graph.name(),
                                turns,
                                shifted_count,
                                starting_positions: graph.starting_positions(),
                                average_degree: graph.average_degree(),
                            }),
                        ));
                    }
                    i = j;
                    break;
                }
            }
        }
    }
    matches
}

/// Direction index from `prev` to `next`, and whether `next` is the shifted
/// character of its key.
fn find_direction(graph: &KeyboardGraph, prev: char, next: char) -> Option<(usize, bool)> {
    let neighbors = graph.neighbors(prev)?;
    neighbors.iter().enumerate().find_map(|(direction, key)| {
        let key = key.as_ref()?;
        let index = key.iter().position(|&c| c == next)?;
        Some((direction, index == 1))
    })
}
