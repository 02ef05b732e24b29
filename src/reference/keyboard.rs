//! Keyboard adjacency graphs.
//!
//! Graphs are built from a textual layout where each key is a token of one
//! or two characters (unshifted, shifted). Every key gets the same number of
//! neighbor slots; the slot index is the direction, empty slots mark edges.

use std::collections::HashMap;

const QWERTY: &str = r#"
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+
    qQ wW eE rR tT yY uU iI oO pP [{ ]} \|
     aA sS dD fF gG hH jJ kK lL ;: '"
      zZ xX cC vV bB nN mM ,< .> /?
"#;

const KEYPAD: &str = r#"
  / * -
7 8 9 +
4 5 6
1 2 3
  0 .
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardGraph {
    name: &'static str,
    adjacency: HashMap<char, Vec<Option<Vec<char>>>>,
    shifted: HashMap<char, bool>,
    average_degree: f64,
}

impl KeyboardGraph {
    pub fn qwerty() -> Self {
        Self::build("qwerty", QWERTY, true)
    }

    pub fn keypad() -> Self {
        Self::build("keypad", KEYPAD, false)
    }

    /// Builds a graph from a layout. Slanted layouts shift each row by one
    /// column (typewriter keyboards); aligned layouts form a grid (keypads).
    fn build(name: &'static str, layout: &str, slanted: bool) -> Self {
        let mut positions: HashMap<(i32, i32), Vec<char>> = HashMap::new();
        let token_size = layout
            .split_whitespace()
            .next()
            .map(|token| token.chars().count())
            .unwrap_or(1) as i32;
        let x_unit = token_size + 1;

        for (y, line) in layout.lines().enumerate() {
            let y = y as i32;
            let slant = if slanted { y - 1 } else { 0 };
            for (column, token) in tokens_with_columns(line) {
                let x = (column as i32 - slant) / x_unit;
                positions.insert((x, y), token);
            }
        }

        let mut adjacency = HashMap::new();
        let mut shifted = HashMap::new();
        for (&(x, y), key) in &positions {
            let neighbors: Vec<Option<Vec<char>>> = neighbor_coords(x, y, slanted)
                .into_iter()
                .map(|coord| positions.get(&coord).cloned())
                .collect();
            for (index, &c) in key.iter().enumerate() {
                adjacency.insert(c, neighbors.clone());
                shifted.insert(c, index == 1);
            }
        }

        let total_degree: usize = adjacency
            .values()
            .map(|neighbors| neighbors.iter().filter(|n| n.is_some()).count())
            .sum();
        let average_degree = if adjacency.is_empty() {
            0.0
        } else {
            total_degree as f64 / adjacency.len() as f64
        };

        Self {
            name,
            adjacency,
            shifted,
            average_degree,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn neighbors(&self, c: char) -> Option<&[Option<Vec<char>>]> {
        self.adjacency.get(&c).map(Vec::as_slice)
    }

    /// True when `c` is the shifted character of its key.
    pub fn is_shifted(&self, c: char) -> bool {
        self.shifted.get(&c).copied().unwrap_or(false)
    }

    /// Number of characters a spatial pattern can start from.
    pub fn starting_positions(&self) -> usize {
        self.adjacency.len()
    }

    pub fn average_degree(&self) -> f64 {
        self.average_degree
    }
}

fn tokens_with_columns(line: &str) -> Vec<(usize, Vec<char>)> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, Vec<char>)> = None;
    for (column, c) in line.chars().enumerate() {
        if c.is_whitespace() {
            if let Some(token) = current.take() {
                tokens.push(token);
            }
        } else {
            current.get_or_insert_with(|| (column, Vec::new())).1.push(c);
        }
    }
    if let Some(token) = current {
        tokens.push(token);
    }
    tokens
}

fn neighbor_coords(x: i32, y: i32, slanted: bool) -> Vec<(i32, i32)> {
    if slanted {
        vec![
            (x - 1, y),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    } else {
        vec![
            (x - 1, y),
            (x - 1, y - 1),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x + 1, y + 1),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    }
}
