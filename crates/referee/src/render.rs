//! Text rendering of a board.

use crate::Board;
use referee_core::{Cell, Faction};
use std::fmt;

const FILES: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

impl Board {
    /// Draws the board as seen from `perspective`'s side.
    ///
    /// The opponent's captures are listed on top, then file labels, the
    /// ranks with their labels, file labels again, and the viewer's captures.
    pub fn render(&self, perspective: Faction) -> String {
        let mut order: Vec<u8> = (1..=8).collect();
        if perspective == Faction::Black {
            order.reverse();
        }
        let ranks: Vec<u8> = order.iter().rev().copied().collect();

        let mut out = String::new();
        out.push_str(&self.capture_line(perspective.opposite()));
        out.push_str(&file_labels(&order));
        for &rank in &ranks {
            out.push_str(&divider());
            out.push_str(&self.rank_line(rank, &order));
        }
        out.push_str(&divider());
        out.push_str(&file_labels(&order));
        out.push_str(&self.capture_line(perspective));
        out
    }

    fn capture_line(&self, faction: Faction) -> String {
        let mut glyphs: Vec<char> = self.captures(faction).iter().map(|p| p.glyph()).collect();
        glyphs.sort_unstable();
        let listed: Vec<String> = glyphs.iter().map(char::to_string).collect();
        format!("  {}\n", listed.join(" "))
    }

    fn rank_line(&self, rank: u8, order: &[u8]) -> String {
        let mut line = format!(" {} ", rank);
        for &file in order {
            let occupant = Cell::new(file.into(), rank.into())
                .ok()
                .and_then(|cell| self.at(cell));
            match occupant {
                Some(piece) => line.push_str(&format!("| {} ", piece.glyph())),
                None => line.push_str("|   "),
            }
        }
        line.push_str(&format!("| {}\n", rank));
        line
    }
}

fn divider() -> String {
    format!("   +{}\n", "---+".repeat(8))
}

fn file_labels(order: &[u8]) -> String {
    let mut line = String::from("  ");
    for &file in order {
        line.push_str(&format!("   {}", FILES[file as usize - 1]));
    }
    line.push('\n');
    line
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Faction::White))
    }
}
