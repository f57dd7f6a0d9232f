use serde::{Deserialize, Serialize};

/// One grid position.
///
/// `adjacent_mines` is only meaningful once mines were placed, and is always 0 for mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// Neither revealed nor flagged, so a reveal may open it.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Revealed and showing a number, the only cells a chord applies to.
    pub const fn is_numbered(self) -> bool {
        self.is_revealed && !self.is_mine && self.adjacent_mines > 0
    }
}

/// Color label for an adjacent-mine count, `1..=8`; anything else gets the fallback.
pub const fn number_color(count: u8) -> &'static str {
    match count {
        1 => "text-blue-600",
        2 => "text-green-600",
        3 => "text-red-600",
        4 => "text-purple-700",
        5 => "text-yellow-700",
        6 => "text-cyan-600",
        7 => "text-gray-800",
        8 => "text-gray-600",
        _ => "text-gray-800",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_hidden() {
        let cell = Cell::default();

        assert!(cell.is_hidden());
        assert!(!cell.is_numbered());
        assert_eq!(cell.adjacent_mines, 0);
    }

    #[test]
    fn numbered_requires_revealed_count() {
        let cell = Cell {
            is_revealed: true,
            adjacent_mines: 2,
            ..Default::default()
        };
        let zero = Cell {
            is_revealed: true,
            ..Default::default()
        };

        assert!(cell.is_numbered());
        assert!(!zero.is_numbered());
    }

    #[test]
    fn number_colors_are_distinct_for_one_to_eight() {
        let colors: Vec<_> = (1..=8).map(number_color).collect();

        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(number_color(1), "text-blue-600");
        assert_eq!(number_color(8), "text-gray-600");
    }

    #[test]
    fn number_color_falls_back_out_of_range() {
        assert_eq!(number_color(0), "text-gray-800");
        assert_eq!(number_color(9), "text-gray-800");
        assert_eq!(number_color(u8::MAX), "text-gray-800");
    }
}
