pub(crate) const GLYPH_WIDTH: i32 = 3;
pub(crate) const GLYPH_HEIGHT: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Glyph {
    pub(crate) rows: [u8; GLYPH_HEIGHT as usize],
}

const UNKNOWN_GLYPH: Glyph = Glyph {
    rows: [0b111, 0b001, 0b011, 0b000, 0b010],
};

/// `None` for characters that leave the cell background untouched.
pub(crate) fn glyph_for(ch: char) -> Option<Glyph> {
    let rows = match ch {
        ' ' | '\0' => return None,
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '#' => [0b101, 0b111, 0b101, 0b111, 0b101],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        'o' => [0b000, 0b111, 0b101, 0b101, 0b111],
        _ => return Some(UNKNOWN_GLYPH),
    };
    Some(Glyph { rows })
}

impl Glyph {
    pub(crate) fn is_set(&self, col: i32, row: i32) -> bool {
        if !(0..GLYPH_WIDTH).contains(&col) || !(0..GLYPH_HEIGHT).contains(&row) {
            return false;
        }
        self.rows[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
    }
}
