use glam::{ivec2, IVec2};

/// Rectangular character map read from indented text.
///
/// Leading blank lines and the common indentation of the nonblank lines are
/// stripped, so maps can be written inline in indented code. Short lines are
/// padded with spaces up to the width of the widest line.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct AsciiMap {
    lines: Vec<Vec<char>>,
    width: usize,
}

impl AsciiMap {
    pub fn new(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .skip_while(|line| line.is_empty())
            .collect();

        // Drop trailing blank lines too.
        let len = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |i| i + 1);
        let lines = &lines[..len];

        let indent = lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0);

        let lines: Vec<Vec<char>> = lines
            .iter()
            .map(|line| line.chars().skip(indent).collect())
            .collect();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);

        AsciiMap { lines, width }
    }

    pub fn size(&self) -> IVec2 {
        ivec2(self.width as i32, self.lines.len() as i32)
    }

    /// Character at position, space if outside the map.
    pub fn get(&self, p: IVec2) -> char {
        if p.x < 0 || p.y < 0 {
            return ' ';
        }
        self.lines
            .get(p.y as usize)
            .and_then(|line| line.get(p.x as usize))
            .copied()
            .unwrap_or(' ')
    }

    /// Iterate every position in the map rectangle with its character.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        let size = self.size();
        (0..size.y).flat_map(move |y| {
            (0..size.x).map(move |x| {
                let p = ivec2(x, y);
                (p, self.get(p))
            })
        })
    }
}
