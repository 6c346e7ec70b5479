//! Plain text rendering of what a creature sees and remembers.

use std::fmt::Write;

use engine::prelude::*;

/// How a map cell is shown to a viewer.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CellView {
    /// Currently in view, contents are shown.
    Lit,
    /// Seen before, only terrain is shown.
    Remembered,
    Unseen,
}

pub fn cell_view(r: &Runtime, viewer: Entity, loc: Location) -> CellView {
    if viewer.is_visible(r, loc) {
        CellView::Lit
    } else if viewer.is_explored(r, loc) {
        CellView::Remembered
    } else {
        CellView::Unseen
    }
}

fn glyph(r: &Runtime, view: CellView, loc: Location) -> char {
    let Some(tile) = loc.tile(r) else {
        return ' ';
    };

    match view {
        CellView::Lit => {
            if let Some(mob) = r.creature_at(loc, None) {
                mob.icon(r)
            } else if let Some(obj) = r.objects_at(loc).last() {
                obj.icon(r)
            } else {
                tile.to_char()
            }
        }
        // Remembered floor is dimmed so it stands apart from lit floor.
        CellView::Remembered => match tile {
            Tile::Floor => ',',
            t => t.to_char(),
        },
        CellView::Unseen => ' ',
    }
}

/// Draw the viewer's current level followed by a status line.
pub fn render(r: &Runtime, viewer: Entity) -> String {
    let mut ret = String::new();
    let Some(here) = viewer.loc(r) else {
        return ret;
    };
    let Some(level) = r.level(here.level) else {
        return ret;
    };

    let size = level.size();
    for y in 0..size.y {
        let line: String = (0..size.x)
            .map(|x| {
                let loc = Location::new(here.level, ivec2(x, y));
                glyph(r, cell_view(r, viewer, loc), loc)
            })
            .collect();
        let _ = writeln!(ret, "{}", line.trim_end());
    }

    let _ = write!(
        ret,
        "{} at {}, hp {}/{}, tick {}",
        level.name(),
        here.pos,
        viewer.hp(r).unwrap_or(0),
        viewer.max_hp(r).unwrap_or(0),
        r.now()
    );
    ret
}
