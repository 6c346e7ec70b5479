use glam::{ivec2, IVec2, Vec2};

/// Turn a continuous direction into a single 8-way grid step.
///
/// The vector is normalized and each component rounded, so shallow angles
/// become straight steps and steep ones become diagonals. Zero vector maps
/// to zero step.
pub fn step_towards(dir: Vec2) -> IVec2 {
    let Some(dir) = dir.try_normalize() else {
        return IVec2::ZERO;
    };
    ivec2(dir.x.round() as i32, dir.y.round() as i32)
}

#[cfg(test)]
mod test {
    use glam::vec2;

    use super::*;

    #[test]
    fn steps() {
        assert_eq!(step_towards(vec2(0.0, 0.0)), ivec2(0, 0));
        assert_eq!(step_towards(vec2(5.0, 0.0)), ivec2(1, 0));
        assert_eq!(step_towards(vec2(5.0, 1.0)), ivec2(1, 0));
        assert_eq!(step_towards(vec2(-3.0, -3.0)), ivec2(-1, -1));
        assert_eq!(step_towards(vec2(1.0, -4.0)), ivec2(0, -1));
        for x in -1..=1 {
            for y in -1..=1 {
                let d = ivec2(x, y);
                assert_eq!(step_towards(d.as_vec2() * 7.5), d);
            }
        }
    }
}
