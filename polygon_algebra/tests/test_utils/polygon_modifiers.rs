use polygon_algebra::polygon::{Polygon, Ring};

/// Cycles all the point index positions forward by `n`, e.g. index 0 becomes 1 and the last index
/// becomes 0 (`n` is taken modulo the ring length).
pub fn cycle_start_index_forward(input: &Ring<f64>, n: usize) -> Ring<f64> {
    let len = input.point_count();
    if len == 0 {
        return input.clone();
    }

    let mut points = input.points.clone();
    points.rotate_right(n % len);
    Ring::from_points(points, input.hole)
}

#[derive(Debug, Clone, Copy)]
pub struct ModifiedPolygonState {
    pub inverted_direction: bool,
    pub cycle_position: usize,
}

impl ModifiedPolygonState {
    pub fn new(inverted_direction: bool, cycle_position: usize) -> Self {
        Self {
            inverted_direction,
            cycle_position,
        }
    }
}

/// Set of polygons made from an input polygon by reversing ring direction and/or cycling the
/// starting point of every ring.
#[derive(Debug, Clone)]
pub struct ModifiedPolygonSet<'a> {
    pub input: &'a Polygon<f64>,
    pub invert_direction: bool,
    pub cycle_index_positions: bool,
}

impl<'a> ModifiedPolygonSet<'a> {
    pub fn new(input: &'a Polygon<f64>, invert_direction: bool, cycle_index_positions: bool) -> Self {
        Self {
            input,
            invert_direction,
            cycle_index_positions,
        }
    }

    fn modified(&self, inverted: bool, cycle: usize) -> Polygon<f64> {
        let base = if inverted {
            self.input.reversed()
        } else {
            self.input.clone()
        };

        Polygon::from_rings(
            base.rings
                .iter()
                .map(|r| cycle_start_index_forward(r, cycle))
                .collect(),
        )
    }

    pub fn accept_closure<F>(&self, visitor: &mut F)
    where
        F: FnMut(Polygon<f64>, ModifiedPolygonState),
    {
        let max_len = self
            .input
            .rings
            .iter()
            .map(|r| r.point_count())
            .max()
            .unwrap_or(0);

        let directions: &[bool] = if self.invert_direction {
            &[false, true]
        } else {
            &[false]
        };

        for &inverted in directions {
            visitor(self.modified(inverted, 0), ModifiedPolygonState::new(inverted, 0));
            if self.cycle_index_positions {
                for i in 1..max_len {
                    visitor(
                        self.modified(inverted, i),
                        ModifiedPolygonState::new(inverted, i),
                    );
                }
            }
        }
    }
}
