//! Curved flight paths through the lattice.
//!
//! A trajectory is a chain of straight lines and circular arcs. Positions are
//! looked up by the fraction of total arc length travelled, so a particle moves
//! at the same speed along short hops and long final drops.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use crate::path::PathNumber;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        from: Vec2,
        to: Vec2,
    },
    /// Circular arc from `from` to `to` sweeping `angle` radians,
    /// counter-clockwise when positive.
    Arc {
        from: Vec2,
        to: Vec2,
        angle: f32,
    },
}

impl Segment {
    pub fn start(&self) -> Vec2 {
        match *self {
            Segment::Line { from, .. } | Segment::Arc { from, .. } => from,
        }
    }

    pub fn end(&self) -> Vec2 {
        match *self {
            Segment::Line { to, .. } | Segment::Arc { to, .. } => to,
        }
    }

    fn arc_center_radius(from: Vec2, to: Vec2, angle: f32) -> (Vec2, f32) {
        let chord = to - from;
        let half = chord.length() * 0.5;
        let normal = chord.perp().normalize_or_zero();
        let center = (from + to) * 0.5 + normal * (half / (angle * 0.5).tan());
        (center, half / (angle * 0.5).sin().abs())
    }

    pub fn length(&self) -> f32 {
        match *self {
            Segment::Line { from, to } => from.distance(to),
            Segment::Arc { from, to, angle } => {
                if angle == 0.0 || from == to {
                    return from.distance(to);
                }
                let (_, radius) = Self::arc_center_radius(from, to, angle);
                radius * angle.abs()
            }
        }
    }

    /// Point at fraction `t` of this segment's length.
    pub fn point_at(&self, t: f32) -> Vec2 {
        match *self {
            Segment::Line { from, to } => from.lerp(to, t),
            Segment::Arc { from, to, angle } => {
                if angle == 0.0 || from == to {
                    return from.lerp(to, t);
                }
                let (center, _) = Self::arc_center_radius(from, to, angle);
                center + Vec2::from_angle(angle * t).rotate(from - center)
            }
        }
    }
}

/// Where a particle settles inside its bin.
#[derive(Debug, Clone, Copy)]
pub struct StackLayout {
    pub row_capacity: u32,
    pub dot_width: f32,
    pub dot_height: f32,
    /// Height between the last collision point and the first stack row.
    pub rise: f32,
}

impl StackLayout {
    /// Resting point for the particle at 1-based `stack_position` above
    /// `bin_entry`. A row fills left, center, right, then widens outward one
    /// dot at a time (left before right); each row sits one dot below the
    /// previous one.
    pub fn slot(&self, bin_entry: Vec2, stack_position: u32) -> Vec2 {
        let index = stack_position.saturating_sub(1);
        let stack_row = index / self.row_capacity;
        let stack_col = index % self.row_capacity;

        let x = bin_entry.x + column_offset(stack_col) as f32 * self.dot_width;
        let y = bin_entry.y + self.rise - self.dot_height * stack_row as f32;
        Vec2::new(x, y)
    }
}

/// Dot offset of a stack column: 0 -> -1, 1 -> 0, 2 -> +1, 3 -> -2, 4 -> +2, ...
fn column_offset(stack_col: u32) -> i32 {
    if stack_col == 1 {
        return 0;
    }
    let outer = stack_col.saturating_sub(1) as i32;
    let distance = outer / 2 + 1;
    if outer % 2 == 0 {
        -distance
    } else {
        distance
    }
}

#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    segments: Vec<Segment>,
    /// Cumulative length at the end of each segment.
    cumulative: Vec<f32>,
}

impl Trajectory {
    pub fn new(segments: Vec<Segment>) -> Self {
        let cumulative = segments
            .iter()
            .scan(0.0, |total, segment| {
                *total += segment.length();
                Some(*total)
            })
            .collect();
        Self {
            segments,
            cumulative,
        }
    }

    /// Spawn point, the apex bounce, one arc per decision, then a straight
    /// drop into the particle's stack slot.
    pub fn through_lattice(
        spawn: Vec2,
        collision_points: &[Vec<Vec2>],
        path: &PathNumber,
        stack: &StackLayout,
        stack_position: u32,
    ) -> Self {
        let mut current = collision_points[0][0];
        let mut segments = vec![Segment::Line {
            from: spawn,
            to: current,
        }];

        let mut col = 0;
        for (step, right) in path.bits().enumerate() {
            let angle = if right {
                col += 1;
                FRAC_PI_2
            } else {
                -FRAC_PI_2
            };
            let next = collision_points[step + 1][col];
            segments.push(Segment::Arc {
                from: current,
                to: next,
                angle,
            });
            current = next;
        }

        segments.push(Segment::Line {
            from: current,
            to: stack.slot(current, stack_position),
        });

        Self::new(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn start(&self) -> Vec2 {
        self.segments.first().map(Segment::start).unwrap_or_default()
    }

    pub fn end(&self) -> Vec2 {
        self.segments.last().map(Segment::end).unwrap_or_default()
    }

    /// Point after travelling `proportion` of the total length.
    pub fn point_from_proportion(&self, proportion: f32) -> Vec2 {
        let total = self.length();
        if total <= 0.0 {
            return self.start();
        }

        let target = proportion.clamp(0.0, 1.0) * total;
        let index = self
            .cumulative
            .partition_point(|&end| end < target)
            .min(self.segments.len() - 1);

        let segment_start = if index == 0 { 0.0 } else { self.cumulative[index - 1] };
        let segment_length = self.cumulative[index] - segment_start;
        let t = if segment_length > 0.0 {
            (target - segment_start) / segment_length
        } else {
            1.0
        };
        self.segments[index].point_at(t.clamp(0.0, 1.0))
    }
}
