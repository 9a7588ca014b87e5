use crate::path::codec::PathCommand;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Exact endpoints; `a + (b - a)` can miss `b` by an ulp.
        if t >= 1.0 {
            return *b;
        }
        a + (b - a) * t
    }
}

impl Lerp for kurbo::Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        kurbo::Point::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

/// Blends coordinates per axis; the kind always comes from the target.
impl Lerp for PathCommand {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        PathCommand::at(b.kind, <kurbo::Point as Lerp>::lerp(&a.point(), &b.point(), t))
    }
}
