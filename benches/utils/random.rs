use geo::{Coordinate, Rect};

use rand::Rng;

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * rng.gen::<f64>(),
        y: bounds.min().y + dims.y * rng.gen::<f64>(),
    }
}

#[inline]
#[allow(dead_code)]
pub fn uniform_chord<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> (Coordinate<f64>, Coordinate<f64>) {
    (uniform_point(rng, bounds), uniform_point(rng, bounds))
}
