//! One pixel wide lines between two pixels.
//!
//! This is not Bresenham. Each endpoint pixel is widened to the pixel corner
//! that lies outermost in the direction of travel, and the exact segment
//! between those corners is walked one column (or row, for steep lines) at a
//! time. Whenever the segment crosses into the neighbouring row inside a
//! column, the signed area under the segment relative to the row boundary
//! decides which of the two candidate pixels gets painted.

use crate::error::PreconditionViolation;
use crate::image::PixelCoord;

/// Largest absolute endpoint coordinate accepted by [`rasterize`].
///
/// Keeps endpoint differences and the widened corners inside `i32`.
pub const MAX_COORDINATE: i32 = 1 << 29;

/// Pixels painted by a line from `start` to `end`, in stepping order.
///
/// Horizontal, vertical and single pixel lines include both endpoints.
/// Duplicates are never removed. Endpoints with a coordinate beyond
/// [`MAX_COORDINATE`] fail with `CoordinateOutOfRange`.
pub fn rasterize(start: PixelCoord, end: PixelCoord) -> crate::Result<Vec<PixelCoord>> {
    check_range(start)?;
    check_range(end)?;
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx == 0 && dy == 0 {
        return Ok(vec![start]);
    }
    if dy == 0 {
        return Ok(horizontal(start, dx));
    }
    if dx == 0 {
        return Ok(vertical(start, dy));
    }
    let (rep_start, rep_end) = representative_corners(dx, dy);
    let start_point = (
        (rep_start.0 + start.x) as f64,
        (rep_start.1 + start.y) as f64,
    );
    let end_point = ((rep_end.0 + start.x) as f64, (rep_end.1 + start.y) as f64);
    let slope = (rep_end.1 - rep_start.1) as f64 / (rep_end.0 - rep_start.0) as f64;
    if slope.abs() <= 1.0 {
        Ok(walk_columns(start_point, end_point))
    } else {
        Ok(walk_rows(start_point, end_point))
    }
}

fn check_range(coord: PixelCoord) -> Result<(), PreconditionViolation> {
    let limit = MAX_COORDINATE as u32;
    if coord.x.unsigned_abs() > limit || coord.y.unsigned_abs() > limit {
        return Err(PreconditionViolation::CoordinateOutOfRange {
            x: coord.x,
            y: coord.y,
        });
    }
    Ok(())
}

fn horizontal(start: PixelCoord, dx: i32) -> Vec<PixelCoord> {
    let direction = dx.signum();
    (0..=dx.abs())
        .map(|step| PixelCoord::new(start.x + direction * step, start.y))
        .collect()
}

fn vertical(start: PixelCoord, dy: i32) -> Vec<PixelCoord> {
    let direction = dy.signum();
    (0..=dy.abs())
        .map(|step| PixelCoord::new(start.x, start.y + direction * step))
        .collect()
}

/// Corner offsets, relative to the start pixel, of the segment that is walked.
///
/// Callers exclude `dx == 0 && dy == 0` as well as axis aligned lines, so
/// exactly one quadrant matches.
fn representative_corners(dx: i32, dy: i32) -> ((i32, i32), (i32, i32)) {
    if dx >= 0 && dy > 0 {
        ((0, 0), (dx + 1, dy + 1))
    } else if dx < 0 && dy >= 0 {
        ((1, 0), (dx, dy + 1))
    } else if dx > 0 && dy <= 0 {
        ((0, 1), (dx + 1, dy))
    } else {
        ((1, 1), (dx, dy))
    }
}

/// Shallow lines, modelled as y = m * x + b and walked along x.
fn walk_columns(start_point: (f64, f64), end_point: (f64, f64)) -> Vec<PixelCoord> {
    let (start_x, start_y) = start_point;
    let (end_x, end_y) = end_point;
    let m = (end_y - start_y) / (end_x - start_x);
    let b = start_y - m * start_x;
    walk(start_x, end_x)
        .map(|xi| {
            let y0 = (m * xi + b).floor();
            let y1 = (m * (xi + 1.0) + b).floor();
            let y = if y0 == y1 {
                y0
            } else {
                let offset = y0.max(y1);
                pick(signed_area(m, b, xi, offset), y0, y1)
            };
            PixelCoord::new(xi as i32, y as i32)
        })
        .collect()
}

/// Steep lines, modelled as x = m * y + b and walked along y.
fn walk_rows(start_point: (f64, f64), end_point: (f64, f64)) -> Vec<PixelCoord> {
    let (start_x, start_y) = start_point;
    let (end_x, end_y) = end_point;
    let m = (end_x - start_x) / (end_y - start_y);
    let b = start_x - m * start_y;
    walk(start_y, end_y)
        .map(|yi| {
            let x0 = (m * yi + b).floor();
            let x1 = (m * (yi + 1.0) + b).floor();
            let x = if x0 == x1 {
                x0
            } else {
                let offset = x0.min(x1);
                pick(signed_area(m, b, yi, offset), x0, x1)
            };
            PixelCoord::new(x as i32, yi as i32)
        })
        .collect()
}

/// Integer positions from `from` towards `to`, excluding `to` itself.
fn walk(from: f64, to: f64) -> impl Iterator<Item = f64> {
    let direction = (to - from).signum();
    let steps = (to - from).abs() as i64;
    (0..steps).map(move |step| from + direction * step as f64)
}

/// Integral of `m * t + b - offset` over `[t, t + 1]`.
fn signed_area(m: f64, b: f64, t: f64, offset: f64) -> f64 {
    (m / 2.0) * ((t + 1.0).powi(2) - t.powi(2)) + (b - offset)
}

fn pick(area: f64, a: f64, b: f64) -> f64 {
    if area > 0.0 {
        a.max(b)
    } else {
        a.min(b)
    }
}

#[cfg(test)]
mod test {
    use super::{rasterize, MAX_COORDINATE};
    use crate::error::{Error, PreconditionViolation};
    use crate::image::PixelCoord;
    use pretty_assertions::assert_eq;

    fn line(start: (i32, i32), end: (i32, i32)) -> Vec<(i32, i32)> {
        rasterize(start.into(), end.into())
            .unwrap()
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn single_pixel() {
        assert_eq!(line((4, -2), (4, -2)), vec![(4, -2)]);
    }

    #[test]
    fn horizontal_lines_include_both_ends() {
        assert_eq!(line((0, 0), (3, 0)), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(line((2, 5), (0, 5)), vec![(2, 5), (1, 5), (0, 5)]);
    }

    #[test]
    fn vertical_lines_include_both_ends() {
        assert_eq!(line((0, 0), (0, -2)), vec![(0, 0), (0, -1), (0, -2)]);
        assert_eq!(line((7, 1), (7, 3)), vec![(7, 1), (7, 2), (7, 3)]);
    }

    #[test]
    fn shallow_line_breaks_ties_by_area() {
        // the crossing in column 2 has zero area and stays on the lower row index
        assert_eq!(
            line((0, 0), (4, 1)),
            vec![(0, 0), (1, 0), (2, 0), (3, 1), (4, 1)]
        );
        assert_eq!(
            line((2, 3), (7, 5)),
            vec![(2, 3), (3, 3), (4, 4), (5, 4), (6, 5), (7, 5)]
        );
    }

    #[test]
    fn shallow_line_going_up() {
        assert_eq!(
            line((0, 0), (4, -1)),
            vec![(0, 0), (1, 0), (2, -1), (3, -1), (4, -1)]
        );
    }

    #[test]
    fn steep_line() {
        assert_eq!(
            line((0, 0), (1, 4)),
            vec![(0, 0), (0, 1), (1, 2), (1, 3), (2, 4)]
        );
    }

    #[test]
    fn diagonal() {
        assert_eq!(line((0, 0), (3, 3)), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(line((0, 0), (1, 1)), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn leftward_lines_walk_from_the_outer_corner() {
        assert_eq!(
            line((0, 0), (-4, 1)),
            vec![(1, -1), (0, 0), (-1, 0), (-2, 1), (-3, 1)]
        );
        assert_eq!(line((0, 0), (-1, -1)), vec![(1, 1), (0, 0)]);
        assert_eq!(
            line((5, 5), (3, 0)),
            vec![(6, 6), (6, 5), (5, 4), (5, 3), (4, 2), (4, 1)]
        );
    }

    #[test]
    fn deterministic() {
        let start = PixelCoord::new(-3, 8);
        let end = PixelCoord::new(11, -2);
        assert_eq!(rasterize(start, end).unwrap(), rasterize(start, end).unwrap());
    }

    #[test]
    fn shallow_lines_paint_one_pixel_per_column() {
        let pixels = rasterize(PixelCoord::new(0, 0), PixelCoord::new(9, 4)).unwrap();
        let columns: Vec<i32> = pixels.iter().map(|p| p.x).collect();
        assert_eq!(columns, (0..=9).collect::<Vec<_>>());
        assert!(pixels.windows(2).all(|pair| (pair[1].y - pair[0].y).abs() <= 1));
    }

    #[test]
    fn endpoints_at_the_coordinate_limit() {
        let pixels = rasterize(
            PixelCoord::new(-MAX_COORDINATE, 0),
            PixelCoord::new(-MAX_COORDINATE, 2),
        )
        .unwrap();
        assert_eq!(pixels.len(), 3);
        assert_eq!(
            line((MAX_COORDINATE - 1, MAX_COORDINATE), (MAX_COORDINATE, MAX_COORDINATE - 1)),
            vec![(MAX_COORDINATE - 1, MAX_COORDINATE), (MAX_COORDINATE, MAX_COORDINATE - 1)]
        );
    }

    #[test]
    fn reject_endpoints_beyond_the_coordinate_limit() {
        let result = rasterize(PixelCoord::new(i32::MIN, 0), PixelCoord::new(i32::MAX, 1));
        assert!(matches!(
            result,
            Err(Error::Precondition(
                PreconditionViolation::CoordinateOutOfRange { x: i32::MIN, y: 0 }
            ))
        ));
        let result = rasterize(PixelCoord::new(0, 0), PixelCoord::new(3, MAX_COORDINATE + 1));
        assert!(matches!(
            result,
            Err(Error::Precondition(
                PreconditionViolation::CoordinateOutOfRange { x: 3, .. }
            ))
        ));
    }
}
