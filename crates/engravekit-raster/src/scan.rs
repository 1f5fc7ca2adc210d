//! Boustrophedon scan engine.
//!
//! Walks the preprocessed matrix row by row, alternating scan direction
//! each row, and coalesces runs of constant tool state into single motion
//! events.

use engravekit_core::types::BoxedIterator;
use image::GrayImage;
use tracing::debug;

use crate::config::ScanConfig;
use crate::mapper::{CoordinateMapper, PowerMapper};

/// One entry of the toolpath event sequence, in strict emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionEvent {
    /// Reposition with the laser off.
    Travel { x: f64, y: f64, feed: u32 },
    /// Move with the laser driven at `power`.
    Engrave { x: f64, y: f64, feed: u32, power: u32 },
    /// End of a scan line. Renders as a blank line; not a motion.
    RowEnd,
}

/// Scan a preprocessed matrix into a motion event sequence.
///
/// Each row starts in background state (`last_value = 0`). A change of
/// pixel value closes the run that preceded it: if that run was background
/// the event is a [`MotionEvent::Travel`] at `move_speed`, otherwise an
/// [`MotionEvent::Engrave`] at `low_speed` with the run's mapped power.
///
/// The event coordinate is the boundary between the run and the next pixel,
/// which is direction-dependent: the transition column itself when scanning
/// forward, one column past it when scanning backward. Getting this offset
/// wrong makes the tool lag one cell behind the commanded state change.
///
/// The scan is total over any rectangular matrix and deterministic; calling
/// it twice on the same inputs yields the same sequence.
pub fn scan(matrix: &GrayImage, config: &ScanConfig) -> Vec<MotionEvent> {
    let coords = CoordinateMapper::new(config);
    let power = PowerMapper::new(config);
    let (width, height) = matrix.dimensions();
    let mut events = Vec::new();
    let mut reversed = false;

    for y in 0..height {
        let mut last_value: u8 = 0;
        let columns: BoxedIterator<u32> = if reversed {
            Box::new((0..width).rev())
        } else {
            Box::new(0..width)
        };

        for x in columns {
            let value = matrix.get_pixel(x, y).0[0];
            if value == last_value {
                continue;
            }
            let boundary = if reversed { x + 1 } else { x };
            let bx = coords.to_x(boundary);
            let by = coords.to_y(y);
            if last_value == 0 {
                events.push(MotionEvent::Travel {
                    x: bx,
                    y: by,
                    feed: config.move_speed,
                });
            } else {
                events.push(MotionEvent::Engrave {
                    x: bx,
                    y: by,
                    feed: config.low_speed,
                    power: power.drive(last_value),
                });
            }
            last_value = value;
        }

        // a row ending inside a foreground run still has to engrave it;
        // the run closes at the row's outer edge
        if last_value != 0 {
            let boundary = if reversed { 0 } else { width };
            events.push(MotionEvent::Engrave {
                x: coords.to_x(boundary),
                y: coords.to_y(y),
                feed: config.low_speed,
                power: power.drive(last_value),
            });
        }

        events.push(MotionEvent::RowEnd);
        reversed = !reversed;
    }

    debug!(rows = height, events = events.len(), "scan complete");
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The 3x4 reference matrix: column 1 holds 0/40/80 and column 2 holds
    /// 10/50/90 row-wise, everything else background.
    fn reference_matrix() -> GrayImage {
        GrayImage::from_fn(4, 3, |x, y| {
            let value = match x {
                1 => 40 * y as u16,
                2 => 40 * y as u16 + 10,
                _ => 0,
            };
            image::Luma([value as u8])
        })
    }

    #[test]
    fn test_reference_matrix_events() {
        let events = scan(&reference_matrix(), &ScanConfig::default());
        let expected = vec![
            // row 0, forward
            MotionEvent::Travel { x: 20.1, y: 20.0, feed: 2000 },
            MotionEvent::Engrave { x: 20.15, y: 20.0, feed: 70, power: 96 },
            MotionEvent::RowEnd,
            // row 1, reversed: boundary column is one step past the
            // transition column
            MotionEvent::Travel { x: 20.15, y: 20.05, feed: 2000 },
            MotionEvent::Engrave { x: 20.1, y: 20.05, feed: 70, power: 122 },
            MotionEvent::Engrave { x: 20.05, y: 20.05, feed: 70, power: 115 },
            MotionEvent::RowEnd,
            // row 2, forward again
            MotionEvent::Travel { x: 20.05, y: 20.1, feed: 2000 },
            MotionEvent::Engrave { x: 20.1, y: 20.1, feed: 70, power: 141 },
            MotionEvent::Engrave { x: 20.15, y: 20.1, feed: 70, power: 148 },
            MotionEvent::RowEnd,
        ];
        assert_eq!(events.len(), expected.len());
        for (got, want) in events.iter().zip(&expected) {
            match (got, want) {
                (
                    MotionEvent::Travel { x, y, feed },
                    MotionEvent::Travel { x: ex, y: ey, feed: ef },
                ) => {
                    assert!((x - ex).abs() < 1e-9);
                    assert!((y - ey).abs() < 1e-9);
                    assert_eq!(feed, ef);
                }
                (
                    MotionEvent::Engrave { x, y, feed, power },
                    MotionEvent::Engrave { x: ex, y: ey, feed: ef, power: ep },
                ) => {
                    assert!((x - ex).abs() < 1e-9);
                    assert!((y - ey).abs() < 1e-9);
                    assert_eq!(feed, ef);
                    assert_eq!(power, ep);
                }
                (MotionEvent::RowEnd, MotionEvent::RowEnd) => {}
                (got, want) => panic!("event mismatch: got {:?}, want {:?}", got, want),
            }
        }
    }

    #[test]
    fn test_scan_is_deterministic() {
        let matrix = reference_matrix();
        let config = ScanConfig::default();
        assert_eq!(scan(&matrix, &config), scan(&matrix, &config));
    }

    #[test]
    fn test_single_pixel_matrix() {
        let config = ScanConfig::default();
        let coords = CoordinateMapper::new(&config);
        let matrix = GrayImage::from_pixel(1, 1, image::Luma([200]));
        let events = scan(&matrix, &config);
        // one travel to the pixel, exactly one engrave closing it at the
        // row's outer edge, one row marker
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], MotionEvent::Travel { feed: 2000, .. }));
        match &events[1] {
            MotionEvent::Engrave { x, feed, power, .. } => {
                assert!((x - coords.to_x(1)).abs() < 1e-9);
                assert!(coords.to_x(1) > coords.to_x(0));
                assert_eq!(*feed, 70);
                assert_eq!(*power, 219);
            }
            other => panic!("expected engrave, got {:?}", other),
        }
        assert_eq!(events[2], MotionEvent::RowEnd);
    }

    #[test]
    fn test_constant_row_coalesces_to_single_event() {
        // a run of identical values produces one event at its start and one
        // closing engrave at the row edge, not one event per pixel
        let matrix = GrayImage::from_fn(64, 1, |x, _| {
            image::Luma([if x == 0 { 0 } else { 128 }])
        });
        let events = scan(&matrix, &ScanConfig::default());
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], MotionEvent::Travel { .. }));
        assert!(matches!(events[1], MotionEvent::Engrave { .. }));
        assert_eq!(events[2], MotionEvent::RowEnd);
    }

    #[test]
    fn test_all_background_matrix_emits_only_row_markers() {
        let matrix = GrayImage::new(8, 5);
        let events = scan(&matrix, &ScanConfig::default());
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| *e == MotionEvent::RowEnd));
    }

    #[test]
    fn test_last_value_resets_at_row_start() {
        // both rows are the same run value; the second row still re-enters
        // from background state and re-emits a travel event
        let matrix = GrayImage::from_fn(3, 2, |x, _| {
            image::Luma([if x == 0 { 0 } else { 200 }])
        });
        let events = scan(&matrix, &ScanConfig::default());
        let travels = events
            .iter()
            .filter(|e| matches!(e, MotionEvent::Travel { .. }))
            .count();
        assert_eq!(travels, 2);
    }

    #[test]
    fn test_direction_aware_boundary_column() {
        let config = ScanConfig::default();
        let coords = CoordinateMapper::new(&config);
        // transition at column 2 in both rows
        let matrix = GrayImage::from_fn(4, 2, |x, _| {
            image::Luma([if x >= 2 { 100 } else { 0 }])
        });
        let events = scan(&matrix, &config);
        // forward row: boundary at the transition column itself, trailing
        // run closed at the right edge
        match &events[0] {
            MotionEvent::Travel { x, .. } => assert!((x - coords.to_x(2)).abs() < 1e-9),
            other => panic!("expected travel, got {:?}", other),
        }
        match &events[1] {
            MotionEvent::Engrave { x, .. } => assert!((x - coords.to_x(4)).abs() < 1e-9),
            other => panic!("expected engrave, got {:?}", other),
        }
        assert_eq!(events[2], MotionEvent::RowEnd);
        // reversed row: transitions at columns 3 and 1 close their runs one
        // column past the transition, at columns 4 and 2
        match &events[3] {
            MotionEvent::Travel { x, .. } => assert!((x - coords.to_x(4)).abs() < 1e-9),
            other => panic!("expected travel, got {:?}", other),
        }
        match &events[4] {
            MotionEvent::Engrave { x, .. } => assert!((x - coords.to_x(2)).abs() < 1e-9),
            other => panic!("expected engrave, got {:?}", other),
        }
    }
}
