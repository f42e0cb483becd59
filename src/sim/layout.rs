//! Static board layout: peg field and scoring gates
//!
//! Both layouts are fixed; regenerating them always yields the same board.

use glam::Vec2;

use super::state::{Gate, Peg};
use crate::consts::*;

/// Gate definitions in scoring priority order: (x, width, points, color)
const GATES: [(f32, f32, u32, u32); 6] = [
    (50.0, 60.0, 20, 0x888888),
    (160.0, 40.0, 50, 0xbbbbbb),
    (250.0, 100.0, 10, 0x555555),
    (400.0, 40.0, 50, 0xbbbbbb),
    (490.0, 60.0, 20, 0x888888),
    // Jackpot
    (215.0, 20.0, 100, 0xffffff),
];

/// Generate the staggered peg field
///
/// Even rows hold `PEGS_EVEN_ROW` pegs spread across the playable width; odd
/// rows hold `PEGS_ODD_ROW` pegs shifted half a spacing so they sit in the
/// gaps of the row above.
pub fn generate_pegs() -> Vec<Peg> {
    let playable_width = CANVAS_WIDTH - 2.0 * PEG_MARGIN;
    let base_spacing = playable_width / (PEGS_EVEN_ROW - 1) as f32;

    let mut pegs = Vec::with_capacity(PEG_ROWS * PEGS_EVEN_ROW);
    for row in 0..PEG_ROWS {
        let y = PEG_START_Y + row as f32 * PEG_ROW_SPACING;
        let (count, offset) = if row % 2 == 0 {
            (PEGS_EVEN_ROW, 0.0)
        } else {
            (PEGS_ODD_ROW, base_spacing / 2.0)
        };

        for col in 0..count {
            let x = PEG_MARGIN + offset + col as f32 * base_spacing;
            pegs.push(Peg {
                pos: Vec2::new(x, y),
                radius: PEG_RADIUS,
            });
        }
    }
    pegs
}

/// Generate the six scoring gates
pub fn generate_gates() -> Vec<Gate> {
    GATES
        .iter()
        .map(|&(x, width, points, color)| Gate {
            x,
            width,
            y: GATE_Y,
            height: GATE_HEIGHT,
            points,
            color,
            flash: 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peg_rows_alternate() {
        let pegs = generate_pegs();
        assert_eq!(pegs.len(), 5 * PEGS_EVEN_ROW + 5 * PEGS_ODD_ROW);

        for row in 0..PEG_ROWS {
            let y = PEG_START_Y + row as f32 * PEG_ROW_SPACING;
            let count = pegs.iter().filter(|p| (p.pos.y - y).abs() < 0.01).count();
            let expected = if row % 2 == 0 { PEGS_EVEN_ROW } else { PEGS_ODD_ROW };
            assert_eq!(count, expected, "row {}", row);
        }
    }

    #[test]
    fn test_odd_rows_fill_gaps() {
        let pegs = generate_pegs();
        let row0: Vec<f32> = pegs[..PEGS_EVEN_ROW].iter().map(|p| p.pos.x).collect();
        let row1: Vec<f32> = pegs[PEGS_EVEN_ROW..PEGS_EVEN_ROW + PEGS_ODD_ROW]
            .iter()
            .map(|p| p.pos.x)
            .collect();

        // Every odd-row peg sits midway between two even-row pegs
        for (i, x) in row1.iter().enumerate() {
            let mid = (row0[i] + row0[i + 1]) / 2.0;
            assert!((x - mid).abs() < 0.01);
        }
    }

    #[test]
    fn test_wall_clearance() {
        for peg in generate_pegs() {
            let left_gap = peg.pos.x - peg.radius;
            let right_gap = CANVAS_WIDTH - (peg.pos.x + peg.radius);
            assert!(left_gap > COIN_RADIUS * 2.0);
            assert!(right_gap > COIN_RADIUS * 2.0);
        }
    }

    #[test]
    fn test_gates() {
        let gates = generate_gates();
        let points: Vec<u32> = gates.iter().map(|g| g.points).collect();
        assert_eq!(points, vec![20, 50, 10, 50, 20, 100]);

        // Jackpot is the narrowest gate
        let jackpot = gates.iter().find(|g| g.points == 100).unwrap();
        assert!(gates.iter().all(|g| g.width >= jackpot.width));

        // No two gates overlap
        for (i, a) in gates.iter().enumerate() {
            for b in gates.iter().skip(i + 1) {
                assert!(a.x + a.width <= b.x || b.x + b.width <= a.x);
            }
        }
    }

    #[test]
    fn test_layout_is_stable() {
        assert_eq!(generate_pegs(), generate_pegs());
        assert_eq!(generate_gates(), generate_gates());
    }
}
