// Host-side tests for candle placement.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod cake_core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod layout {
        include!("../src/core/layout.rs");
    }
}

use cake_core::constants::*;
use cake_core::layout::*;

/// Smallest center-to-center distance in px between clearance-keeping
/// candles (both axes scale with width).
fn min_distance_px(layout: &Layout, width_px: f64) -> Option<f64> {
    let pts: Vec<_> = layout
        .candles
        .iter()
        .filter(|c| !c.overflow)
        .map(|c| c.position)
        .collect();
    let mut best: Option<f64> = None;
    for (i, a) in pts.iter().enumerate() {
        for b in &pts[i + 1..] {
            let d = (*a - *b).length() as f64 * width_px / 100.0;
            best = Some(best.map_or(d, |m| m.min(d)));
        }
    }
    best
}

#[test]
fn clearance_follows_width_within_gap_bounds() {
    assert!((LayoutParams::for_width(600.0).clearance_px() - 22.0).abs() < 1e-9);
    assert!((LayoutParams::for_width(400.0).clearance_px() - 18.8).abs() < 1e-9);
    assert!((LayoutParams::for_width(200.0).clearance_px() - 18.0).abs() < 1e-9);
}

#[test]
fn ring_radii_are_inclusive_and_descending() {
    let radii = ring_radii(46.0, 8.0, 7.0);
    assert_eq!(radii, vec![46.0, 39.0, 32.0, 25.0, 18.0, 11.0]);
    assert_eq!(ring_radii(46.0, 8.0, 38.0), vec![46.0, 8.0]);
    assert!(ring_radii(46.0, 8.0, 0.0).is_empty());
    assert!(ring_radii(46.0, 8.0, f64::INFINITY).is_empty());
}

#[test]
fn ring_capacity_keeps_chord_clearance() {
    // Circumference alone would allow 6 on a 19.4px ring; the chord allows 5
    let squashed = 3.88 / 100.0 * 1000.0 * 0.5;
    assert_eq!((2.0 * std::f64::consts::PI * squashed / 20.0).floor() as usize, 6);
    let n = ring_capacity(3.88, 1000.0, 0.5, 20.0);
    assert_eq!(n, 5);
    assert!(2.0 * squashed * (std::f64::consts::PI / n as f64).sin() >= 20.0);
    assert_eq!(ring_capacity(1.0, 100.0, 0.45, 20.0), 0);
}

#[test]
fn default_cake_places_every_candle() {
    let layout = place_candles(&LayoutParams::for_width(600.0));
    assert_eq!(layout.candles.len(), CANDLE_COUNT);
    assert_eq!(layout.shortfall(), 0);
    assert_eq!(layout.rings.len(), 5);
    let alloc: Vec<usize> = layout.rings.iter().map(|r| r.allocated).collect();
    assert_eq!(alloc, vec![20, 14, 13, 13, 7]);
    assert_eq!(layout.overflow(), 0);
    for ring in &layout.rings {
        assert!(ring.allocated <= ring.capacity);
    }
    for inner in &layout.rings[1..] {
        assert!(layout.rings[0].allocated > inner.allocated);
    }
}

#[test]
fn outer_ring_is_never_sparser_than_inner() {
    for width in [400.0, 600.0, 900.0, 1200.0] {
        let layout = place_candles(&LayoutParams::for_width(width));
        let outer = layout.rings.first().map_or(0, |r| r.allocated);
        for inner in layout.rings.iter().skip(1) {
            assert!(
                outer >= inner.allocated,
                "width {}: {} < {}",
                width,
                outer,
                inner.allocated
            );
        }
    }
}

#[test]
fn candles_keep_clearance() {
    for width in [200.0, 320.0, 400.0, 600.0, 900.0, 1200.0] {
        let params = LayoutParams::for_width(width);
        let layout = place_candles(&params);
        if let Some(d) = min_distance_px(&layout, width) {
            assert!(
                d + 1e-3 >= layout.clearance_px,
                "width {}: {:.2}px < {:.2}px",
                width,
                d,
                layout.clearance_px
            );
        }
    }
}

#[test]
fn narrow_gap_packs_six_rings() {
    let params = LayoutParams {
        gap_min_px: 8.0,
        gap_max_px: 8.0,
        ..LayoutParams::for_width(600.0)
    };
    let layout = place_candles(&params);
    assert!((layout.clearance_px - 18.0).abs() < 1e-9);
    assert_eq!(layout.rings.len(), 6);
    assert_eq!(layout.candles.len(), CANDLE_COUNT);
    assert_eq!(layout.overflow(), 0);
    let d = min_distance_px(&layout, 600.0).unwrap_or(0.0);
    assert!(d + 1e-3 >= 18.0, "{:.2}", d);
    let outer = layout.rings[0].allocated;
    for (i, inner) in layout.rings.iter().enumerate().skip(1) {
        assert!(outer > inner.allocated, "ring {}: {} vs {}", i, inner.allocated, outer);
    }
}

#[test]
fn every_width_places_every_candle() {
    for width in 200..=1200 {
        let width = width as f64;
        let layout = place_candles(&LayoutParams::for_width(width));
        assert_eq!(layout.candles.len(), CANDLE_COUNT, "width {}", width);
        assert_eq!(layout.shortfall(), 0);
        if width >= 400.0 {
            assert_eq!(layout.overflow(), 0, "width {}", width);
        }
    }
}

#[test]
fn phone_width_overflows_only_past_capacity() {
    let layout = place_candles(&LayoutParams::for_width(320.0));
    assert_eq!(layout.candles.len(), CANDLE_COUNT);
    let capacity: usize = layout.rings.iter().map(|r| r.capacity).sum();
    assert_eq!(capacity, 48);
    assert_eq!(layout.overflow(), CANDLE_COUNT - capacity);
    for ring in &layout.rings {
        assert_eq!(ring.allocated, ring.capacity);
    }
    let flagged = layout.candles.iter().filter(|c| c.overflow).count();
    assert_eq!(flagged, layout.overflow());
    // Overflow candles come after every clearance-keeping one
    assert!(layout.candles[..capacity].iter().all(|c| !c.overflow));
}

#[test]
fn layout_is_deterministic() {
    let params = LayoutParams::for_width(537.0);
    let a = place_candles(&params);
    let b = place_candles(&params);
    assert_eq!(a.candles, b.candles);
    assert_eq!(a.rings, b.rings);
}

#[test]
fn appearance_cycles_by_index() {
    let layout = place_candles(&LayoutParams::for_width(600.0));
    for (i, c) in layout.candles.iter().enumerate() {
        assert_eq!(c.index, i);
        assert_eq!(c.color, CANDLE_PALETTE[i % CANDLE_PALETTE.len()]);
        assert_eq!(c.height_px, 26.0 + (i % 4) as f64 * 2.0);
        assert!((c.flicker_sec - (0.85 + (i % 5) as f64 * 0.08)).abs() < 1e-9);
    }
    assert_eq!(layout.candles[10].color, "#7B020B");
    assert_eq!(candle_color(&[], 3), "#FFFFFF");
}

#[test]
fn candles_sit_on_their_ring() {
    let params = LayoutParams::for_width(600.0);
    let layout = place_candles(&params);
    let [cx, cy] = params.center;
    for c in &layout.candles {
        let r = layout.rings[c.ring].radius_pct;
        let dx = (c.position.x as f64 - cx) / r;
        let dy = (c.position.y as f64 - cy) / (r * params.squash);
        assert!((dx * dx + dy * dy - 1.0).abs() < 1e-4);
    }
}

#[test]
fn small_counts_stay_on_the_outer_ring() {
    let four = place_candles(&LayoutParams {
        count: 4,
        ..LayoutParams::default()
    });
    assert_eq!(four.candles.len(), 4);
    assert!(four.candles.iter().all(|c| c.ring == 0));

    let one = place_candles(&LayoutParams {
        count: 1,
        ..LayoutParams::default()
    });
    assert_eq!(one.candles.len(), 1);

    let none = place_candles(&LayoutParams {
        count: 0,
        ..LayoutParams::default()
    });
    assert!(none.candles.is_empty());
    assert_eq!(none.shortfall(), 0);
}

#[test]
fn tiny_cake_still_places_every_candle() {
    for width in [1.0, 40.0, 100.0] {
        let layout = place_candles(&LayoutParams::for_width(width));
        assert_eq!(layout.candles.len(), CANDLE_COUNT, "width {}", width);
        assert_eq!(layout.shortfall(), 0);
        assert!(layout.overflow() > 0);
        if let Some(d) = min_distance_px(&layout, width) {
            assert!(d + 1e-3 >= layout.clearance_px);
        }
    }
}

#[test]
fn degenerate_width_places_nothing() {
    for width in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let layout = place_candles(&LayoutParams::for_width(width));
        assert!(layout.candles.is_empty());
        assert_eq!(layout.shortfall(), CANDLE_COUNT);
    }
}
