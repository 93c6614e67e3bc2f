use super::constants::*;
use glam::Vec2;
use std::f64::consts::PI;

/// Geometry and appearance inputs for one layout pass.
///
/// Radii and the center are in percent of the cake element; sizes are in
/// CSS pixels. `squash` flattens the vertical axis of every ring.
#[derive(Clone, Debug)]
pub struct LayoutParams {
    pub count: usize,
    pub width_px: f64,
    pub center: [f64; 2],
    pub outer_pct: f64,
    pub inner_pct: f64,
    pub squash: f64,
    pub candle_px: f64,
    pub gap_ratio: f64,
    pub gap_min_px: f64,
    pub gap_max_px: f64,
    pub palette: &'static [&'static str],
}

impl LayoutParams {
    /// Page defaults for a cake of the given rendered width.
    pub fn for_width(width_px: f64) -> Self {
        Self {
            width_px,
            ..Self::default()
        }
    }

    /// Minimum center-to-center distance between two candles, in px.
    pub fn clearance_px(&self) -> f64 {
        let gap = (self.width_px * self.gap_ratio).clamp(self.gap_min_px, self.gap_max_px);
        self.candle_px + gap
    }

    /// Radial distance between neighbouring rings, in percent.
    pub fn ring_step_pct(&self) -> f64 {
        let clearance_pct = self.clearance_px() / self.width_px * 100.0;
        clearance_pct / self.squash * RING_STEP_SLACK
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            count: CANDLE_COUNT,
            width_px: 600.0,
            center: [CENTER_X_PCT, CENTER_Y_PCT],
            outer_pct: RING_OUTER_PCT,
            inner_pct: RING_INNER_PCT,
            squash: SQUASH,
            candle_px: CANDLE_PX,
            gap_ratio: GAP_RATIO,
            gap_min_px: GAP_MIN_PX,
            gap_max_px: GAP_MAX_PX,
            palette: &CANDLE_PALETTE,
        }
    }
}

/// One placed candle. Everything but the position is a function of `index`.
#[derive(Clone, Debug, PartialEq)]
pub struct Candle {
    pub index: usize,
    pub ring: usize,
    pub position: Vec2,
    /// Placed by an overflow walk; clearance is not kept for these.
    pub overflow: bool,
    pub color: &'static str,
    pub height_px: f64,
    pub flicker_sec: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub radius_pct: f64,
    pub capacity: usize,
    pub allocated: usize,
    pub overflow: usize,
}

#[derive(Clone, Debug)]
pub struct Layout {
    pub candles: Vec<Candle>,
    pub rings: Vec<Ring>,
    pub clearance_px: f64,
    pub requested: usize,
}

impl Layout {
    /// Candles that were not placed. Only a zero, negative or non-finite
    /// width produces no rings at all; any other width places every candle.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.candles.len())
    }

    /// Candles that only fit once the clearance was relaxed.
    pub fn overflow(&self) -> usize {
        self.rings.iter().map(|r| r.overflow).sum()
    }
}

/// Ring radii from the outer bound down to the inner bound, inclusive.
pub fn ring_radii(outer_pct: f64, inner_pct: f64, step_pct: f64) -> Vec<f64> {
    let mut radii = Vec::new();
    if !(step_pct.is_finite() && step_pct > 0.0) {
        return radii;
    }
    let mut r = outer_pct;
    while r >= inner_pct {
        radii.push(r);
        r -= step_pct;
    }
    radii
}

/// How many candles fit on a ring at equal angular spacing.
///
/// Starts from the squashed circumference divided by the clearance, then
/// backs off until the chord between neighbours keeps the clearance too.
pub fn ring_capacity(radius_pct: f64, width_px: f64, squash: f64, clearance_px: f64) -> usize {
    let squashed_px = radius_pct / 100.0 * width_px * squash;
    let raw = (2.0 * PI * squashed_px / clearance_px).floor();
    if !raw.is_finite() || raw < 1.0 {
        return 0;
    }
    let mut n = raw as usize;
    while n > 1 && 2.0 * squashed_px * (PI / n as f64).sin() < clearance_px {
        n -= 1;
    }
    n
}

/// Slots per ring for an overflow walk: circumference over clearance with
/// no chord check, and never fewer than one.
pub fn overflow_slots(radius_pct: f64, width_px: f64, squash: f64, clearance_px: f64) -> usize {
    let squashed_px = radius_pct / 100.0 * width_px * squash;
    let raw = (2.0 * PI * squashed_px / clearance_px).floor();
    if raw.is_finite() && raw >= 1.0 {
        raw as usize
    } else {
        1
    }
}

pub fn candle_color(palette: &[&'static str], index: usize) -> &'static str {
    palette
        .get(index % palette.len().max(1))
        .copied()
        .unwrap_or("#FFFFFF")
}

pub fn candle_height_px(index: usize) -> f64 {
    CANDLE_HEIGHT_BASE_PX + (index % CANDLE_HEIGHT_BUCKETS) as f64 * CANDLE_HEIGHT_STEP_PX
}

pub fn flicker_sec(index: usize) -> f64 {
    FLICKER_BASE_SEC + (index % FLICKER_BUCKETS) as f64 * FLICKER_STEP_SEC
}

/// Balanced allocation: spread the remaining count over the rings left,
/// leaving headroom on inner rings and avoiding 1-2 candle rings.
fn balanced_allocation(count: usize, capacities: &[usize]) -> (Vec<usize>, usize) {
    let mut alloc = vec![0usize; capacities.len()];
    let mut remaining = count;
    for (i, &capacity) in capacities.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if capacity < 1 {
            continue;
        }
        let usable = if i > 0 {
            (capacity as f64 * INNER_RING_DENSITY).floor() as usize
        } else {
            capacity
        };
        let rings_left = capacities.len() - i;
        let target = remaining.div_ceil(rings_left);
        let mut n = target.min(usable).min(remaining);
        if n < MIN_RING_FILL && remaining >= MIN_RING_FILL && usable >= MIN_RING_FILL {
            n = MIN_RING_FILL;
        }
        alloc[i] = n;
        remaining -= n;
    }
    (alloc, remaining)
}

/// Top rings up to full capacity, outermost first, until nothing remains.
fn fill_remainder(alloc: &mut [usize], capacities: &[usize], mut remaining: usize) -> usize {
    for (slot, &capacity) in alloc.iter_mut().zip(capacities) {
        if remaining == 0 {
            break;
        }
        let extra = capacity.saturating_sub(*slot).min(remaining);
        *slot += extra;
        remaining -= extra;
    }
    remaining
}

#[derive(Clone, Copy, Debug)]
struct OverflowWalk {
    ring: usize,
    slots: usize,
    take: usize,
    pass: usize,
}

/// Walk the rings outer to inner again and again, each walk adding up to
/// `slots[ring]` evenly spaced candles per ring, until nothing remains.
fn overflow_walks(slots: &[usize], mut remaining: usize) -> Vec<OverflowWalk> {
    let mut walks = Vec::new();
    let mut pass = 1;
    while remaining > 0 && !slots.is_empty() {
        for (ring, &n) in slots.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let take = n.max(1).min(remaining);
            walks.push(OverflowWalk {
                ring,
                slots: n.max(1),
                take,
                pass,
            });
            remaining -= take;
        }
        pass += 1;
    }
    walks
}

fn place_on_ring(
    params: &LayoutParams,
    candles: &mut Vec<Candle>,
    ring: usize,
    radius_pct: f64,
    slots: usize,
    take: usize,
    pass: usize,
) {
    if slots == 0 {
        return;
    }
    let [cx, cy] = params.center;
    let step = 2.0 * PI / slots as f64;
    let base = if ring % 2 == 1 { step / 2.0 } else { step / 3.0 };
    // Overflow walks are rotated off the spots of earlier passes
    let offset = base + pass as f64 * step / 4.0;
    for k in 0..take.min(slots) {
        let a = offset + k as f64 * step;
        let x = cx + radius_pct * a.cos();
        let y = cy + radius_pct * params.squash * a.sin();
        let index = candles.len();
        candles.push(Candle {
            index,
            ring,
            position: Vec2::new(x as f32, y as f32),
            overflow: pass > 0,
            color: candle_color(params.palette, index),
            height_px: candle_height_px(index),
            flicker_sec: flicker_sec(index),
        });
    }
}

/// Place `params.count` candles on concentric elliptical rings.
///
/// The balanced pass and the remainder fill keep the clearance. Whatever
/// still does not fit is stacked on by overflow walks, so every candle is
/// placed for any positive finite width.
pub fn place_candles(params: &LayoutParams) -> Layout {
    let clearance_px = params.clearance_px();
    let radii = if params.width_px.is_finite() && params.width_px > 0.0 {
        ring_radii(params.outer_pct, params.inner_pct, params.ring_step_pct())
    } else {
        Vec::new()
    };
    let capacities: Vec<usize> = radii
        .iter()
        .map(|&r| ring_capacity(r, params.width_px, params.squash, clearance_px))
        .collect();

    let (mut alloc, remaining) = balanced_allocation(params.count, &capacities);
    let remaining = fill_remainder(&mut alloc, &capacities, remaining);

    let slots: Vec<usize> = radii
        .iter()
        .map(|&r| overflow_slots(r, params.width_px, params.squash, clearance_px))
        .collect();
    let walks = overflow_walks(&slots, remaining);

    let mut candles = Vec::with_capacity(params.count);
    for (ring, (&r, &n)) in radii.iter().zip(&alloc).enumerate() {
        place_on_ring(params, &mut candles, ring, r, n, n, 0);
    }
    let mut overflow = vec![0usize; radii.len()];
    for walk in &walks {
        if let (Some(&r), Some(count)) = (radii.get(walk.ring), overflow.get_mut(walk.ring)) {
            place_on_ring(params, &mut candles, walk.ring, r, walk.slots, walk.take, walk.pass);
            *count += walk.take;
        }
    }

    let rings = radii
        .into_iter()
        .zip(capacities)
        .zip(alloc)
        .zip(overflow)
        .map(|(((radius_pct, capacity), allocated), overflow)| Ring {
            radius_pct,
            capacity,
            allocated,
            overflow,
        })
        .collect();

    Layout {
        candles,
        rings,
        clearance_px,
        requested: params.count,
    }
}
