//! Authoritative in-memory pixel store.
//!
//! One `RwLock` guards all state. Writers hold the write lock across the whole
//! lookup-then-mutate sequence, so two placements at the same location can
//! never both survive; readers always see a complete write or none of it.

use std::collections::{BTreeMap, HashMap};

use foundation::{GeoBounds, LatLng, MonotonicClock, Seq, SeqGen, haversine_km};
use parking_lot::RwLock;
use tracing::debug;

use crate::location::LocationKey;
use crate::pixel::{NewPixel, Pixel, PixelId};
use crate::stats::CanvasStats;

/// Erase tolerance (degrees, per axis) when no pixel sits at the exact key.
pub const PROXIMITY_RADIUS_DEG: f64 = 0.001;

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Default)]
pub struct PixelStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Live pixels in insertion order.
    pixels: BTreeMap<Seq, Pixel>,
    by_id: HashMap<PixelId, Seq>,
    by_location: HashMap<LocationKey, Seq>,
    seq: SeqGen,
    clock: MonotonicClock,
}

impl Inner {
    fn insert(&mut self, new: NewPixel) -> Pixel {
        let key = LocationKey::of(new.position());
        if let Some(old) = self.by_location.get(&key).copied() {
            if let Some(replaced) = self.remove(old) {
                debug!(%key, old = %replaced.id, "overwriting pixel");
            }
        }

        let seq = self.seq.next();
        let pixel = new.into_pixel(PixelId::new(), self.clock.now());
        self.by_id.insert(pixel.id, seq);
        self.by_location.insert(key, seq);
        self.pixels.insert(seq, pixel.clone());
        pixel
    }

    fn remove(&mut self, seq: Seq) -> Option<Pixel> {
        let pixel = self.pixels.remove(&seq)?;
        self.by_id.remove(&pixel.id);
        let key = LocationKey::of(pixel.position());
        if self.by_location.get(&key) == Some(&seq) {
            self.by_location.remove(&key);
        }
        Some(pixel)
    }

    /// Pixel stored at the 6-decimal key of `at`.
    fn find_exact(&self, at: LatLng) -> Option<Seq> {
        // NaN would round to the (0, 0) key.
        if !at.lat.is_finite() || !at.lng.is_finite() {
            return None;
        }
        self.by_location.get(&LocationKey::of(at)).copied()
    }

    /// Nearest pixel within [`PROXIMITY_RADIUS_DEG`] of `at` on both axes.
    /// Ties go to the older pixel.
    fn find_near(&self, at: LatLng) -> Option<Seq> {
        if !at.lat.is_finite() || !at.lng.is_finite() {
            return None;
        }
        let mut best: Option<(Seq, f64)> = None;
        for (seq, p) in &self.pixels {
            let near = (p.latitude - at.lat).abs() <= PROXIMITY_RADIUS_DEG
                && (p.longitude - at.lng).abs() <= PROXIMITY_RADIUS_DEG;
            if !near {
                continue;
            }
            let d = haversine_km(p.position(), at);
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((*seq, d));
            }
        }
        if best.is_some() {
            debug!(lat = at.lat, lng = at.lng, "erase matched by proximity");
        }
        best.map(|(seq, _)| seq)
    }

    /// Newest first. `placed_at` never decreases with insertion order, so
    /// reverse insertion order is `placed_at` descending with later
    /// insertions winning ties.
    fn recent(&self, limit: usize) -> Vec<Pixel> {
        self.pixels.values().rev().take(limit).cloned().collect()
    }
}

impl PixelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pixel, replacing whatever occupied its 6-decimal location.
    pub fn create_pixel(&self, new: NewPixel) -> Pixel {
        self.inner.write().insert(new)
    }

    /// Remove the pixel at (or within tolerance of) a location.
    pub fn delete_pixel_at(&self, latitude: f64, longitude: f64) -> bool {
        let at = LatLng::new(latitude, longitude);
        self.erase_near(&[at], at).is_some()
    }

    /// Under one write lock: remove the pixel stored exactly at the first
    /// matching key in `exact`, or failing that the pixel nearest `near`.
    pub fn erase_near(&self, exact: &[LatLng], near: LatLng) -> Option<Pixel> {
        let mut inner = self.inner.write();
        let seq = exact
            .iter()
            .find_map(|at| inner.find_exact(*at))
            .or_else(|| inner.find_near(near))?;
        let removed = inner.remove(seq);
        if let Some(p) = &removed {
            debug!(id = %p.id, "erased pixel");
        }
        removed
    }

    /// Pixels inside the box, edges inclusive. A box with `west > east`
    /// (antimeridian crossing) yields nothing.
    pub fn pixels_in_bounds(&self, bounds: GeoBounds) -> Vec<Pixel> {
        if bounds.crosses_antimeridian() {
            return Vec::new();
        }
        self.inner
            .read()
            .pixels
            .values()
            .filter(|p| bounds.contains(p.position()))
            .cloned()
            .collect()
    }

    pub fn get_pixels_in_bounds(
        &self,
        north_lat: f64,
        south_lat: f64,
        east_lng: f64,
        west_lng: f64,
    ) -> Vec<Pixel> {
        self.pixels_in_bounds(GeoBounds::new(north_lat, south_lat, east_lng, west_lng))
    }

    /// Snapshot of every live pixel, oldest first.
    pub fn all_pixels(&self) -> Vec<Pixel> {
        self.inner.read().pixels.values().cloned().collect()
    }

    pub fn get(&self, id: PixelId) -> Option<Pixel> {
        let inner = self.inner.read();
        let seq = inner.by_id.get(&id)?;
        inner.pixels.get(seq).cloned()
    }

    pub fn pixel_count(&self) -> usize {
        self.inner.read().pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub fn recent_pixels(&self, limit: usize) -> Vec<Pixel> {
        self.inner.read().recent(limit)
    }

    /// Tight box around all pixels; the whole world when empty.
    pub fn extent(&self) -> GeoBounds {
        let inner = self.inner.read();
        GeoBounds::enclosing(inner.pixels.values().map(Pixel::position))
    }

    /// Count and recent list taken from one consistent snapshot.
    pub fn stats(&self, recent_limit: usize) -> CanvasStats {
        let inner = self.inner.read();
        CanvasStats::new(inner.pixels.len(), inner.recent(recent_limit))
    }
}
