use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::OrbitError;

/// Fixed time-scale choices exposed by the speed panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedPreset {
    X1,
    X10,
    X100,
    X1000,
    X10000,
}

impl SpeedPreset {
    /// All presets, slowest first
    pub const ALL: [SpeedPreset; 5] = [
        SpeedPreset::X1,
        SpeedPreset::X10,
        SpeedPreset::X100,
        SpeedPreset::X1000,
        SpeedPreset::X10000,
    ];

    /// Multiplier applied to real elapsed time
    pub const fn multiplier(self) -> f64 {
        match self {
            SpeedPreset::X1 => 1.0,
            SpeedPreset::X10 => 10.0,
            SpeedPreset::X100 => 100.0,
            SpeedPreset::X1000 => 1000.0,
            SpeedPreset::X10000 => 10000.0,
        }
    }

    /// Button caption
    pub const fn label(self) -> &'static str {
        match self {
            SpeedPreset::X1 => "1x",
            SpeedPreset::X10 => "10x",
            SpeedPreset::X100 => "100x",
            SpeedPreset::X1000 => "1000x",
            SpeedPreset::X10000 => "10000x",
        }
    }

    /// Preset at position `index` in [`SpeedPreset::ALL`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Preset whose multiplier equals `multiplier` exactly
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.multiplier() == multiplier)
    }
}

/// Shared, externally writable speed multiplier.
///
/// Stored as raw f64 bits in an atomic so UI handlers and the frame loop can
/// hold separate handles. Writers go through [`SpeedControl::set`]; the frame
/// loop reads once per frame with [`SpeedControl::get`].
#[derive(Debug, Clone)]
pub struct SpeedControl {
    bits: Arc<AtomicU64>,
}

impl SpeedControl {
    /// Create a control holding `multiplier`
    pub fn new(multiplier: f64) -> Result<Self, OrbitError> {
        Self::check(multiplier)?;
        Ok(Self {
            bits: Arc::new(AtomicU64::new(multiplier.to_bits())),
        })
    }

    /// Current multiplier
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Overwrite the multiplier. Zero freezes the orbit, negative values reverse it.
    pub fn set(&self, multiplier: f64) -> Result<(), OrbitError> {
        Self::check(multiplier)?;
        self.bits.store(multiplier.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    /// Overwrite the multiplier with a preset value, returns true if it changed
    pub fn select(&self, preset: SpeedPreset) -> bool {
        let new_bits = preset.multiplier().to_bits();
        self.bits.swap(new_bits, Ordering::Relaxed) != new_bits
    }

    /// Preset matching the current multiplier, if any
    pub fn preset(&self) -> Option<SpeedPreset> {
        SpeedPreset::from_multiplier(self.get())
    }

    fn check(multiplier: f64) -> Result<(), OrbitError> {
        if multiplier.is_finite() {
            Ok(())
        } else {
            Err(OrbitError::NonFiniteSpeed(multiplier))
        }
    }
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(1.0f64.to_bits())),
        }
    }
}
