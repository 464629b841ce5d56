use std::time::Duration;

use high_striker_core::{normalize, ChargeSnapshot};

/// Click-driven charge bounded to `[0, max_charge]`.
#[derive(Clone, Debug)]
pub(crate) struct ChargeState {
    charge: f32,
    max_charge: f32,
    click_count: u32,
    charge_per_click: f32,
}

impl ChargeState {
    pub(crate) const fn new(max_charge: f32, charge_per_click: f32) -> Self {
        Self {
            charge: 0.0,
            max_charge,
            click_count: 0,
            charge_per_click,
        }
    }

    pub(crate) fn register_click(&mut self) {
        self.click_count = self.click_count.saturating_add(1);
        self.charge = (self.charge + self.charge_per_click).clamp(0.0, self.max_charge);
    }

    /// Drains charge at `rate` units per second. Returns whether the charge changed.
    pub(crate) fn decay(&mut self, rate: f32, dt: Duration) -> bool {
        if rate <= 0.0 || self.charge <= 0.0 {
            return false;
        }
        let drained = rate * dt.as_secs_f32();
        self.charge = (self.charge - drained).clamp(0.0, self.max_charge);
        drained > 0.0
    }

    pub(crate) fn reset(&mut self) {
        self.charge = 0.0;
        self.click_count = 0;
    }

    pub(crate) fn set_charge_per_click(&mut self, charge_per_click: f32) {
        self.charge_per_click = charge_per_click;
    }

    pub(crate) const fn charge_per_click(&self) -> f32 {
        self.charge_per_click
    }

    pub(crate) const fn click_count(&self) -> u32 {
        self.click_count
    }

    pub(crate) fn normalized(&self) -> f32 {
        normalize(self.charge, self.max_charge)
    }

    pub(crate) const fn snapshot(&self) -> ChargeSnapshot {
        ChargeSnapshot {
            charge: self.charge,
            max_charge: self.max_charge,
            click_count: self.click_count,
            charge_per_click: self.charge_per_click,
        }
    }
}
