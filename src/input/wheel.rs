use egui::Modifiers;

use crate::controller::Intent;

/// Scales text with the mouse wheel while a modifier combination is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelAdapter {
    modifiers: Modifiers,
}

impl WheelAdapter {
    pub fn new(modifiers: Modifiers) -> Self {
        Self { modifiers }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Scrolling up scales up, scrolling down scales down. Nothing happens
    /// without the required modifiers or for a zero delta.
    pub fn intent(&self, delta_y: f32, held: Modifiers) -> Option<Intent> {
        if !held.matches_logically(self.modifiers) {
            return None;
        }
        if delta_y > 0.0 {
            Some(Intent::ScaleUp)
        } else if delta_y < 0.0 {
            Some(Intent::ScaleDown)
        } else {
            None
        }
    }

    pub fn intent_for_event(&self, event: &egui::Event) -> Option<Intent> {
        match event {
            egui::Event::MouseWheel {
                delta, modifiers, ..
            } => self.intent(delta.y, *modifiers),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        let wheel = WheelAdapter::new(Modifiers::CTRL);
        assert_eq!(wheel.intent(1.0, Modifiers::CTRL), Some(Intent::ScaleUp));
        assert_eq!(wheel.intent(-3.5, Modifiers::CTRL), Some(Intent::ScaleDown));
        assert_eq!(wheel.intent(0.0, Modifiers::CTRL), None);
    }

    #[test]
    fn test_requires_modifier() {
        let wheel = WheelAdapter::new(Modifiers::CTRL);
        assert_eq!(wheel.intent(1.0, Modifiers::NONE), None);
        assert_eq!(wheel.intent(1.0, Modifiers::ALT), None);
        assert_eq!(
            wheel.intent(1.0, Modifiers::CTRL | Modifiers::SHIFT),
            Some(Intent::ScaleUp)
        );
    }

    #[test]
    fn test_ignores_other_events() {
        let wheel = WheelAdapter::new(Modifiers::CTRL);
        assert_eq!(wheel.intent_for_event(&egui::Event::Copy), None);
    }
}
