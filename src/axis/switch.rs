//! Limit switch monitoring.
//!
//! The switch is wired with a pull-up: open reads high, pressed reads low.

use core::time::Duration;

use embedded_hal::digital::InputPin;

/// Debounced view of one limit switch.
///
/// With a zero minimum contact duration a single live read is trusted,
/// matching the original field wiring. A non-zero duration requires the
/// switch to stay pressed continuously that long before it counts as
/// triggered, filtering contact chatter.
pub struct LimitSwitch<PIN> {
    pin: PIN,
    min_contact: Duration,
    pressed_since: Option<Duration>,
}

impl<PIN: InputPin> LimitSwitch<PIN> {
    /// Wrap a pulled-up, active-low input pin.
    pub fn new(pin: PIN) -> Self {
        Self {
            pin,
            min_contact: Duration::ZERO,
            pressed_since: None,
        }
    }

    /// Require this much continuous contact before reporting triggered.
    pub fn with_min_contact(mut self, min_contact: Duration) -> Self {
        self.min_contact = min_contact;
        self
    }

    /// Raw electrical state: is the switch pressed right now?
    pub fn is_pressed(&mut self) -> Result<bool, PIN::Error> {
        self.pin.is_low()
    }

    /// Debounced trigger predicate.
    ///
    /// `now` comes from the control loop's clock; contact tracking resets
    /// whenever the switch reads open.
    pub fn triggered(&mut self, now: Duration) -> Result<bool, PIN::Error> {
        if !self.pin.is_low()? {
            self.pressed_since = None;
            return Ok(false);
        }

        let since = *self.pressed_since.get_or_insert(now);
        Ok(now.saturating_sub(since) >= self.min_contact)
    }

    /// Release the pin.
    pub fn into_inner(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_single_read_without_debounce() {
        let pin = PinMock::new(&[
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::Low),
        ]);
        let mut switch = LimitSwitch::new(pin);

        assert!(!switch.triggered(Duration::from_millis(0)).unwrap());
        assert!(switch.triggered(Duration::from_millis(1)).unwrap());

        switch.into_inner().done();
    }

    #[test]
    fn test_min_contact_filters_chatter() {
        let pin = PinMock::new(&[
            PinTransaction::get(PinState::Low),  // first contact
            PinTransaction::get(PinState::High), // bounce open
            PinTransaction::get(PinState::Low),  // contact again
            PinTransaction::get(PinState::Low),  // still pressed
        ]);
        let mut switch = LimitSwitch::new(pin).with_min_contact(Duration::from_millis(5));

        assert!(!switch.triggered(Duration::from_millis(0)).unwrap());
        assert!(!switch.triggered(Duration::from_millis(3)).unwrap());
        // Contact restarts the clock; 4 ms of continuous contact is not enough.
        assert!(!switch.triggered(Duration::from_millis(4)).unwrap());
        // 5 ms after the restart it counts.
        assert!(switch.triggered(Duration::from_millis(9)).unwrap());

        switch.into_inner().done();
    }
}
