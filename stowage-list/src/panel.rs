//! Open/closed state of a filter drawer.

use std::fmt;
use std::sync::Arc;

pub type OpenChangeCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Drawer state, either self-governed or controlled by a parent.
///
/// With `external_open == None` the panel owns its state. Otherwise reads
/// always return the external value and `set_open` only reaches the parent
/// through the callback.
#[derive(Clone, Default)]
pub struct PanelState {
    open: bool,
    external_open: Option<bool>,
    on_open_change: Option<OpenChangeCallback>,
}

impl PanelState {
    pub fn new(external_open: Option<bool>, on_open_change: Option<OpenChangeCallback>) -> Self {
        Self {
            open: false,
            external_open,
            on_open_change,
        }
    }

    pub fn is_open(&self) -> bool {
        self.external_open.unwrap_or(self.open)
    }

    pub fn is_controlled(&self) -> bool {
        self.external_open.is_some()
    }

    /// Records `open` and returns the callback that should hear about it.
    /// Callers holding a lock invoke it after releasing that lock.
    pub fn request_open(&mut self, open: bool) -> Option<OpenChangeCallback> {
        self.open = open;
        self.on_open_change.clone()
    }

    /// Records `open` and reports it through the callback in either mode.
    pub fn set_open(&mut self, open: bool) {
        if let Some(callback) = self.request_open(open) {
            callback(open);
        }
    }

    pub fn toggle(&mut self) {
        let next = !self.is_open();
        self.set_open(next);
    }

    /// Parent-side update of the controlled value.
    pub fn set_external_open(&mut self, external_open: Option<bool>) {
        self.external_open = external_open;
    }

    /// Swaps the controlled value and callback, keeping the internal state.
    pub fn set_control(
        &mut self,
        external_open: Option<bool>,
        on_open_change: Option<OpenChangeCallback>,
    ) {
        self.external_open = external_open;
        self.on_open_change = on_open_change;
    }
}

impl fmt::Debug for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelState")
            .field("open", &self.open)
            .field("external_open", &self.external_open)
            .field("has_callback", &self.on_open_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording() -> (OpenChangeCallback, Arc<Mutex<Vec<bool>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: OpenChangeCallback = Arc::new(move |open| sink.lock().unwrap().push(open));
        (callback, seen)
    }

    #[test]
    fn test_uncontrolled_panel_tracks_itself() {
        let mut panel = PanelState::new(None, None);
        assert!(!panel.is_open());
        panel.set_open(true);
        assert!(panel.is_open());
        panel.toggle();
        assert!(!panel.is_open());
    }

    #[test]
    fn test_controlled_panel_ignores_internal_state() {
        let (callback, seen) = recording();
        let mut panel = PanelState::new(Some(false), Some(callback));
        panel.set_open(true);
        assert!(!panel.is_open());
        assert_eq!(*seen.lock().unwrap(), vec![true]);

        panel.set_external_open(Some(true));
        assert!(panel.is_open());
    }

    #[test]
    fn test_request_open_hands_back_callback_without_calling_it() {
        let (callback, seen) = recording();
        let mut panel = PanelState::new(None, Some(callback));
        let pending = panel.request_open(true).unwrap();
        assert!(seen.lock().unwrap().is_empty());
        pending(true);
        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_set_control_keeps_internal_state() {
        let mut panel = PanelState::new(None, None);
        panel.set_open(true);
        panel.set_control(Some(false), None);
        assert!(!panel.is_open());
        panel.set_control(None, None);
        assert!(panel.is_open());
    }

    #[test]
    fn test_callback_fires_when_uncontrolled() {
        let (callback, seen) = recording();
        let mut panel = PanelState::new(None, Some(callback));
        panel.set_open(true);
        panel.set_open(false);
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }
}
