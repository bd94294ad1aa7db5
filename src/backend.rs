//! Simulator window backend: owns the frame buffer and the SDL window.
//!
//! The simulator window has a fixed size and reports no resize events, so in
//! practice it only ever produces [`KioskEvent::Quit`], and `tracking` mode
//! keeps the startup size. A [`KioskEvent::Resize`] from any other source is
//! honoured through [`Surface::ensure_size`], which reallocates the frame
//! buffer to the kiosk's logical size.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::config::DisplayConfig;
use crate::kiosk::{KioskEvent, Surface};

/// Map a window event onto the loop's vocabulary. Anything else is dropped.
pub fn translate_event(event: SimulatorEvent) -> Option<KioskEvent> {
    match event {
        SimulatorEvent::Quit => Some(KioskEvent::Quit),
        SimulatorEvent::KeyDown { keycode: Keycode::Escape, .. } => Some(KioskEvent::Quit),
        _ => None,
    }
}

pub struct SimulatorBackend {
    display: SimulatorDisplay<Rgb888>,
    window: Window,
    presented: bool,
}

impl SimulatorBackend {
    pub fn new(config: &DisplayConfig) -> Self {
        let display = SimulatorDisplay::new(Size::new(config.width, config.height));
        let output_settings = OutputSettingsBuilder::new().scale(config.window_scale).build();
        let window = Window::new(&config.title, &output_settings);
        Self { display, window, presented: false }
    }

    /// Drain pending window events.
    ///
    /// The window only exists after its first update, so a blank frame is
    /// presented if nothing has been shown yet.
    pub fn poll_events(&mut self) -> Vec<KioskEvent> {
        if !self.presented {
            self.present();
        }
        self.window.events().filter_map(translate_event).collect()
    }

    pub fn present(&mut self) {
        self.window.update(&self.display);
        self.presented = true;
    }
}

impl Surface for SimulatorDisplay<Rgb888> {
    type Target = Self;

    fn ensure_size(&mut self, size: Size) {
        if self.size() != size {
            *self = Self::new(size);
        }
    }

    #[inline]
    fn target(&mut self) -> &mut Self { self }
}

impl Surface for SimulatorBackend {
    type Target = SimulatorDisplay<Rgb888>;

    #[inline]
    fn ensure_size(&mut self, size: Size) { self.display.ensure_size(size); }

    #[inline]
    fn target(&mut self) -> &mut Self::Target { &mut self.display }
}
