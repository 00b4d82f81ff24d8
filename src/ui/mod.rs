//! User interface subsystem - OLED status line + two physical buttons.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C, title + status text
//! - **Buttons**: 2 tactile switches with debouncing (UP = ring, DOWN = silence)

pub mod buttons;
pub mod display;
