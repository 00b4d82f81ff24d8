//! SSD1306 OLED display wrapper.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use ring_my_phone::config::APP_TITLE;
use ring_my_phone::platform::StatusDisplay;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style(font: &'static MonoFont<'static>) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

/// Render the title bar, the status line (middle third) and the
/// action-bar hints for the two buttons.
pub fn draw_status<I2C>(display: &mut Display<I2C>, status: &str)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let _ = Text::new(APP_TITLE, Point::new(0, 10), text_style(&FONT_6X10)).draw(display);
    let _ = Line::new(Point::new(0, 13), Point::new(127, 13))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);

    let _ = Text::new(status, Point::new(0, 38), text_style(&FONT_10X20)).draw(display);

    let _ = Text::new("ring", Point::new(104, 10), text_style(&FONT_6X10)).draw(display);
    let _ = Text::new("stop", Point::new(104, 62), text_style(&FONT_6X10)).draw(display);

    let _ = display.flush();
}

/// `StatusDisplay` backed by the OLED. Every update redraws the screen.
pub struct OledStatus<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledStatus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { display: init(i2c) }
    }
}

impl<I2C> StatusDisplay for OledStatus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn set_text(&mut self, text: &'static str) {
        draw_status(&mut self.display, text);
    }
}
