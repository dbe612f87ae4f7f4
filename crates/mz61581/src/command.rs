// MZ61581 / R61581 command definitions

// Standard DCS commands shared with ILI9341 and friends
pub const SLEEP_IN: u8 = 0x10; // Enter sleep mode
pub const SLEEP_OUT: u8 = 0x11; // Exit sleep mode
pub const DISPLAY_OFF: u8 = 0x28; // Display off
pub const DISPLAY_ON: u8 = 0x29; // Display on
pub const SET_COLUMN_ADDRESS: u8 = 0x2A; // Set X window (column address set)
pub const SET_PAGE_ADDRESS: u8 = 0x2B; // Set Y window (page address set)
pub const MEMORY_WRITE: u8 = 0x2C; // Write pixels into the window
pub const TEARING_EFFECT_ON: u8 = 0x35; // Tearing effect line on
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36; // MADCTL
pub const PIXEL_FORMAT_SET: u8 = 0x3A; // COLMOD
pub const SET_TEAR_SCANLINE: u8 = 0x44; // Tearing effect scanline

// Manufacturer commands (payloads captured with a logic analyzer)
pub const COMMAND_ACCESS_PROTECT: u8 = 0xB0;
pub const FRAME_MEMORY_ACCESS: u8 = 0xB3;
pub const PANEL_DRIVING: u8 = 0xC0;
pub const DISPLAY_TIMING_NORMAL: u8 = 0xC1;
pub const FRAME_RATE_INVERSION: u8 = 0xC4;
pub const INTERFACE_CONTROL: u8 = 0xC6;
pub const GAMMA_SETTING: u8 = 0xC8;
pub const POWER_SETTING: u8 = 0xD0;
pub const VCOM_CONTROL: u8 = 0xD1;
pub const POWER_SETTING_NORMAL: u8 = 0xD2;

// COLMOD payload: DPI=16bits/pixel, DBI=16bits/pixel
pub const PIXEL_FORMAT_RGB565: u8 = 0x55;

// Timing
pub const RESET_SETTLE_MS: u32 = 120; // Per reset pin transition
pub const SLEEP_OUT_SETTLE_MS: u32 = 300; // Between SLEEP_OUT and DISPLAY_ON during init
pub const SLEEP_TOGGLE_SETTLE_MS: u32 = 120; // Minimum gap around sleep in/out at runtime
