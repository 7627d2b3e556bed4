//! TCA8418 keypad matrix controller driver.
//!
//! Minimal register-level driver for the I²C keypad scanner: configure a
//! 4×4 matrix, then drain raw key events from the on-chip FIFO.  Event
//! byte format is decoded elsewhere ([`crate::keypad`]); this driver
//! moves bytes only.
//!
//! Generic over [`embedded_hal::i2c::I2c`], so the driver runs against
//! esp-idf-hal's `I2cDriver` on target and a scripted bus in tests.

use embedded_hal::i2c::I2c;

use crate::keypad::RawScanCode;

// Register map (datasheet §8.3).
const REG_CFG: u8 = 0x01;
const REG_INT_STAT: u8 = 0x02;
const REG_KEY_LCK_EC: u8 = 0x03;
const REG_KEY_EVENT_A: u8 = 0x04;
const REG_KP_GPIO1: u8 = 0x1D;
const REG_KP_GPIO2: u8 = 0x1E;

/// CFG: enable key-event interrupt generation.
const CFG_KE_IEN: u8 = 0x01;
/// INT_STAT: write-1-to-clear the key and GPIO interrupt flags.
const INT_STAT_CLEAR: u8 = 0x03;
/// Low nibble of KEY_LCK_EC is the FIFO event count.
const EVENT_COUNT_MASK: u8 = 0x0F;
/// On-chip FIFO depth — bounds the flush loop.
const FIFO_DEPTH: usize = 10;

pub struct Tca8418<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> Tca8418<I2C> {
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Configure a `rows`×`cols` matrix and flush any stale events.
    /// Fails if the controller does not acknowledge — callers treat that
    /// as fatal at startup.
    pub fn init(&mut self, rows: u8, cols: u8) -> Result<(), I2C::Error> {
        // Matrix pins: ROW0..ROWn-1 and COL0..COLn-1; everything else
        // stays GPIO.
        self.write_reg(REG_KP_GPIO1, mask(rows))?;
        self.write_reg(REG_KP_GPIO2, mask(cols))?;
        self.write_reg(REG_CFG, CFG_KE_IEN)?;
        self.flush()?;
        Ok(())
    }

    /// Pop one raw event from the FIFO, `None` when empty.
    pub fn next_event(&mut self) -> Result<Option<RawScanCode>, I2C::Error> {
        if self.read_reg(REG_KEY_LCK_EC)? & EVENT_COUNT_MASK == 0 {
            return Ok(None);
        }
        let raw = self.read_reg(REG_KEY_EVENT_A)?;
        if raw == 0 {
            return Ok(None);
        }
        Ok(Some(RawScanCode(raw)))
    }

    /// Drain the FIFO and clear the interrupt flags.
    pub fn flush(&mut self) -> Result<(), I2C::Error> {
        for _ in 0..FIFO_DEPTH {
            if self.read_reg(REG_KEY_EVENT_A)? == 0 {
                break;
            }
        }
        self.write_reg(REG_INT_STAT, INT_STAT_CLEAR)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.addr, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.addr, &[reg, value])
    }
}

/// Low-bit mask for the first `n` matrix pins.
fn mask(n: u8) -> u8 {
    (1u16 << n).wrapping_sub(1) as u8
}
