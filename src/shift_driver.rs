//! Shift register setup for panels that need it before scanning.
//!
//! Plain shift register panels (ICN2037 and friends) work straight away.
//! FM6126A based panels stay dark until two configuration registers have
//! been written: register 1 sets the global brightness, register 2 turns the
//! outputs on. A register is selected by how many clocks LAT is held high at
//! the end of a row: 11 clocks for register 1, 12 for register 2.
//!
//! The writes are bit-banged on the colour, clock, latch and blank lines
//! before the pins are handed to the DMA driver.

use embedded_hal::digital::OutputPin;

/// Shift register chip on the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftDriver {
    /// Plain shift registers, nothing to configure.
    Generic,
    /// FM6126A, needs its configuration registers written once.
    Fm6126a,
}

impl ShiftDriver {
    pub const fn name(self) -> &'static str {
        match self {
            ShiftDriver::Generic => "generic",
            ShiftDriver::Fm6126a => "FM6126A",
        }
    }
}

/// FM6126A register 1: brightness bits, sent MSB first.
pub const FM6126A_REG1: u16 = 0b0000_0111_1111_1111;
/// FM6126A register 2: output enable bit, sent MSB first.
pub const FM6126A_REG2: u16 = 0b0000_0000_0100_0000;

const FM6126A_REG1_LATCH: usize = 11;
const FM6126A_REG2_LATCH: usize = 12;

/// Levels for one clock pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockStep {
    /// Level on all six colour lines.
    pub data: bool,
    /// Level on LAT.
    pub latch: bool,
}

/// Clock steps that shift one 16 bit register word into every driver chip
/// of a row, raising LAT for the last `latch_clocks` clocks.
#[derive(Clone, Debug)]
pub struct RegisterWrite {
    word: u16,
    cols: usize,
    latch_clocks: usize,
    col: usize,
}

impl RegisterWrite {
    pub const fn new(word: u16, cols: usize, latch_clocks: usize) -> Self {
        Self {
            word,
            cols,
            latch_clocks,
            col: 0,
        }
    }
}

impl Iterator for RegisterWrite {
    type Item = ClockStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.col >= self.cols {
            return None;
        }
        // each chip is 16 bits wide, so the word repeats along the row
        let bit = 15 - (self.col % 16);
        let step = ClockStep {
            data: self.word & (1 << bit) != 0,
            latch: self.col + self.latch_clocks >= self.cols,
        };
        self.col += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.cols.saturating_sub(self.col);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RegisterWrite {}

/// The complete FM6126A setup for a row of `cols` pixels: both registers,
/// then one latched row of zeros so the panel starts out blank.
pub const fn fm6126a_sequence(cols: usize) -> [RegisterWrite; 3] {
    [
        RegisterWrite::new(FM6126A_REG1, cols, FM6126A_REG1_LATCH),
        RegisterWrite::new(FM6126A_REG2, cols, FM6126A_REG2_LATCH),
        RegisterWrite::new(0, cols + 1, 1),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftDriverError<E> {
    /// The row is shorter than the longest latch sequence.
    RowTooShort { cols: usize },
    /// A pin refused to change level.
    Pin(E),
}

impl<E> From<E> for ShiftDriverError<E> {
    fn from(e: E) -> Self {
        ShiftDriverError::Pin(e)
    }
}

/// The HUB75 lines involved in a register write.
pub struct ShiftDriverPins<P> {
    /// R1, G1, B1, R2, G2, B2
    pub data: [P; 6],
    pub clock: P,
    pub latch: P,
    /// OE, active low
    pub blank: P,
}

impl<P: OutputPin> ShiftDriverPins<P> {
    /// Prepare the panel's shift registers for `driver`.
    ///
    /// Does nothing for [`ShiftDriver::Generic`]. The panel is blanked while
    /// the registers are written and enabled again afterwards.
    pub fn init(&mut self, driver: ShiftDriver, cols: usize) -> Result<(), ShiftDriverError<P::Error>> {
        match driver {
            ShiftDriver::Generic => Ok(()),
            ShiftDriver::Fm6126a => {
                if cols < FM6126A_REG2_LATCH {
                    return Err(ShiftDriverError::RowTooShort { cols });
                }
                debug!("writing FM6126A registers for {} columns", cols);
                self.blank.set_high()?;
                self.clock.set_low()?;
                self.latch.set_low()?;
                for register in fm6126a_sequence(cols) {
                    self.write(register)?;
                }
                self.blank.set_low()?;
                Ok(())
            }
        }
    }

    /// Clock out one register write and drop LAT afterwards.
    pub fn write(&mut self, register: RegisterWrite) -> Result<(), P::Error> {
        for step in register {
            for pin in self.data.iter_mut() {
                pin.set_state(step.data.into())?;
            }
            self.latch.set_state(step.latch.into())?;
            self.clock.set_high()?;
            self.clock.set_low()?;
        }
        self.latch.set_low()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use embedded_hal::digital::ErrorKind;
    use embedded_hal::digital::ErrorType;

    use super::*;

    /// Output pin that remembers every level it was set to.
    #[derive(Default)]
    struct MockPin {
        levels: Vec<bool>,
        broken: bool,
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.set(false)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.set(true)
        }
    }

    impl MockPin {
        fn set(&mut self, level: bool) -> Result<(), ErrorKind> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.levels.push(level);
            Ok(())
        }

        fn highs(&self) -> usize {
            self.levels.iter().filter(|l| **l).count()
        }
    }

    fn pins() -> ShiftDriverPins<MockPin> {
        ShiftDriverPins {
            data: Default::default(),
            clock: MockPin::default(),
            latch: MockPin::default(),
            blank: MockPin::default(),
        }
    }

    #[test]
    fn test_register_bits_are_msb_first() {
        let bits: Vec<bool> = RegisterWrite::new(FM6126A_REG2, 16, 0).map(|s| s.data).collect();
        let set: Vec<usize> = bits.iter().enumerate().filter(|(_, b)| **b).map(|(i, _)| i).collect();
        assert_eq!(set, [9]);

        let bits: Vec<bool> = RegisterWrite::new(FM6126A_REG1, 16, 0).map(|s| s.data).collect();
        assert!(bits[..5].iter().all(|b| !b));
        assert!(bits[5..].iter().all(|b| *b));
    }

    #[test]
    fn test_register_word_repeats_per_chip() {
        let steps: Vec<ClockStep> = RegisterWrite::new(FM6126A_REG1, 32, 0).collect();
        assert_eq!(steps.len(), 32);
        for i in 0..16 {
            assert_eq!(steps[i].data, steps[i + 16].data);
        }
    }

    #[test]
    fn test_latch_covers_the_row_tail() {
        let write = RegisterWrite::new(FM6126A_REG1, 32, 11);
        assert_eq!(write.len(), 32);
        let latched: Vec<usize> = write.enumerate().filter(|(_, s)| s.latch).map(|(i, _)| i).collect();
        assert_eq!(latched, (21..32).collect::<Vec<_>>());

        let latched = RegisterWrite::new(FM6126A_REG2, 32, 12).filter(|s| s.latch).count();
        assert_eq!(latched, 12);
    }

    #[test]
    fn test_sequence_ends_with_blank_row() {
        let [_, _, blank] = fm6126a_sequence(32);
        let steps: Vec<ClockStep> = blank.collect();
        assert_eq!(steps.len(), 33);
        assert!(steps.iter().all(|s| !s.data));
        assert_eq!(steps.iter().filter(|s| s.latch).count(), 1);
        assert!(steps[32].latch);
    }

    #[test]
    fn test_generic_driver_touches_nothing() {
        let mut pins = pins();
        pins.init(ShiftDriver::Generic, 32).unwrap();
        assert!(pins.clock.levels.is_empty());
        assert!(pins.blank.levels.is_empty());
    }

    #[test]
    fn test_fm6126a_init_pin_activity() {
        let mut pins = pins();
        pins.init(ShiftDriver::Fm6126a, 32).unwrap();

        let clocks = 32 + 32 + 33;
        // one initial low, then a high and a low per clock
        assert_eq!(pins.clock.levels.len(), 1 + 2 * clocks);
        assert_eq!(pins.clock.highs(), clocks);

        // 11 + 12 + 1 latched clocks
        assert_eq!(pins.latch.highs(), 24);
        assert_eq!(pins.latch.levels.last(), Some(&false));

        for pin in &pins.data {
            assert_eq!(pin.levels.len(), clocks);
            // 11 ones per chip in register 1, one in register 2, two chips
            assert_eq!(pin.highs(), 2 * 11 + 2);
        }

        assert_eq!(pins.blank.levels, [true, false]);
    }

    #[test]
    fn test_short_row_is_rejected() {
        let mut pins = pins();
        assert_eq!(
            pins.init(ShiftDriver::Fm6126a, 8),
            Err(ShiftDriverError::RowTooShort { cols: 8 })
        );
        assert!(pins.blank.levels.is_empty());
    }

    #[test]
    fn test_pin_errors_propagate() {
        let mut pins = pins();
        pins.data[3].broken = true;
        assert_eq!(
            pins.init(ShiftDriver::Fm6126a, 32),
            Err(ShiftDriverError::Pin(ErrorKind::Other))
        );
        // stopped on the very first clock
        assert_eq!(pins.clock.levels.len(), 1);
    }
}
