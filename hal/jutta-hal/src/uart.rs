//! UART serial communication abstractions
//!
//! Provides non-blocking traits for serial communication that can be
//! implemented by chip-specific HALs, plus an adapter for peripherals that
//! already implement the `embedded-io` traits.

use embedded_io::{Read, ReadReady, Write, WriteReady};

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write as many bytes of `data` as the peripheral accepts right now
    ///
    /// Returns the number of bytes taken. `Ok(0)` means the TX FIFO is
    /// full; the caller retries later. Never blocks.
    fn try_write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read whatever is already buffered into `buf`
    ///
    /// Returns the number of bytes read; `Ok(0)` when nothing is pending.
    /// Never blocks.
    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte if one is pending
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.try_read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// Non-blocking wrapper around an `embedded-io` serial port
///
/// Readiness is checked before every transfer so the wrapped port's
/// blocking `read`/`write` never actually wait.
#[derive(Debug)]
pub struct IoUart<T> {
    inner: T,
}

impl<T> IoUart<T> {
    /// Wrap a serial port
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Access the wrapped port
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Unwrap the serial port
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write + WriteReady> UartTx for IoUart<T> {
    type Error = T::Error;

    fn try_write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        if data.is_empty() || !self.inner.write_ready()? {
            return Ok(0);
        }
        self.inner.write(data)
    }
}

impl<T: Read + ReadReady> UartRx for IoUart<T> {
    type Error = T::Error;

    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !self.inner.read_ready()? {
            return Ok(0);
        }
        self.inner.read(buf)
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// Service port settings of JUTTA machines (9600 8N1)
    pub const JUTTA: Self = Self {
        baudrate: 9600,
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::JUTTA
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
