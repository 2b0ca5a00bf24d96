//! Simulated HALCoGen driver
//!
//! Register-level stand-ins for the vendor library so the HAL and the
//! application can be exercised on the host. Only the behaviour the HAL
//! relies on is modelled: GIO DIR/DOUT/DIN, SCI transmit capture, receive
//! queue and flag register, and a free-running RTI counter.

use core::cell::Cell;

use heapless::{Deque, Vec};
use nexus_hal::{Level, Pin, Port, UartInstance};

use crate::vendor::{flr, GioDriver, RtiDriver, SciDriver};

/// Bytes captured per simulated SCI channel
pub const SIM_TX_CAPACITY: usize = 512;

/// Bytes that can be queued for reception per channel
pub const SIM_RX_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default)]
struct SimPort {
    dir: u32,
    dout: u32,
    /// Level driven onto input pins by the outside world
    external: u32,
}

/// Simulated GIO module
#[derive(Debug, Clone)]
pub struct SimGio {
    ports: [Option<SimPort>; 2],
    init_count: u32,
    register_writes: u32,
}

impl Default for SimGio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimGio {
    /// GIO with both ports present
    pub fn new() -> Self {
        Self::with_ports(&Port::ALL)
    }

    /// GIO with only the given ports present
    pub fn with_ports(present: &[Port]) -> Self {
        let mut ports = [None; 2];
        for port in present {
            ports[port.as_u8() as usize] = Some(SimPort::default());
        }
        Self {
            ports,
            init_count: 0,
            register_writes: 0,
        }
    }

    /// Number of times `gioInit` ran
    pub fn init_count(&self) -> u32 {
        self.init_count
    }

    /// Number of register writes performed so far
    pub fn register_writes(&self) -> u32 {
        self.register_writes
    }

    /// DIR register of a port, `None` if the port is absent
    pub fn dir(&self, port: Port) -> Option<u32> {
        self.ports[port.as_u8() as usize].map(|p| p.dir)
    }

    /// DOUT register of a port, `None` if the port is absent
    pub fn dout(&self, port: Port) -> Option<u32> {
        self.ports[port.as_u8() as usize].map(|p| p.dout)
    }

    /// Drive an input line from outside the chip
    pub fn drive_input(&mut self, port: Port, pin: Pin, level: Level) {
        if let Some(p) = self.ports[port.as_u8() as usize].as_mut() {
            if level.is_high() {
                p.external |= pin.mask();
            } else {
                p.external &= !pin.mask();
            }
        }
    }

    fn regs(&mut self, port: usize) -> &mut SimPort {
        self.register_writes += 1;
        // Handles only come from `port()`, which checked presence
        self.ports[port].get_or_insert_with(SimPort::default)
    }
}

impl GioDriver for SimGio {
    type Port = usize;

    fn init(&mut self) {
        self.init_count += 1;
        self.register_writes += 1;
        for port in self.ports.iter_mut().flatten() {
            port.dir = 0;
            port.dout = 0;
        }
    }

    fn port(&self, port: Port) -> Option<usize> {
        let index = port.as_u8() as usize;
        self.ports[index].map(|_| index)
    }

    fn set_direction(&mut self, port: usize, mask: u32, output: bool) {
        let regs = self.regs(port);
        if output {
            regs.dir |= mask;
        } else {
            regs.dir &= !mask;
        }
    }

    fn set_bit(&mut self, port: usize, bit: u32, value: u32) {
        let regs = self.regs(port);
        if value != 0 {
            regs.dout |= 1 << bit;
        } else {
            regs.dout &= !(1 << bit);
        }
    }

    fn toggle_bit(&mut self, port: usize, bit: u32) {
        let regs = self.regs(port);
        regs.dout ^= 1 << bit;
    }

    fn get_bit(&mut self, port: usize, bit: u32) -> u32 {
        let Some(regs) = self.ports[port] else {
            return 0;
        };
        let mask = 1 << bit;
        let din = (regs.dout & regs.dir) | (regs.external & !regs.dir);
        (din & mask) >> bit
    }

    fn output_bit(&mut self, port: usize, bit: u32) -> u32 {
        self.ports[port].map_or(0, |regs| (regs.dout >> bit) & 1)
    }
}

#[derive(Debug, Default)]
struct SimChannel {
    tx: Vec<u8, SIM_TX_CAPACITY>,
    rx: Deque<u8, SIM_RX_CAPACITY>,
}

/// Simulated SCI/LIN modules
///
/// By default `Uart1` and `Uart2` are present, matching the HALCoGen
/// project for the LaunchPad.
#[derive(Debug)]
pub struct SimSci {
    channels: [Option<SimChannel>; UartInstance::COUNT],
    baudrate: u32,
    init_count: u32,
    send_calls: u32,
}

impl Default for SimSci {
    fn default() -> Self {
        Self::new()
    }
}

impl SimSci {
    /// Channels present on the LaunchPad configuration
    pub fn new() -> Self {
        Self::with_instances(&[UartInstance::Uart1, UartInstance::Uart2])
    }

    /// Only the given instances are present
    pub fn with_instances(present: &[UartInstance]) -> Self {
        let mut channels: [Option<SimChannel>; UartInstance::COUNT] = Default::default();
        for instance in present {
            channels[instance.index()] = Some(SimChannel::default());
        }
        Self {
            channels,
            baudrate: 115_200,
            init_count: 0,
            send_calls: 0,
        }
    }

    /// Change the baud rate the "generated configuration" programs
    pub fn with_baudrate(mut self, baudrate: u32) -> Self {
        self.baudrate = baudrate;
        self
    }

    /// Number of times `sciInit` ran
    pub fn init_count(&self) -> u32 {
        self.init_count
    }

    /// Number of `sciSend` calls
    pub fn send_calls(&self) -> u32 {
        self.send_calls
    }

    /// Everything transmitted on an instance so far
    pub fn transmitted(&self, instance: UartInstance) -> &[u8] {
        self.channels[instance.index()]
            .as_ref()
            .map_or(&[], |ch| ch.tx.as_slice())
    }

    /// Queue bytes as if they arrived on the wire
    ///
    /// Bytes beyond the receive capacity are dropped (overrun).
    pub fn inject_rx(&mut self, instance: UartInstance, data: &[u8]) {
        if let Some(ch) = self.channels[instance.index()].as_mut() {
            for &byte in data {
                if ch.rx.push_back(byte).is_err() {
                    break;
                }
            }
        }
    }
}

impl SciDriver for SimSci {
    type Sci = usize;

    fn init(&mut self) {
        self.init_count += 1;
    }

    fn sci(&self, instance: UartInstance) -> Option<usize> {
        let index = instance.index();
        self.channels[index].as_ref().map(|_| index)
    }

    fn baudrate(&self, _sci: usize) -> u32 {
        self.baudrate
    }

    fn send(&mut self, sci: usize, data: &[u8]) {
        self.send_calls += 1;
        if let Some(ch) = self.channels[sci].as_mut() {
            // Capture is truncated at capacity
            let room = SIM_TX_CAPACITY - ch.tx.len();
            let _ = ch.tx.extend_from_slice(&data[..data.len().min(room)]);
        }
    }

    fn receive(&mut self, sci: usize, buf: &mut [u8]) {
        // Real hardware blocks until data arrives; the HAL only calls this
        // once RX_READY is set, so an empty queue reads as zero here
        if let Some(ch) = self.channels[sci].as_mut() {
            for slot in buf.iter_mut() {
                *slot = ch.rx.pop_front().unwrap_or(0);
            }
        }
    }

    fn flags(&self, sci: usize) -> u32 {
        let mut flags = flr::TX_READY | flr::TX_EMPTY;
        if self.channels[sci].as_ref().is_some_and(|ch| !ch.rx.is_empty()) {
            flags |= flr::RX_READY;
        }
        flags
    }
}

/// Simulated RTI counter
///
/// Each read of the counter advances it by `step` ticks, so busy-waits
/// against it always terminate.
#[derive(Debug)]
pub struct SimRti {
    now: Cell<u32>,
    step: u32,
    hz: u32,
    started: bool,
    reads: Cell<u32>,
}

impl SimRti {
    /// Counter at `hz`, advancing `step` ticks per read
    pub fn new(hz: u32, step: u32) -> Self {
        Self {
            now: Cell::new(0),
            step,
            hz,
            started: false,
            reads: Cell::new(0),
        }
    }

    /// Start the counter at an arbitrary value (e.g. just before wrapping)
    pub fn starting_at(self, value: u32) -> Self {
        self.now.set(value);
        self
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of counter reads
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    /// Current counter value without advancing it
    pub fn peek(&self) -> u32 {
        self.now.get()
    }
}

impl RtiDriver for SimRti {
    fn start_counter(&mut self) {
        self.started = true;
    }

    fn counter(&self) -> u32 {
        let value = self.now.get();
        self.reads.set(self.reads.get() + 1);
        if self.started {
            self.now.set(value.wrapping_add(self.step));
        }
        value
    }

    fn counter_hz(&self) -> u32 {
        self.hz
    }
}
