//! HALCoGen-backed vendor driver
//!
//! Binds the [`vendor`](crate::vendor) traits to the C library generated by
//! HALCoGen for the TMS570LC43x. The library must be linked into the final
//! image and its startup code (`_c_int00`) must have run `systemInit`
//! before any of these drivers are used.
//!
//! Register addresses follow `HL_reg_gio.h`, `HL_reg_sci.h` and
//! `HL_reg_rti.h` for the LC43x family.

#![allow(unsafe_code)]

use core::ptr::{addr_of, addr_of_mut, read_volatile, write_volatile};
use core::sync::atomic::{AtomicBool, Ordering};

use nexus_hal::{Port, UartInstance};

use crate::vendor::{GioDriver, RtiDriver, SciDriver};

/// GIO port register block (`gioPORT_t`)
#[repr(C)]
#[allow(dead_code)]
pub struct GioPortRegs {
    dir: u32,
    din: u32,
    dout: u32,
    dset: u32,
    dclr: u32,
    pdr: u32,
    puldis: u32,
    psl: u32,
}

/// SCI/LIN register block (`sciBASE_t`), up to the data registers
#[repr(C)]
#[allow(dead_code)]
pub struct SciRegs {
    gcr0: u32,
    gcr1: u32,
    gcr2: u32,
    setint: u32,
    clearint: u32,
    setintlvl: u32,
    clearintlvl: u32,
    flr: u32,
    intvect0: u32,
    intvect1: u32,
    format: u32,
    brs: u32,
    ed: u32,
    rd: u32,
    td: u32,
}

/// RTI register block (`rtiBASE_t`), counter block 0 only
#[repr(C)]
#[allow(dead_code)]
struct RtiRegs {
    gctrl: u32,
    tbctrl: u32,
    capctrl: u32,
    compctrl: u32,
    frc0: u32,
    uc0: u32,
    cpuc0: u32,
}

const GIO_PORTA: *mut GioPortRegs = 0xFFF7_BC34 as *mut GioPortRegs;
const GIO_PORTB: *mut GioPortRegs = 0xFFF7_BC54 as *mut GioPortRegs;

/// LIN1 in SCI mode, routed to the XDS110 virtual COM port
const SCI_REG1: *mut SciRegs = 0xFFF7_E400 as *mut SciRegs;
/// LIN2 in SCI mode
const SCI_REG2: *mut SciRegs = 0xFFF7_E600 as *mut SciRegs;

const RTI_REG1: *mut RtiRegs = 0xFFFF_FC00 as *mut RtiRegs;

/// RTIGCTRL: counter block 0 enable
const RTI_GCTRL_CNT0EN: u32 = 1 << 0;

/// FRC0 rate programmed when startup left the prescaler at zero
const RTI_DEFAULT_HZ: u32 = 1_000_000;

#[allow(non_snake_case)]
mod ffi {
    use super::{GioPortRegs, SciRegs};

    extern "C" {
        pub fn gioInit();
        pub fn gioSetBit(port: *mut GioPortRegs, bit: u32, value: u32);
        pub fn gioToggleBit(port: *mut GioPortRegs, bit: u32);
        pub fn gioGetBit(port: *mut GioPortRegs, bit: u32) -> u32;

        pub fn sciInit();
        pub fn sciSend(sci: *mut SciRegs, length: u32, data: *mut u8);
        pub fn sciReceive(sci: *mut SciRegs, length: u32, data: *mut u8);
    }
}

/// Clock tree as configured in the HALCoGen project
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clocks {
    /// CPU clock (GCLK1)
    pub gclk_hz: u32,
    /// Peripheral clock feeding the SCI baud generators
    pub vclk_hz: u32,
    /// RTI module clock
    pub rticlk_hz: u32,
}

impl Default for Clocks {
    /// LAUNCHXL2-570LC43 defaults: 300 MHz core, 75 MHz VCLK/RTICLK
    fn default() -> Self {
        Self {
            gclk_hz: 300_000_000,
            vclk_hz: 75_000_000,
            rticlk_hz: 75_000_000,
        }
    }
}

static TAKEN: AtomicBool = AtomicBool::new(false);

/// All HALCoGen-backed drivers
pub struct Halcogen {
    pub gio: HalcogenGio,
    pub sci: HalcogenSci,
    pub rti: HalcogenRti,
}

impl Halcogen {
    /// Take the drivers; returns `None` after the first call
    pub fn take(clocks: Clocks) -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self {
            gio: HalcogenGio { _private: () },
            sci: HalcogenSci {
                vclk_hz: clocks.vclk_hz,
            },
            rti: HalcogenRti {
                rticlk_hz: clocks.rticlk_hz,
            },
        })
    }
}

/// Port handle (`gioPORT_t *`)
#[derive(Clone, Copy)]
pub struct GioPortHandle(*mut GioPortRegs);

/// GIO driver over `HL_gio.c`
pub struct HalcogenGio {
    _private: (),
}

impl GioDriver for HalcogenGio {
    type Port = GioPortHandle;

    fn init(&mut self) {
        // SAFETY: HALCoGen function with no arguments; only touches GIO
        unsafe { ffi::gioInit() }
    }

    fn port(&self, port: Port) -> Option<GioPortHandle> {
        match port {
            Port::A => Some(GioPortHandle(GIO_PORTA)),
            Port::B => Some(GioPortHandle(GIO_PORTB)),
        }
    }

    fn set_direction(&mut self, port: GioPortHandle, mask: u32, output: bool) {
        // SAFETY: handle points at a GIO port block; single execution context
        unsafe {
            let dir = addr_of_mut!((*port.0).dir);
            let value = read_volatile(dir);
            let value = if output { value | mask } else { value & !mask };
            write_volatile(dir, value);
        }
    }

    fn set_bit(&mut self, port: GioPortHandle, bit: u32, value: u32) {
        // SAFETY: valid port handle, bit < 8
        unsafe { ffi::gioSetBit(port.0, bit, value) }
    }

    fn toggle_bit(&mut self, port: GioPortHandle, bit: u32) {
        // SAFETY: valid port handle, bit < 8
        unsafe { ffi::gioToggleBit(port.0, bit) }
    }

    fn get_bit(&mut self, port: GioPortHandle, bit: u32) -> u32 {
        // SAFETY: valid port handle, bit < 8
        unsafe { ffi::gioGetBit(port.0, bit) }
    }

    fn output_bit(&mut self, port: GioPortHandle, bit: u32) -> u32 {
        // SAFETY: valid port handle; DOUT is a plain read
        let dout = unsafe { read_volatile(addr_of!((*port.0).dout)) };
        (dout >> bit) & 1
    }
}

/// SCI handle (`sciBASE_t *`)
#[derive(Clone, Copy)]
pub struct SciHandle(*mut SciRegs);

/// SCI driver over `HL_sci.c`
pub struct HalcogenSci {
    vclk_hz: u32,
}

impl SciDriver for HalcogenSci {
    type Sci = SciHandle;

    fn init(&mut self) {
        // SAFETY: HALCoGen function with no arguments; configures every
        // SCI/LIN channel enabled in the project
        unsafe { ffi::sciInit() }
    }

    fn sci(&self, instance: UartInstance) -> Option<SciHandle> {
        match instance {
            UartInstance::Uart1 => Some(SciHandle(SCI_REG1)),
            UartInstance::Uart2 => Some(SciHandle(SCI_REG2)),
            UartInstance::Uart3 | UartInstance::Uart4 => None,
        }
    }

    fn baudrate(&self, sci: SciHandle) -> u32 {
        // SAFETY: valid SCI handle; BRS is a plain read
        let brs = unsafe { read_volatile(addr_of!((*sci.0).brs)) };
        // Asynchronous mode, 16x oversampling: VCLK / (16 * (P + 1) + M)
        let prescaler = brs & 0x00FF_FFFF;
        let fraction = (brs >> 24) & 0x0F;
        let divisor = 16 * (u64::from(prescaler) + 1) + u64::from(fraction);
        ((u64::from(self.vclk_hz) + divisor / 2) / divisor) as u32
    }

    fn send(&mut self, sci: SciHandle, data: &[u8]) {
        // SAFETY: sciSend only reads `data`; the C prototype is not const
        unsafe { ffi::sciSend(sci.0, data.len() as u32, data.as_ptr() as *mut u8) }
    }

    fn receive(&mut self, sci: SciHandle, buf: &mut [u8]) {
        // SAFETY: `buf` is valid for `buf.len()` writes
        unsafe { ffi::sciReceive(sci.0, buf.len() as u32, buf.as_mut_ptr()) }
    }

    fn flags(&self, sci: SciHandle) -> u32 {
        // SAFETY: valid SCI handle; reading FLR has no side effects
        unsafe { read_volatile(addr_of!((*sci.0).flr)) }
    }
}

/// RTI counter block 0
pub struct HalcogenRti {
    rticlk_hz: u32,
}

impl RtiDriver for HalcogenRti {
    fn start_counter(&mut self) {
        // SAFETY: RTI block address is fixed; CPUC0 and GCTRL are
        // read-modify-written from this driver only
        unsafe {
            let cpuc0 = addr_of_mut!((*RTI_REG1).cpuc0);
            if read_volatile(cpuc0) == 0 {
                let prescale = (self.rticlk_hz / RTI_DEFAULT_HZ).max(2) - 1;
                write_volatile(cpuc0, prescale);
            }
            let gctrl = addr_of_mut!((*RTI_REG1).gctrl);
            write_volatile(gctrl, read_volatile(gctrl) | RTI_GCTRL_CNT0EN);
        }
    }

    fn counter(&self) -> u32 {
        // SAFETY: FRC0 is read-only from our side
        unsafe { read_volatile(addr_of!((*RTI_REG1).frc0)) }
    }

    fn counter_hz(&self) -> u32 {
        // SAFETY: CPUC0 is a plain read
        let cpuc0 = unsafe { read_volatile(addr_of!((*RTI_REG1).cpuc0)) };
        // CPUC0 == 0 divides by 2^32
        let divider = if cpuc0 == 0 {
            1u64 << 32
        } else {
            u64::from(cpuc0) + 1
        };
        (u64::from(self.rticlk_hz) / divider) as u32
    }
}
