//! `critical-section` implementation for the single-core Cortex-R5F
//!
//! Masks IRQs through the CPSR I bit. FIQs are left alone; nothing in this
//! firmware runs in FIQ context.

use core::arch::asm;

use critical_section::RawRestoreState;

/// CPSR IRQ mask bit
const CPSR_I: u32 = 1 << 7;

struct CortexRCriticalSection;

critical_section::set_impl!(CortexRCriticalSection);

unsafe impl critical_section::Impl for CortexRCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let cpsr: u32;
        // No `nomem`: the asm doubles as a compiler barrier
        asm!("mrs {0}, cpsr", "cpsid i", out(reg) cpsr, options(nostack, preserves_flags));
        // true when IRQs were enabled on entry
        cpsr & CPSR_I == 0
    }

    unsafe fn release(irqs_were_enabled: RawRestoreState) {
        if irqs_were_enabled {
            asm!("cpsie i", options(nostack, preserves_flags));
        }
    }
}
