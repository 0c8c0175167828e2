//! # Control the ULP coprocessor
//!
//! ## Overview
//!
//! The FSM ULP coprocessor of the ESP32 and ESP32-S3 runs small programs out
//! of RTC slow memory, periodically woken by a hardware timer, while the main
//! CPU is in deep sleep.
//!
//! [`Ulp`] is the process-wide handle to it. All operations are blocking
//! calls into the ESP-IDF driver; a non-zero status is returned as an
//! [`EspError`] carrying the code unchanged.
//!
//! The handle has no state of its own, and nothing serializes access to the
//! coprocessor: callers on different threads must coordinate themselves.
//!
//! ## Examples
//! ```rust, ignore
//! use esp_ulp::{EspIdf, Ulp};
//!
//! // `include_bytes!` only guarantees byte alignment; the driver reads the
//! // program as 32-bit words.
//! #[repr(C, align(4))]
//! struct Aligned<T: ?Sized>(T);
//!
//! // Assembled ULP program, with `entry` at byte offset 8.
//! static PROGRAM: &Aligned<[u8]> = &Aligned(*include_bytes!("ulp_main.bin"));
//!
//! let ulp = Ulp::<EspIdf>::get();
//! ulp.init_gpio(4);
//! ulp.set_wakeup_period(0, 20_000)?;
//! ulp.load_binary(0, &PROGRAM.0)?;
//! ulp.run(8)?;
//! ```

use crate::{
    EspError,
    driver::{PowerDomain, PowerOption, RtcGpioMode, UlpDriver},
};

/// Size of a ULP instruction (and of the units of ULP program memory) in
/// bytes.
pub const WORD_SIZE: u32 = 4;

/// The ULP coprocessor, reached through the driver `D`.
///
/// The only handles are the ones returned by [`Ulp::get`]. Drivers can't be
/// implemented outside this crate:
///
/// ```rust, compile_fail
/// use esp_ulp::{Ulp, UlpDriver};
///
/// struct Passthrough;
///
/// impl UlpDriver for Passthrough {
///     fn handle() -> &'static Ulp<Self> {
///         unimplemented!()
///     }
///     // ...
/// }
/// ```
///
/// and handles can't be created around an existing driver either:
///
/// ```rust, compile_fail
/// use esp_ulp::{Ulp, UlpDriver};
///
/// fn second_handle<D: UlpDriver>(driver: D) -> Ulp<D> {
///     Ulp::bind(driver)
/// }
/// ```
pub struct Ulp<D: UlpDriver> {
    driver: D,
}

impl<D: UlpDriver> Ulp<D> {
    /// Binds a driver to a handle, for the `static` returned by
    /// [`UlpDriver::handle`].
    pub(crate) const fn bind(driver: D) -> Self {
        Self { driver }
    }

    /// Returns the ULP handle.
    ///
    /// Disables the ROM code's logging output after waking from deep sleep,
    /// which would otherwise run on every wakeup the ULP triggers. This
    /// happens on every call.
    pub fn get() -> &'static Self {
        let ulp = D::handle();
        ulp.driver.disable_rom_logging();
        debug!("ROM logging after deep sleep disabled");
        ulp
    }

    /// Sets the period of wakeup timer slot `period_index` to `period_us`
    /// microseconds.
    pub fn set_wakeup_period(&self, period_index: usize, period_us: u32) -> Result<(), EspError> {
        trace!("Setting wakeup period {} to {} us", period_index, period_us);
        EspError::check(self.driver.set_wakeup_period(period_index, period_us))
            .inspect_err(|err| warn!("Setting wakeup period {} failed: {}", period_index, err))
    }

    /// Loads `program_binary` into ULP program memory at byte offset
    /// `load_addr`.
    ///
    /// The binary is loaded as whole 32-bit words: a trailing partial word
    /// is not loaded.
    ///
    /// `program_binary` must start on a 4-byte boundary, since the driver
    /// reads it word by word. `include_bytes!` data needs an aligned wrapper
    /// (see the [module documentation](self)).
    pub fn load_binary(&self, load_addr: u32, program_binary: &[u8]) -> Result<(), EspError> {
        if program_binary.as_ptr().align_offset(WORD_SIZE as usize) != 0 {
            warn!("ULP program at {:#x} is not word aligned", program_binary.as_ptr() as usize);
        }

        let word_count = program_binary.len() / WORD_SIZE as usize;
        debug!("Loading {} words at {}", word_count, load_addr);
        EspError::check(self.driver.load_binary(load_addr, program_binary, word_count))
            .inspect_err(|err| warn!("Loading ULP program failed: {}", err))
    }

    /// Starts the program at byte offset `entry_point`.
    ///
    /// The offset is truncated to a whole word.
    pub fn run(&self, entry_point: u32) -> Result<(), EspError> {
        let word = entry_point / WORD_SIZE;
        debug!("Starting ULP at word {}", word);
        EspError::check(self.driver.run(word))
            .inspect_err(|err| warn!("Starting ULP failed: {}", err))
    }

    /// Hands `gpio_num` to the RTC domain as a floating input whose
    /// configuration is held through deep sleep, and keeps the RTC
    /// peripherals powered in deep sleep so the ULP can read it.
    ///
    /// This never fails: a non-zero status from any of the steps is logged
    /// and the remaining steps still run.
    pub fn init_gpio(&self, gpio_num: i32) {
        trace!("Configuring GPIO{} for the ULP", gpio_num);

        let driver = &self.driver;
        report(gpio_num, "rtc_gpio_init", driver.rtc_gpio_init(gpio_num));
        report(
            gpio_num,
            "rtc_gpio_set_direction",
            driver.rtc_gpio_set_direction(gpio_num, RtcGpioMode::InputOnly),
        );
        report(gpio_num, "rtc_gpio_pulldown_dis", driver.rtc_gpio_pulldown_dis(gpio_num));
        report(gpio_num, "rtc_gpio_pullup_dis", driver.rtc_gpio_pullup_dis(gpio_num));
        report(gpio_num, "rtc_gpio_hold_en", driver.rtc_gpio_hold_en(gpio_num));
        report(
            gpio_num,
            "esp_sleep_pd_config",
            driver.sleep_pd_config(PowerDomain::RtcPeriph, PowerOption::On),
        );
    }
}

impl<D: UlpDriver> core::fmt::Debug for Ulp<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Ulp")
    }
}

fn report(gpio_num: i32, call: &'static str, status: i32) {
    if let Some(err) = EspError::from(status) {
        warn!("{} for GPIO{} failed: {}", call, gpio_num, err);
    }
}
