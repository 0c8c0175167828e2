//! # The ESP-IDF calls behind the ULP object
//!
//! ## Overview
//!
//! [`UlpDriver`] lists every vendor SDK function the adapter forwards to.
//! Each method maps one-to-one onto an ESP-IDF C function and returns its
//! `esp_err_t` unchanged; interpreting the status is left to
//! [`Ulp`](crate::Ulp).
//!
//! On target the implementation is [`EspIdf`](crate::EspIdf). The trait is
//! sealed: every handle in existence is one this crate created, so the ROM
//! logging switch in [`Ulp::get`](crate::Ulp::get) can't be bypassed.

use crate::{Ulp, private::Sealed};

/// Mode of an RTC GPIO, mirrors `rtc_gpio_mode_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcGpioMode {
    /// Pad input.
    InputOnly,
    /// Pad output.
    OutputOnly,
    /// Pad input and output.
    InputOutput,
    /// Pad neither input nor output.
    Disabled,
    /// Pad open-drain output.
    OutputOd,
    /// Pad input and open-drain output.
    InputOutputOd,
}

/// Power domain that can be kept powered during deep sleep, mirrors
/// `esp_sleep_pd_domain_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerDomain {
    /// RTC IO, sensors and the ULP coprocessor.
    RtcPeriph,
    /// XTAL oscillator.
    Xtal,
}

/// Power-down option for a [`PowerDomain`], mirrors `esp_sleep_pd_option_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerOption {
    /// Power down the domain in deep sleep.
    Off,
    /// Keep the domain powered in deep sleep.
    On,
    /// Keep the domain powered only if needed by a wakeup source.
    Auto,
}

/// The vendor SDK surface used by [`Ulp`].
///
/// Methods returning `i32` return the raw `esp_err_t` of the underlying
/// call.
pub trait UlpDriver: Sealed + Sync + Sized + 'static {
    /// The process-wide ULP handle bound to this driver.
    ///
    /// Implementations return a reference to their own `static` handle, so
    /// every call yields the same one.
    fn handle() -> &'static Ulp<Self>;

    /// `esp_deep_sleep_disable_rom_logging`
    fn disable_rom_logging(&self);

    /// `ulp_set_wakeup_period`
    fn set_wakeup_period(&self, period_index: usize, period_us: u32) -> i32;

    /// `ulp_load_binary`
    ///
    /// `word_count` is the program size in 32-bit words, at most
    /// `program.len() / 4`.
    fn load_binary(&self, load_addr: u32, program: &[u8], word_count: usize) -> i32;

    /// `ulp_run`, with `entry_point` as a word index.
    fn run(&self, entry_point: u32) -> i32;

    /// `rtc_gpio_init`
    fn rtc_gpio_init(&self, gpio_num: i32) -> i32;

    /// `rtc_gpio_set_direction`
    fn rtc_gpio_set_direction(&self, gpio_num: i32, mode: RtcGpioMode) -> i32;

    /// `rtc_gpio_pulldown_dis`
    fn rtc_gpio_pulldown_dis(&self, gpio_num: i32) -> i32;

    /// `rtc_gpio_pullup_dis`
    fn rtc_gpio_pullup_dis(&self, gpio_num: i32) -> i32;

    /// `rtc_gpio_hold_en`
    fn rtc_gpio_hold_en(&self, gpio_num: i32) -> i32;

    /// `esp_sleep_pd_config`
    fn sleep_pd_config(&self, domain: PowerDomain, option: PowerOption) -> i32;
}
