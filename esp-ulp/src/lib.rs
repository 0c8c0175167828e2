//! # Control of the ESP32 ULP coprocessor
//!
//! ## Overview
//!
//! This crate exposes the FSM ULP ("ultra-low-power") coprocessor of the
//! ESP32 and ESP32-S3 on top of the ESP-IDF ULP, RTC GPIO and sleep drivers:
//!
//! - set the period of the ULP wakeup timer
//! - load a ULP program into RTC slow memory
//! - start the program
//! - prepare a GPIO for use by the ULP during deep sleep
//!
//! [`Ulp`] is the typed API. [`binding`] implements the dynamically typed
//! calling convention used by scripting runtimes on top of it.
//!
//! The vendor functions are reached through the [`UlpDriver`] trait. Enabling
//! a chip feature provides [`EspIdf`], which calls into ESP-IDF through
//! `esp-idf-sys` and expects the crate to be built for an ESP-IDF target with
//! `CONFIG_ULP_COPROC_ENABLED` set. Without a chip feature the crate builds
//! for the host, without any vendor symbols.
//!
//! ## Additional configuration
//!
//! We've exposed some configuration options that don't fit into cargo
//! features. These can be set via environment variables, or via cargo's `[env]`
//! section inside `.cargo/config.toml`. Below is a table of tunable parameters
//! for this crate:
#![doc = ""]
#![doc = include_str!(concat!(env!("OUT_DIR"), "/esp_ulp_config_table.md"))]
#![doc = ""]
//! ## Feature Flags
#![doc = document_features::document_features!()]
#![doc(html_logo_url = "https://avatars.githubusercontent.com/u/46717278")]
#![deny(missing_docs)]
#![no_std]

#[cfg(test)]
extern crate std;

// MUST be the first module
mod fmt;

pub mod binding;
pub mod driver;
mod error;
#[cfg(any(esp32, esp32s3))]
mod idf;
#[cfg(test)]
mod mock;
mod ulp;

pub(crate) mod private {
    pub trait Sealed {}
}

use esp_config::esp_config_int;

pub use self::{
    driver::UlpDriver,
    error::{ESP_OK, EspError, Error, UsageError},
    ulp::{Ulp, WORD_SIZE},
};
#[cfg(any(esp32, esp32s3))]
pub use self::idf::EspIdf;

/// Size in bytes of the RTC slow memory region reserved for the ULP program
/// and its data.
///
/// Set through `ESP_ULP_CONFIG_RESERVE_MEM`; it must match the ULP
/// reservation of the ESP-IDF build the crate is linked into.
pub const RESERVE_MEM: u32 = esp_config_int!(u32, "ESP_ULP_CONFIG_RESERVE_MEM");

/// The chip variant selected by cargo feature, `None` for host builds.
pub const CHIP: Option<&str> = option_env!("ESP_ULP_CHIP");
