use std::{env, error::Error};

use esp_config::{Validator, Value, generate_config};

macro_rules! assert_unique_features {
    ($($feature:literal),+ $(,)?) => {
        assert!(
            (0 $(+ cfg!(feature = $feature) as usize)+ ) <= 1,
            "Exactly zero or one of the following features must be enabled: {}",
            [$($feature),+].join(", ")
        );
    };
}

/// Chips with an FSM ULP coprocessor driven through `ulp_load_binary` and
/// `ulp_run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chip {
    Esp32,
    Esp32s3,
}

impl Chip {
    const ALL: [Chip; 2] = [Chip::Esp32, Chip::Esp32s3];

    fn from_cargo_feature() -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|chip| env::var_os(format!("CARGO_FEATURE_{}", chip.name().to_uppercase())).is_some())
    }

    fn name(self) -> &'static str {
        match self {
            Chip::Esp32 => "esp32",
            Chip::Esp32s3 => "esp32s3",
        }
    }

    /// Default of `CONFIG_<CHIP>_ULP_COPROC_RESERVE_MEM` in ESP-IDF.
    fn default_reserve_mem(self) -> i128 {
        match self {
            Chip::Esp32 | Chip::Esp32s3 => 512,
        }
    }

    /// Largest reservation the RTC slow memory allows on this chip.
    fn max_reserve_mem(self) -> i128 {
        match self {
            Chip::Esp32 | Chip::Esp32s3 => 8176,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Log and defmt are mutually exclusive features.
    assert_unique_features!("log-04", "defmt");
    assert_unique_features!("esp32", "esp32s3");

    for chip in Chip::ALL {
        println!("cargo:rustc-check-cfg=cfg({})", chip.name());
    }

    // Host builds (no chip selected) use the ESP32 limits.
    let chip = Chip::from_cargo_feature();
    if let Some(chip) = chip {
        println!("cargo:rustc-cfg={}", chip.name());
        println!("cargo:rustc-env=ESP_ULP_CHIP={}", chip.name());
    }
    let limits = chip.unwrap_or(Chip::Esp32);
    let max = limits.max_reserve_mem();

    generate_config(
        "esp_ulp",
        &[(
            "reserve-mem",
            "Bytes of RTC slow memory reserved for the ULP coprocessor program \
            and its data. Must match `CONFIG_ESP32_ULP_COPROC_RESERVE_MEM` \
            (or `CONFIG_ESP32S3_ULP_COPROC_RESERVE_MEM`) of the ESP-IDF build this \
            crate is linked into.",
            Value::Integer(limits.default_reserve_mem()),
            Some(Validator::Custom(Box::new(move |value: &Value| match value {
                Value::Integer(bytes) if (32..=max).contains(bytes) && bytes % 4 == 0 => Ok(()),
                Value::Integer(bytes) => Err(esp_config::Error::validation(format!(
                    "Expected a multiple of 4 in range 32..={max}, found {bytes}"
                ))),
                _ => Err(esp_config::Error::validation("Expected an integer")),
            }))),
        )],
        true,
    );

    Ok(())
}
