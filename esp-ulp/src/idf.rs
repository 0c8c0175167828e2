//! ESP-IDF backed [`UlpDriver`].
//!
//! The bindings come from `esp-idf-sys`, which needs `CONFIG_ULP_COPROC_ENABLED`
//! in the sdkconfig of the firmware for the `ulp_*` functions to be generated.

use esp_idf_sys::{
    esp_deep_sleep_disable_rom_logging,
    esp_sleep_pd_config,
    esp_sleep_pd_domain_t,
    esp_sleep_pd_domain_t_ESP_PD_DOMAIN_RTC_PERIPH,
    esp_sleep_pd_domain_t_ESP_PD_DOMAIN_XTAL,
    esp_sleep_pd_option_t,
    esp_sleep_pd_option_t_ESP_PD_OPTION_AUTO,
    esp_sleep_pd_option_t_ESP_PD_OPTION_OFF,
    esp_sleep_pd_option_t_ESP_PD_OPTION_ON,
    rtc_gpio_hold_en,
    rtc_gpio_init,
    rtc_gpio_mode_t,
    rtc_gpio_mode_t_RTC_GPIO_MODE_DISABLED,
    rtc_gpio_mode_t_RTC_GPIO_MODE_INPUT_ONLY,
    rtc_gpio_mode_t_RTC_GPIO_MODE_INPUT_OUTPUT,
    rtc_gpio_mode_t_RTC_GPIO_MODE_INPUT_OUTPUT_OD,
    rtc_gpio_mode_t_RTC_GPIO_MODE_OUTPUT_OD,
    rtc_gpio_mode_t_RTC_GPIO_MODE_OUTPUT_ONLY,
    rtc_gpio_pulldown_dis,
    rtc_gpio_pullup_dis,
    rtc_gpio_set_direction,
    ulp_load_binary,
    ulp_run,
    ulp_set_wakeup_period,
};

use crate::{
    Ulp,
    driver::{PowerDomain, PowerOption, RtcGpioMode, UlpDriver},
    private::Sealed,
};

/// The ULP, RTC GPIO and sleep drivers of ESP-IDF.
///
/// Not constructible outside this crate; use
/// [`Ulp::<EspIdf>::get`](Ulp::get).
#[derive(Debug)]
pub struct EspIdf {
    _private: (),
}

static ULP: Ulp<EspIdf> = Ulp::bind(EspIdf { _private: () });

const fn rtc_gpio_mode(mode: RtcGpioMode) -> rtc_gpio_mode_t {
    match mode {
        RtcGpioMode::InputOnly => rtc_gpio_mode_t_RTC_GPIO_MODE_INPUT_ONLY,
        RtcGpioMode::OutputOnly => rtc_gpio_mode_t_RTC_GPIO_MODE_OUTPUT_ONLY,
        RtcGpioMode::InputOutput => rtc_gpio_mode_t_RTC_GPIO_MODE_INPUT_OUTPUT,
        RtcGpioMode::Disabled => rtc_gpio_mode_t_RTC_GPIO_MODE_DISABLED,
        RtcGpioMode::OutputOd => rtc_gpio_mode_t_RTC_GPIO_MODE_OUTPUT_OD,
        RtcGpioMode::InputOutputOd => rtc_gpio_mode_t_RTC_GPIO_MODE_INPUT_OUTPUT_OD,
    }
}

const fn pd_domain(domain: PowerDomain) -> esp_sleep_pd_domain_t {
    match domain {
        PowerDomain::RtcPeriph => esp_sleep_pd_domain_t_ESP_PD_DOMAIN_RTC_PERIPH,
        PowerDomain::Xtal => esp_sleep_pd_domain_t_ESP_PD_DOMAIN_XTAL,
    }
}

const fn pd_option(option: PowerOption) -> esp_sleep_pd_option_t {
    match option {
        PowerOption::Off => esp_sleep_pd_option_t_ESP_PD_OPTION_OFF,
        PowerOption::On => esp_sleep_pd_option_t_ESP_PD_OPTION_ON,
        PowerOption::Auto => esp_sleep_pd_option_t_ESP_PD_OPTION_AUTO,
    }
}

impl Sealed for EspIdf {}

impl UlpDriver for EspIdf {
    fn handle() -> &'static Ulp<Self> {
        &ULP
    }

    fn disable_rom_logging(&self) {
        unsafe { esp_deep_sleep_disable_rom_logging() }
    }

    fn set_wakeup_period(&self, period_index: usize, period_us: u32) -> i32 {
        unsafe { ulp_set_wakeup_period(period_index, period_us) }
    }

    fn load_binary(&self, load_addr: u32, program: &[u8], word_count: usize) -> i32 {
        // The driver reads `word_count * 4` bytes, which never exceeds the slice.
        unsafe { ulp_load_binary(load_addr, program.as_ptr(), word_count.min(program.len() / 4)) }
    }

    fn run(&self, entry_point: u32) -> i32 {
        unsafe { ulp_run(entry_point) }
    }

    fn rtc_gpio_init(&self, gpio_num: i32) -> i32 {
        unsafe { rtc_gpio_init(gpio_num) }
    }

    fn rtc_gpio_set_direction(&self, gpio_num: i32, mode: RtcGpioMode) -> i32 {
        unsafe { rtc_gpio_set_direction(gpio_num, rtc_gpio_mode(mode)) }
    }

    fn rtc_gpio_pulldown_dis(&self, gpio_num: i32) -> i32 {
        unsafe { rtc_gpio_pulldown_dis(gpio_num) }
    }

    fn rtc_gpio_pullup_dis(&self, gpio_num: i32) -> i32 {
        unsafe { rtc_gpio_pullup_dis(gpio_num) }
    }

    fn rtc_gpio_hold_en(&self, gpio_num: i32) -> i32 {
        unsafe { rtc_gpio_hold_en(gpio_num) }
    }

    fn sleep_pd_config(&self, domain: PowerDomain, option: PowerOption) -> i32 {
        unsafe { esp_sleep_pd_config(pd_domain(domain), pd_option(option)) }
    }
}
