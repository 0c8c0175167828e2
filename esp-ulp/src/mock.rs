//! Recording [`UlpDriver`] for host tests.
//!
//! Every call is appended to a per-thread log and answered with a per-thread
//! status, so tests running in parallel don't observe each other.

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use crate::{
    ESP_OK,
    Ulp,
    driver::{PowerDomain, PowerOption, RtcGpioMode, UlpDriver},
    private::Sealed,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    DisableRomLogging,
    SetWakeupPeriod { period_index: usize, period_us: u32 },
    LoadBinary { load_addr: u32, len: usize, word_count: usize },
    Run { entry_point: u32 },
    RtcGpioInit(i32),
    RtcGpioSetDirection(i32, RtcGpioMode),
    RtcGpioPulldownDis(i32),
    RtcGpioPullupDis(i32),
    RtcGpioHoldEn(i32),
    SleepPdConfig(PowerDomain, PowerOption),
}

std::thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
    static STATUS: Cell<i32> = const { Cell::new(ESP_OK) };
}

pub(crate) struct Recorder;

static ULP: Ulp<Recorder> = Ulp::bind(Recorder);

impl Recorder {
    /// Answer every following call with `status`.
    pub(crate) fn respond_with(status: i32) {
        STATUS.set(status);
    }

    /// Calls recorded on this thread so far.
    pub(crate) fn calls() -> Vec<Call> {
        CALLS.with_borrow(|calls| calls.clone())
    }

    pub(crate) fn clear() {
        CALLS.with_borrow_mut(Vec::clear);
    }

    /// Forget all calls and answer with `ESP_OK` again.
    pub(crate) fn reset() {
        Self::clear();
        Self::respond_with(ESP_OK);
    }

    fn record(call: Call) -> i32 {
        CALLS.with_borrow_mut(|calls| calls.push(call));
        STATUS.get()
    }
}

impl Sealed for Recorder {}

impl UlpDriver for Recorder {
    fn handle() -> &'static Ulp<Self> {
        &ULP
    }

    fn disable_rom_logging(&self) {
        Self::record(Call::DisableRomLogging);
    }

    fn set_wakeup_period(&self, period_index: usize, period_us: u32) -> i32 {
        Self::record(Call::SetWakeupPeriod {
            period_index,
            period_us,
        })
    }

    fn load_binary(&self, load_addr: u32, program: &[u8], word_count: usize) -> i32 {
        Self::record(Call::LoadBinary {
            load_addr,
            len: program.len(),
            word_count,
        })
    }

    fn run(&self, entry_point: u32) -> i32 {
        Self::record(Call::Run { entry_point })
    }

    fn rtc_gpio_init(&self, gpio_num: i32) -> i32 {
        Self::record(Call::RtcGpioInit(gpio_num))
    }

    fn rtc_gpio_set_direction(&self, gpio_num: i32, mode: RtcGpioMode) -> i32 {
        Self::record(Call::RtcGpioSetDirection(gpio_num, mode))
    }

    fn rtc_gpio_pulldown_dis(&self, gpio_num: i32) -> i32 {
        Self::record(Call::RtcGpioPulldownDis(gpio_num))
    }

    fn rtc_gpio_pullup_dis(&self, gpio_num: i32) -> i32 {
        Self::record(Call::RtcGpioPullupDis(gpio_num))
    }

    fn rtc_gpio_hold_en(&self, gpio_num: i32) -> i32 {
        Self::record(Call::RtcGpioHoldEn(gpio_num))
    }

    fn sleep_pd_config(&self, domain: PowerDomain, option: PowerOption) -> i32 {
        Self::record(Call::SleepPdConfig(domain, option))
    }
}
