#![no_std]
#![no_main]

use core::cell::RefCell;
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Level, OutputOpenDrain, Pull, Speed};
use embassy_stm32::time::Hertz;
use embassy_stm32::{Config, Peripherals};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use pulse_line::{LineController, PulseConfig, run_pulse_timer};
use {defmt_rtt as _, panic_probe as _};

mod edge_task;
mod types;
mod worker_task;

use edge_task::edge_task;
use types::{ButtonPin, CONTROLLER, Controller, OpenDrainLine, TIME_SOURCE};
use worker_task::worker_task;

/// Configure system clock with HSE and PLL
fn configure_clock() -> Config {
    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV2,
            mul: PllMul::MUL12,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV1;
    }
    config
}

/// Configure the shared line (PA8) as open-drain with pull-up, released High
fn setup_shared_line(p: &mut Peripherals) -> OpenDrainLine<'static> {
    let pa8 = unsafe { p.PA8.clone_unchecked() };
    let pin = OutputOpenDrain::new_pull(pa8, Level::High, Speed::Low, Pull::Up);
    info!("Shared line configured on PA8 (open-drain, pull-up)");

    OpenDrainLine::new(pin)
}

/// Configure user button with EXTI falling-edge interrupt, plus a plain input
/// on the same pin for the worker's confirmation read
fn setup_button(p: &mut Peripherals) -> (ExtiInput<'static>, ButtonPin<'static>) {
    let pc13 = unsafe { p.PC13.clone_unchecked() };
    let exti13 = unsafe { p.EXTI13.clone_unchecked() };
    let exti = ExtiInput::new(pc13, exti13, Pull::Up);

    let pc13_level = unsafe { p.PC13.clone_unchecked() };
    let level = ButtonPin::new(Input::new(pc13_level, Pull::Up));
    info!("User button configured on PC13");

    (exti, level)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("=== Shared Line Pulse Generator ===");
    info!("Starting initialization...");

    let config = configure_clock();
    let mut p = embassy_stm32::init(config);
    info!("Clock configured - system running at 48 MHz");

    let line = setup_shared_line(&mut p);
    let (exti, button) = setup_button(&mut p);

    let controller: &'static Controller = CONTROLLER.init(Mutex::new(RefCell::new(LineController::new(
        line,
        button,
        &TIME_SOURCE,
        PulseConfig::default(),
    ))));

    info!("All hardware initialized successfully");

    spawner.spawn(edge_task(exti)).unwrap();
    spawner.spawn(worker_task(controller)).unwrap();

    info!("=== System Ready ===");
    info!("Line idle HIGH, pulses drive it LOW");
    info!(
        "Press the user button to send a {} ms LOW pulse",
        pulse_line::config::PULSE_WIDTH_MS
    );

    // Driver loop: service the pulse timer every poll period
    run_pulse_timer(controller, &mut Delay).await;
}
