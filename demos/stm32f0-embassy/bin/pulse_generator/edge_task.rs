use defmt::info;
use embassy_stm32::exti::ExtiInput;
use pulse_line::{EdgeEventSource, run_edge_source};

use crate::types::{BUTTON_TOKEN, EVENT_QUEUE};

#[embassy_executor::task]
pub async fn edge_task(mut button: ExtiInput<'static>) {
    info!("Edge task started - waiting for falling edges");

    let source = EdgeEventSource::new(EVENT_QUEUE.sender(), BUTTON_TOKEN);
    run_edge_source(&mut button, &source).await;
}
