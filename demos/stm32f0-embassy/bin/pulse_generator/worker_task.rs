use defmt::info;
use embassy_time::Delay;
use pulse_line::run_worker;

use crate::types::{Controller, EVENT_QUEUE};

#[embassy_executor::task]
pub async fn worker_task(controller: &'static Controller) {
    info!("Worker task started - waiting for presses");

    run_worker(controller, EVENT_QUEUE.receiver(), &mut Delay).await;
}
