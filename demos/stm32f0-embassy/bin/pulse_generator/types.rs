use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, ThreadModeRawMutex};
use embassy_sync::channel::Channel;
use pulse_line::{EventQueue, EventToken, SharedController};
use static_cell::StaticCell;

pub use stm32f0_embassy::hardware::{ButtonPin, OpenDrainLine};
pub use stm32f0_embassy::time_wrapper::{EmbassyInstant, EmbassyTimeSource};

/// Pin number of the user button (PC13) carried by every event token
pub const BUTTON_TOKEN: EventToken = EventToken::new(13);

/// Controller shared by the worker task and the main loop
pub type Controller = SharedController<
    'static,
    ThreadModeRawMutex,
    EmbassyInstant,
    OpenDrainLine<'static>,
    ButtonPin<'static>,
    EmbassyTimeSource,
>;

/// Queue from the edge task to the worker task
pub static EVENT_QUEUE: EventQueue<CriticalSectionRawMutex> = Channel::new();

pub static CONTROLLER: StaticCell<Controller> = StaticCell::new();

pub static TIME_SOURCE: EmbassyTimeSource = EmbassyTimeSource::new();
