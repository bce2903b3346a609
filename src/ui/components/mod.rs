mod carousel;
mod command_input;
mod input;
mod key_result;
mod rotator;
mod search_input;
mod slider;

pub use carousel::Carousel;
pub use command_input::{CommandEvent, CommandInput};
pub use key_result::KeyResult;
pub use rotator::Rotator;
pub use search_input::{SearchEvent, SearchInput};
pub use slider::{visible_count, Slider};
