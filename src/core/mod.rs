pub mod constants;
pub mod detector;
pub mod layout;
pub mod melody;
pub mod playback;

pub use constants::*;
pub use detector::*;
pub use layout::*;
pub use melody::*;
pub use playback::*;
