pub mod helpers;
pub mod mock_link;

pub use helpers::*;
pub use mock_link::MockChannelLink;
