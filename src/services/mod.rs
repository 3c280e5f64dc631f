pub mod clock;
pub mod feedback;
pub mod ids;
pub mod portfolio;

pub use clock::{Clock, SystemClock};
pub use feedback::FeedbackService;
pub use ids::{IdGenerator, UuidGenerator};
pub use portfolio::PortfolioService;
