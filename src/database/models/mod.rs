pub mod coach;
pub mod ticket_checker;
pub mod train;

pub use coach::Coach;
pub use ticket_checker::TicketChecker;
pub use train::Train;
