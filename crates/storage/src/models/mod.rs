mod athlete;
mod category;
mod training_center;

pub use athlete::{Athlete, AthleteRecord, AthleteSummary};
pub use category::Category;
pub use training_center::TrainingCenter;
