//! Тонкие контроллеры, связывающие статические таблицы с движком

pub mod distance;
pub mod steering;

pub use distance::DistanceController;
pub use steering::SteeringController;
