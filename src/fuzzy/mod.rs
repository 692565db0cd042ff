//! Обобщенный нечеткий вывод Мамдани
//!
//! Ядро контроллера: функции принадлежности, нечеткие переменные,
//! база правил и машина вывода. Ядро не делает ввода-вывода и не хранит
//! состояния между вызовами, поэтому один экземпляр можно разделять
//! между задачами без блокировок.

pub mod engine;
pub mod membership;
pub mod rule;
pub mod variable;

pub use engine::{
    AggregationMethod, AndMethod, DefuzzMethod, EngineBuilder, ImplicationMethod,
    InferenceEngine, OperatorSet, OrMethod,
};
pub use membership::{MembershipFunction, Shape};
pub use rule::{Clause, Combinator, Rule};
pub use variable::FuzzyVariable;

/// Максимальное число входных переменных движка
pub const MAX_INPUTS: usize = 4;
/// Максимальное число функций принадлежности в одной переменной
pub const MAX_MEMBERS: usize = 8;
/// Максимальный размер базы правил
pub const MAX_RULES: usize = 32;

/// Ошибки конфигурации и вычисления нечеткого вывода
///
/// Ошибки конфигурации обнаруживаются при сборке движка и фатальны:
/// частично собранный движок не возвращается. Ошибка арности при вызове
/// прерывает только этот вызов, движок остается пригодным к работе.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyError {
    /// Несовпадение конфигурации: арность входов или индекс вне диапазона
    ConfigurationMismatch { expected: usize, actual: usize },
    /// Вырожденный универсум выхода (min >= max)
    DegenerateUniverse,
    /// Параметры формы не упорядочены по неубыванию
    InvalidShape,
    /// Повторяющееся имя функции принадлежности внутри переменной
    DuplicateMember,
    /// Переполнение таблиц конфигурации фиксированной вместимости
    CapacityExceeded,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FuzzyError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FuzzyError::ConfigurationMismatch { expected, actual } => {
                defmt::write!(fmt, "Fuzzy: configuration mismatch ({} vs {})", expected, actual)
            }
            FuzzyError::DegenerateUniverse => {
                defmt::write!(fmt, "Fuzzy: degenerate output universe")
            }
            FuzzyError::InvalidShape => defmt::write!(fmt, "Fuzzy: invalid shape parameters"),
            FuzzyError::DuplicateMember => defmt::write!(fmt, "Fuzzy: duplicate member name"),
            FuzzyError::CapacityExceeded => defmt::write!(fmt, "Fuzzy: capacity exceeded"),
        }
    }
}
