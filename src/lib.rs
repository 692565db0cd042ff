//! Нечеткое управление наземным ровером
//!
//! Обобщенный движок нечеткого вывода Мамдани и два тонких контроллера
//! поверх него: удержание дистанции ("дистанция -> скорость") и руление
//! по боковым просветам ("просветы -> угол"). Движок параметризуется
//! произвольным числом входных переменных и таблицей правил, поэтому
//! логика вывода между контроллерами не дублируется.
//!
//! Измерение дальности, ШИМ приводов и супервизия процессов — внешние
//! слои: ядро принимает четкие числа и возвращает четкое число.
//!
//! Включите фичу `defmt`, чтобы получить отладочные логи и форматирование
//! ошибок на целевой плате.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod fuzzy;
pub mod utils;

pub use control::{DistanceController, SteeringController};
pub use fuzzy::{
    AggregationMethod, AndMethod, Combinator, DefuzzMethod, EngineBuilder, FuzzyError,
    FuzzyVariable, ImplicationMethod, InferenceEngine, MembershipFunction, OperatorSet,
    OrMethod, Rule, Shape,
};
