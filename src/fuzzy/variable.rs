//! Нечеткая переменная: именованный набор функций принадлежности
//! над ограниченным универсумом. Используется как вход движка или как
//! его единственный выход.

use heapless::Vec;

use crate::fuzzy::membership::MembershipFunction;
use crate::fuzzy::{FuzzyError, MAX_MEMBERS};

/// Нечеткая переменная
///
/// Значения вне номинального диапазона фаззифицируются честно: формы
/// сами возвращают ноль за пределами собственного носителя, обрезка
/// входа не выполняется.
#[derive(Debug, Clone)]
pub struct FuzzyVariable {
    name: &'static str,
    min: f64,
    max: f64,
    members: Vec<MembershipFunction, MAX_MEMBERS>,
}

impl FuzzyVariable {
    /// Создание переменной с универсумом (min, max) и набором функций
    pub fn new(
        name: &'static str,
        universe: (f64, f64),
        members: &[MembershipFunction],
    ) -> Result<Self, FuzzyError> {
        let members =
            Vec::from_slice(members).map_err(|_| FuzzyError::CapacityExceeded)?;
        Ok(Self {
            name,
            min: universe.0,
            max: universe.1,
            members,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn universe(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Середина универсума; запасное значение дефаззификации при
    /// нулевой активации
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[MembershipFunction] {
        &self.members
    }

    /// Фаззификация: степень принадлежности x каждой функции переменной
    pub fn fuzzify(&self, x: f64) -> Vec<(&'static str, f64), MAX_MEMBERS> {
        let mut out = Vec::new();
        for mf in &self.members {
            // Вместимость совпадает с хранилищем функций
            let _ = out.push((mf.name(), mf.compute(x)));
        }
        out
    }

    /// Степени принадлежности по индексам функций
    pub(crate) fn degrees(&self, x: f64) -> Vec<f64, MAX_MEMBERS> {
        let mut out = Vec::new();
        for mf in &self.members {
            let _ = out.push(mf.compute(x));
        }
        out
    }

    /// Проверка инвариантов: формы корректны, имена уникальны
    pub(crate) fn validate(&self) -> Result<(), FuzzyError> {
        for (i, mf) in self.members.iter().enumerate() {
            mf.validate()?;
            for other in &self.members[..i] {
                if other.name() == mf.name() {
                    return Err(FuzzyError::DuplicateMember);
                }
            }
        }
        Ok(())
    }

    /// Самый узкий ненулевой склон среди всех функций переменной
    pub(crate) fn narrowest_ramp(&self) -> Option<f64> {
        let mut narrowest: Option<f64> = None;
        for mf in &self.members {
            if let Some(w) = mf.narrowest_ramp() {
                narrowest = Some(match narrowest {
                    Some(n) if n < w => n,
                    _ => w,
                });
            }
        }
        narrowest
    }
}

// Модульные тесты
#[cfg(test)]
mod tests {
    use super::*;

    fn distance() -> FuzzyVariable {
        FuzzyVariable::new(
            "distance",
            (0.0, 80.0),
            &[
                MembershipFunction::trapezoidal("near", [0.0, 0.0, 15.0, 30.0]),
                MembershipFunction::triangular("medium", [20.0, 40.0, 60.0]),
                MembershipFunction::trapezoidal("far", [50.0, 65.0, 80.0, 80.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_fuzzify_names_and_degrees() {
        let var = distance();
        let degrees = var.fuzzify(25.0);
        assert_eq!(degrees.len(), 3);
        assert_eq!(degrees[0].0, "near");
        assert!((degrees[0].1 - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(degrees[1], ("medium", 0.25));
        assert_eq!(degrees[2], ("far", 0.0));
    }

    #[test]
    fn test_fuzzify_outside_universe() {
        // Вне номинального диапазона формы честно дают ноль
        let var = distance();
        for (_, degree) in var.fuzzify(200.0) {
            assert_eq!(degree, 0.0);
        }
    }

    #[test]
    fn test_midpoint() {
        let var = distance();
        assert_eq!(var.midpoint(), 40.0);
    }

    #[test]
    fn test_duplicate_member() {
        let var = FuzzyVariable::new(
            "x",
            (0.0, 1.0),
            &[
                MembershipFunction::triangular("low", [0.0, 0.0, 0.5]),
                MembershipFunction::triangular("low", [0.5, 1.0, 1.0]),
            ],
        )
        .unwrap();
        assert_eq!(var.validate(), Err(FuzzyError::DuplicateMember));
    }

    #[test]
    fn test_narrowest_ramp() {
        let var = distance();
        // medium: склоны по 20, near: спад 15, far: подъем 15
        assert_eq!(var.narrowest_ramp(), Some(15.0));
    }
}
