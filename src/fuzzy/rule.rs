//! Представление правила нечеткого вывода
//!
//! Антецедент — упорядоченный список ссылок (вход, функция), объединяемых
//! одним комбинатором; консеквент — одна функция выходной переменной.
//! Правило неизменяемо, корректность индексов проверяется при сборке
//! движка.

use heapless::Vec;

use crate::fuzzy::{FuzzyError, MAX_INPUTS};

/// Способ объединения условий антецедента
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Конъюнкция (min или произведение, по конфигурации движка)
    And,
    /// Дизъюнкция (max или вероятностная сумма)
    Or,
}

/// Одно условие антецедента: функция `member` переменной `input`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub input: usize,
    pub member: usize,
}

/// Правило базы нечеткого вывода
#[derive(Debug, Clone)]
pub struct Rule {
    antecedent: Vec<Clause, MAX_INPUTS>,
    combinator: Combinator,
    consequent: usize,
    weight: f64,
}

impl Rule {
    /// Создание правила с весом 1.0
    ///
    /// `antecedent` — пары (индекс входной переменной, индекс функции),
    /// `consequent` — индекс функции выходной переменной.
    pub fn new(
        antecedent: &[(usize, usize)],
        combinator: Combinator,
        consequent: usize,
    ) -> Result<Self, FuzzyError> {
        let mut clauses = Vec::new();
        for &(input, member) in antecedent {
            clauses
                .push(Clause { input, member })
                .map_err(|_| FuzzyError::CapacityExceeded)?;
        }
        Ok(Self {
            antecedent: clauses,
            combinator,
            consequent,
            weight: 1.0,
        })
    }

    /// Задание веса правила; при вычислении вес ограничивается [0, 1]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn antecedent(&self) -> &[Clause] {
        &self.antecedent
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn consequent(&self) -> usize {
        self.consequent
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

// Модульные тесты
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_construction() {
        let rule = Rule::new(&[(0, 1), (1, 2)], Combinator::And, 0).unwrap();
        assert_eq!(rule.antecedent().len(), 2);
        assert_eq!(rule.antecedent()[0], Clause { input: 0, member: 1 });
        assert_eq!(rule.combinator(), Combinator::And);
        assert_eq!(rule.consequent(), 0);
        assert_eq!(rule.weight(), 1.0);
    }

    #[test]
    fn test_rule_weight() {
        let rule = Rule::new(&[(0, 0)], Combinator::Or, 2)
            .unwrap()
            .with_weight(0.5);
        assert_eq!(rule.weight(), 0.5);
    }

    #[test]
    fn test_rule_capacity() {
        let too_many = [(0usize, 0usize); MAX_INPUTS + 1];
        assert_eq!(
            Rule::new(&too_many, Combinator::And, 0).unwrap_err(),
            FuzzyError::CapacityExceeded
        );
    }
}
