//! Машина нечеткого вывода Мамдани
//!
//! Один вызов `evaluate` выполняет полный проход
//! фаззификация -> оценка правил -> импликация/агрегация -> дефаззификация
//! и не оставляет следов между вызовами. Конфигурация собирается один раз
//! через [`EngineBuilder`] и после этого только читается.

use heapless::Vec;

use crate::fuzzy::rule::{Combinator, Rule};
use crate::fuzzy::variable::FuzzyVariable;
use crate::fuzzy::{FuzzyError, MAX_INPUTS, MAX_MEMBERS, MAX_RULES};
use crate::utils::math::constrain;

/// Число точек сетки дефаззификации по умолчанию
pub const DEFAULT_RESOLUTION: usize = 1001;

/// Метод конъюнкции антецедента
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndMethod {
    Min,
    Product,
}

impl AndMethod {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            AndMethod::Min => a.min(b),
            AndMethod::Product => a * b,
        }
    }
}

/// Метод дизъюнкции антецедента
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrMethod {
    Max,
    /// a + b - a*b
    ProbabilisticSum,
}

impl OrMethod {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            OrMethod::Max => a.max(b),
            OrMethod::ProbabilisticSum => a + b - a * b,
        }
    }
}

/// Метод импликации: усечение формы консеквента силой правила
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplicationMethod {
    Min,
    Product,
}

impl ImplicationMethod {
    pub fn apply(self, strength: f64, membership: f64) -> f64 {
        match self {
            ImplicationMethod::Min => strength.min(membership),
            ImplicationMethod::Product => strength * membership,
        }
    }
}

/// Метод агрегации усеченных кривых в одну
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMethod {
    Max,
    /// a + b - a*b
    ProbabilisticSum,
}

impl AggregationMethod {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            AggregationMethod::Max => a.max(b),
            AggregationMethod::ProbabilisticSum => a + b - a * b,
        }
    }
}

/// Метод дефаззификации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefuzzMethod {
    /// Центр тяжести агрегированной кривой
    Centroid,
}

/// Набор операторов движка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSet {
    pub and_method: AndMethod,
    pub or_method: OrMethod,
    pub implication: ImplicationMethod,
    pub aggregation: AggregationMethod,
    pub defuzzification: DefuzzMethod,
}

impl Default for OperatorSet {
    fn default() -> Self {
        Self {
            and_method: AndMethod::Min,
            or_method: OrMethod::Max,
            implication: ImplicationMethod::Min,
            aggregation: AggregationMethod::Max,
            defuzzification: DefuzzMethod::Centroid,
        }
    }
}

/// Пошаговая сборка движка из статической конфигурации
///
/// Все проверки выполняются в [`EngineBuilder::build`]; ошибка сборки
/// фатальна, частично собранный движок не возвращается.
#[derive(Debug)]
pub struct EngineBuilder {
    inputs: Vec<FuzzyVariable, MAX_INPUTS>,
    output: Option<FuzzyVariable>,
    rules: Vec<Rule, MAX_RULES>,
    operators: OperatorSet,
    resolution: usize,
    overflowed: bool,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            rules: Vec::new(),
            operators: OperatorSet::default(),
            resolution: DEFAULT_RESOLUTION,
            overflowed: false,
        }
    }

    /// Добавление входной переменной; порядок добавления определяет
    /// порядок значений в `evaluate`
    pub fn input(mut self, var: FuzzyVariable) -> Self {
        if self.inputs.push(var).is_err() {
            self.overflowed = true;
        }
        self
    }

    /// Единственная выходная переменная
    pub fn output(mut self, var: FuzzyVariable) -> Self {
        self.output = Some(var);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        if self.rules.push(rule).is_err() {
            self.overflowed = true;
        }
        self
    }

    pub fn and_method(mut self, method: AndMethod) -> Self {
        self.operators.and_method = method;
        self
    }

    pub fn or_method(mut self, method: OrMethod) -> Self {
        self.operators.or_method = method;
        self
    }

    pub fn implication(mut self, method: ImplicationMethod) -> Self {
        self.operators.implication = method;
        self
    }

    pub fn aggregation(mut self, method: AggregationMethod) -> Self {
        self.operators.aggregation = method;
        self
    }

    pub fn defuzzification(mut self, method: DefuzzMethod) -> Self {
        self.operators.defuzzification = method;
        self
    }

    /// Минимальное число точек сетки дефаззификации
    pub fn resolution(mut self, points: usize) -> Self {
        self.resolution = points;
        self
    }

    /// Проверка конфигурации и сборка движка
    pub fn build(self) -> Result<InferenceEngine, FuzzyError> {
        if self.overflowed {
            return Err(FuzzyError::CapacityExceeded);
        }
        let output = match self.output {
            Some(var) => var,
            None => {
                return Err(FuzzyError::ConfigurationMismatch {
                    expected: 1,
                    actual: 0,
                })
            }
        };

        let (min, max) = output.universe();
        if min >= max {
            return Err(FuzzyError::DegenerateUniverse);
        }

        for var in &self.inputs {
            var.validate()?;
        }
        output.validate()?;

        for rule in &self.rules {
            if rule.antecedent().is_empty() {
                return Err(FuzzyError::ConfigurationMismatch {
                    expected: 1,
                    actual: 0,
                });
            }
            for clause in rule.antecedent() {
                if clause.input >= self.inputs.len() {
                    return Err(FuzzyError::ConfigurationMismatch {
                        expected: self.inputs.len(),
                        actual: clause.input,
                    });
                }
                let members = self.inputs[clause.input].member_count();
                if clause.member >= members {
                    return Err(FuzzyError::ConfigurationMismatch {
                        expected: members,
                        actual: clause.member,
                    });
                }
            }
            if rule.consequent() >= output.member_count() {
                return Err(FuzzyError::ConfigurationMismatch {
                    expected: output.member_count(),
                    actual: rule.consequent(),
                });
            }
        }

        // Сетка не грубее самого узкого склона выходных форм
        let mut grid_points = self.resolution.max(2);
        if let Some(ramp) = output.narrowest_ramp() {
            let needed = libm::ceil((max - min) / ramp) as usize + 1;
            grid_points = grid_points.max(needed);
        }

        Ok(InferenceEngine {
            inputs: self.inputs,
            output,
            rules: self.rules,
            operators: self.operators,
            grid_points,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Движок нечеткого вывода Мамдани
///
/// После сборки конфигурация только читается, рабочее состояние живет
/// в кадре одного вызова `evaluate`, поэтому движок реентерабелен.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    inputs: Vec<FuzzyVariable, MAX_INPUTS>,
    output: FuzzyVariable,
    rules: Vec<Rule, MAX_RULES>,
    operators: OperatorSet,
    grid_points: usize,
}

impl InferenceEngine {
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output(&self) -> &FuzzyVariable {
        &self.output
    }

    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    /// Полный проход вывода: одно четкое значение на кортеж входов
    ///
    /// `inputs` перечисляются в порядке объявления входных переменных.
    /// Несовпадение арности прерывает только этот вызов.
    pub fn evaluate(&self, inputs: &[f64]) -> Result<f64, FuzzyError> {
        if inputs.len() != self.inputs.len() {
            return Err(FuzzyError::ConfigurationMismatch {
                expected: self.inputs.len(),
                actual: inputs.len(),
            });
        }

        // Фаззификация всех входов
        let mut degrees: Vec<Vec<f64, MAX_MEMBERS>, MAX_INPUTS> = Vec::new();
        for (var, &x) in self.inputs.iter().zip(inputs) {
            // Вместимость совпадает с хранилищем входов
            let _ = degrees.push(var.degrees(x));
        }

        let strengths = self.rule_strengths(&degrees);
        Ok(self.defuzzify(&strengths))
    }

    /// Эффективные силы срабатывания правил: комбинация степеней
    /// антецедента, умноженная на ограниченный вес правила
    fn rule_strengths(
        &self,
        degrees: &[Vec<f64, MAX_MEMBERS>],
    ) -> Vec<f64, MAX_RULES> {
        let mut strengths = Vec::new();
        for rule in &self.rules {
            let clauses = rule.antecedent();
            let mut strength = degrees[clauses[0].input][clauses[0].member];
            for clause in &clauses[1..] {
                let degree = degrees[clause.input][clause.member];
                strength = match rule.combinator() {
                    Combinator::And => self.operators.and_method.apply(strength, degree),
                    Combinator::Or => self.operators.or_method.apply(strength, degree),
                };
            }
            let weight = constrain(rule.weight(), 0.0, 1.0);
            let _ = strengths.push(strength * weight);
        }
        strengths
    }

    /// Высота агрегированной кривой в точке x выходного универсума
    ///
    /// Правила с нулевой силой ничего не вносят; импликация усекает
    /// форму консеквента, агрегация сворачивает правила поточечно.
    fn aggregate_at(&self, x: f64, strengths: &[f64]) -> f64 {
        let mut acc = 0.0;
        for (rule, &strength) in self.rules.iter().zip(strengths) {
            if strength > 0.0 {
                let membership = self.output.members()[rule.consequent()].compute(x);
                let clipped = self.operators.implication.apply(strength, membership);
                acc = self.operators.aggregation.apply(acc, clipped);
            }
        }
        acc
    }

    /// Дефаззификация агрегированной кривой
    ///
    /// Центроид по равномерной сетке; тождественно нулевая кривая дает
    /// середину универсума как определенное запасное значение.
    fn defuzzify(&self, strengths: &[f64]) -> f64 {
        match self.operators.defuzzification {
            DefuzzMethod::Centroid => {
                let (min, max) = self.output.universe();
                let step = (max - min) / ((self.grid_points - 1) as f64);
                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for i in 0..self.grid_points {
                    let x = min + step * (i as f64);
                    let mu = self.aggregate_at(x, strengths);
                    numerator += x * mu;
                    denominator += mu;
                }
                if denominator == 0.0 {
                    self.output.midpoint()
                } else {
                    numerator / denominator
                }
            }
        }
    }
}
