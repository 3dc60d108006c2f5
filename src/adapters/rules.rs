use crate::domain::model::{FieldValue, FieldViolation};
use crate::domain::ports::Validator;
use regex::Regex;

/// One declarative constraint on a field value.
pub enum Rule {
    Required,
    MaxLen(usize),
    /// Named pattern rule; the code becomes the violation code.
    Pattern(&'static str, Regex),
}

struct FieldRules<T> {
    name: &'static str,
    get: fn(&T) -> FieldValue,
    rules: Vec<Rule>,
}

/// Rule-driven validator: per field, an accessor plus a list of constraints.
/// Collects every violation instead of stopping at the first.
pub struct RuleValidator<T> {
    fields: Vec<FieldRules<T>>,
}

impl<T> RuleValidator<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, name: &'static str, get: fn(&T) -> FieldValue, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldRules { name, get, rules });
        self
    }
}

impl<T> Default for RuleValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> Validator<T> for RuleValidator<T> {
    fn validate(&self, record: &T) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        for field in &self.fields {
            let value = (field.get)(record);
            for rule in &field.rules {
                match rule {
                    Rule::Required => {
                        let missing = match &value {
                            FieldValue::Null => true,
                            FieldValue::Text(s) => s.trim().is_empty(),
                            FieldValue::Date(_) => false,
                        };
                        if missing {
                            violations.push(FieldViolation::new(
                                field.name,
                                "required",
                                format!("{} is required", field.name),
                            ));
                        }
                    }
                    Rule::MaxLen(max) => {
                        if let Some(text) = value.as_text() {
                            if text.chars().count() > *max {
                                violations.push(FieldViolation::new(
                                    field.name,
                                    "maxlength",
                                    format!("{} exceeds {} characters", field.name, max),
                                ));
                            }
                        }
                    }
                    Rule::Pattern(code, regex) => {
                        if let Some(text) = value.as_text() {
                            if !text.is_empty() && !regex.is_match(text) {
                                violations.push(FieldViolation::new(
                                    field.name,
                                    code,
                                    format!("{} does not match the {} pattern", field.name, code),
                                ));
                            }
                        }
                    }
                }
            }
        }
        violations
    }
}

pub fn email_rule() -> Rule {
    Rule::Pattern(
        "email",
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap(),
    )
}

pub fn username_rule() -> Rule {
    Rule::Pattern("username", Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap())
}

pub fn phone_rule() -> Rule {
    Rule::Pattern("phone", Regex::new(r"^\+?[0-9][0-9 -]{5,}$").unwrap())
}
